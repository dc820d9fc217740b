//! HeadHunter client for fetching employer vacancy listings.
//!
//! API reference: <https://api.hh.ru/openapi/redoc#tag/Poisk-vakansij>
//!
//! Only the first page of `GET /vacancies?employer_id=..&per_page=..` is read.
//! Requests are never retried. Fetching several employers goes through
//! [`VacancySource::fetch_all`], which stops at the first failure.

use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use vacancies_core::HttpConfig;
use vacancies_core::error::AppError;
use vacancies_core::models::VacancyRecord;
use vacancies_core::traits::VacancySource;

/// Response structure of the `/vacancies` search endpoint.
///
/// Paging fields (`found`, `pages`, `page`) are ignored.
#[derive(Deserialize, Debug)]
struct VacanciesPage {
    items: Vec<HhVacancy>,
}

/// Data Transfer Object for a single vacancy item.
///
/// Only the fields stored by the harvester are declared; everything else in
/// the item is ignored.
///
/// # Examples
///
/// ```
/// use vacancies_client::hh::HhVacancy;
///
/// let json = r#"{
///     "id": "93353083",
///     "name": "Senior Engineer",
///     "url": "https://api.hh.ru/vacancies/93353083",
///     "employer": {"id": "1740", "name": "Yandex"},
///     "salary": {"from": 150000, "to": null, "currency": "RUR"}
/// }"#;
///
/// let vacancy: HhVacancy = serde_json::from_str(json).unwrap();
/// assert_eq!(vacancy.employer.name, "Yandex");
/// assert_eq!(vacancy.salary.unwrap().from, Some(150000));
/// ```
#[derive(Deserialize, Debug, Clone)]
pub struct HhVacancy {
    pub name: String,
    pub url: String,
    pub employer: HhEmployer,
    /// `null` when the employer did not publish a salary.
    #[serde(default)]
    pub salary: Option<HhSalary>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct HhEmployer {
    pub name: String,
}

/// Salary range of a vacancy. Only the lower bound is kept.
#[derive(Deserialize, Debug, Clone)]
pub struct HhSalary {
    #[serde(default)]
    pub from: Option<i32>,
}

/// HTTP client for the HeadHunter vacancy listing API.
///
/// # Examples
///
/// ```no_run
/// use vacancies_client::HhClient;
/// use vacancies_core::{SilentReporter, VacancySource};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HhClient::new("https://api.hh.ru")?;
/// let ids = ["1740".to_string(), "3529".to_string()];
/// let records = client.fetch_all(&ids, &SilentReporter).await?;
/// println!("Fetched {} vacancies", records.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HhClient {
    client: Client,
    base_url: Url,
    per_page: u32,
    timeout_secs: u64,
}

impl HhClient {
    /// Creates a new client for the listing API at `base_url_str`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidApiUrl` if the URL is malformed.
    /// Returns `AppError::ClientError` if the HTTP client cannot be built.
    pub fn new(base_url_str: &str) -> Result<Self, AppError> {
        Self::with_config(base_url_str, HttpConfig::default())
    }

    /// Creates a new client with explicit HTTP settings.
    pub fn with_config(base_url_str: &str, http_config: HttpConfig) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url_str)
            .map_err(|_| AppError::InvalidApiUrl(base_url_str.to_string()))?;

        // hh.ru rejects requests without a User-Agent.
        let client = Client::builder()
            .user_agent(concat!("vacancies/", env!("CARGO_PKG_VERSION")))
            .timeout(http_config.timeout)
            .build()
            .map_err(|e| AppError::ClientError(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            per_page: http_config.per_page,
            timeout_secs: http_config.timeout.as_secs(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Builds the listing URL for one employer.
    fn vacancies_url(&self, employer_id: &str) -> Result<Url, AppError> {
        let mut url = self
            .base_url
            .join("vacancies")
            .map_err(|e| AppError::InvalidApiUrl(e.to_string()))?;

        url.query_pairs_mut()
            .append_pair("employer_id", employer_id)
            .append_pair("per_page", &self.per_page.to_string());

        Ok(url)
    }

    /// Fetches the first page of vacancies for one employer.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Timeout` or `AppError::NetworkError` on transport
    /// failures, and `AppError::ClientError` on a non-success status or a body
    /// that does not match the expected shape.
    pub async fn fetch_employer_page(&self, employer_id: &str) -> Result<Vec<HhVacancy>, AppError> {
        let url = self.vacancies_url(employer_id)?;
        debug!("GET {}", url);

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::ClientError(format!(
                "HTTP {} from {}",
                status.as_u16(),
                url
            )));
        }

        let page: VacanciesPage = resp
            .json()
            .await
            .map_err(|e| AppError::ClientError(e.to_string()))?;

        Ok(page.items)
    }

    fn transport_error(&self, e: reqwest::Error) -> AppError {
        if e.is_timeout() {
            AppError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            AppError::NetworkError(format!("Connection failed: {}", e))
        } else {
            AppError::ClientError(e.to_string())
        }
    }

    /// Converts a raw listing item into the record stored by the repository.
    ///
    /// # Examples
    ///
    /// ```
    /// use vacancies_client::HhClient;
    /// use vacancies_client::hh::HhVacancy;
    ///
    /// let json = r#"{
    ///     "name": "Analyst",
    ///     "url": "https://api.hh.ru/vacancies/1",
    ///     "employer": {"name": "Acme"},
    ///     "salary": null
    /// }"#;
    /// let vacancy: HhVacancy = serde_json::from_str(json).unwrap();
    ///
    /// let record = HhClient::into_record(vacancy);
    /// assert_eq!(record.employer_name, "Acme");
    /// assert_eq!(record.salary, None);
    /// ```
    pub fn into_record(vacancy: HhVacancy) -> VacancyRecord {
        VacancyRecord {
            employer_name: vacancy.employer.name,
            name: vacancy.name,
            salary: vacancy.salary.and_then(|s| s.from),
            link: vacancy.url,
        }
    }
}

// =============================================================================
// Trait Implementation: VacancySource
// =============================================================================

impl VacancySource for HhClient {
    async fn fetch_employer(&self, employer_id: &str) -> Result<Vec<VacancyRecord>, AppError> {
        let items = self.fetch_employer_page(employer_id).await?;
        Ok(items.into_iter().map(HhClient::into_record).collect())
    }
}
