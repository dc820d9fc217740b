//! Vacancy repository for PostgreSQL.

use std::collections::HashMap;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Pool, Postgres};
use tracing::debug;

use vacancies_core::error::AppError;
use vacancies_core::models::{
    Company, CompanyVacancyCount, InsertSummary, Vacancy, VacancyListing, VacancyRecord,
};
use vacancies_core::{DbConfig, VacancyQueries, VacancyStore};

const CREATE_COMPANIES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS companies (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL
    )
"#;

const CREATE_VACANCIES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS vacancies (
        id SERIAL PRIMARY KEY,
        company_id INTEGER NOT NULL REFERENCES companies(id),
        name VARCHAR(255) NOT NULL,
        salary INTEGER,
        link VARCHAR(255) NOT NULL
    )
"#;

// Listing queries share the same projection so they all map onto VacancyListing.
const ALL_VACANCIES_QUERY: &str = "SELECT c.name AS company_name, v.name AS vacancy_name, v.salary, v.link FROM companies c JOIN vacancies v ON c.id = v.company_id ORDER BY v.id";
const ABOVE_SALARY_QUERY: &str = "SELECT c.name AS company_name, v.name AS vacancy_name, v.salary, v.link FROM companies c JOIN vacancies v ON c.id = v.company_id WHERE v.salary > $1::float8 ORDER BY v.id";
const KEYWORD_QUERY: &str = "SELECT c.name AS company_name, v.name AS vacancy_name, v.salary, v.link FROM companies c JOIN vacancies v ON c.id = v.company_id WHERE v.name ILIKE $1 ORDER BY v.id";

/// Repository for companies and vacancies in PostgreSQL.
///
/// The repository holds a pool limited to one connection: it is opened once
/// at startup and released with [`close`](Self::close) at shutdown.
///
/// # Examples
///
/// ```no_run
/// use vacancies_core::DbConfig;
/// use vacancies_db::VacancyRepository;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repo = VacancyRepository::connect(&DbConfig::default()).await?;
/// repo.initialize_schema().await?;
/// println!("{:?}", repo.average_salary().await?);
/// repo.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct VacancyRepository {
    pool: Pool<Postgres>,
}

impl VacancyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens the connection described by `config`.
    pub async fn connect(config: &DbConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(Self::new(pool))
    }

    /// Closes the underlying connection. Further queries fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Creates the `companies` and `vacancies` tables if they do not exist.
    ///
    /// Both statements run in one transaction which is committed on success.
    pub async fn initialize_schema(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::DatabaseError)?;

        sqlx::query(CREATE_COMPANIES_TABLE)
            .execute(&mut *tx)
            .await
            .map_err(AppError::DatabaseError)?;

        sqlx::query(CREATE_VACANCIES_TABLE)
            .execute(&mut *tx)
            .await
            .map_err(AppError::DatabaseError)?;

        tx.commit().await.map_err(AppError::DatabaseError)?;
        Ok(())
    }

    /// Inserts a batch of fetched records in a single transaction.
    ///
    /// Company names are deduplicated against the names seen in this batch only:
    /// a name already stored by an earlier run gets a new company row. The
    /// transaction is committed once at the end, so a failure leaves no rows behind.
    pub async fn insert_batch(&self, records: &[VacancyRecord]) -> Result<InsertSummary, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::DatabaseError)?;
        let mut company_ids: HashMap<&str, i32> = HashMap::new();
        let mut summary = InsertSummary::default();

        for record in records {
            let company_id = match company_ids.get(record.employer_name.as_str()) {
                Some(id) => *id,
                None => {
                    let (id,): (i32,) =
                        sqlx::query_as("INSERT INTO companies (name) VALUES ($1) RETURNING id")
                            .bind(&record.employer_name)
                            .fetch_one(&mut *tx)
                            .await
                            .map_err(AppError::DatabaseError)?;

                    company_ids.insert(record.employer_name.as_str(), id);
                    summary.companies_created += 1;
                    id
                }
            };

            sqlx::query(
                r#"
                INSERT INTO vacancies (company_id, name, salary, link)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(company_id)
            .bind(&record.name)
            .bind(record.salary)
            .bind(&record.link)
            .execute(&mut *tx)
            .await
            .map_err(AppError::DatabaseError)?;

            summary.vacancies_inserted += 1;
        }

        tx.commit().await.map_err(AppError::DatabaseError)?;

        debug!(
            companies = summary.companies_created,
            vacancies = summary.vacancies_inserted,
            "Committed insert batch"
        );
        Ok(summary)
    }

    /// Returns every company row, ordered by id.
    pub async fn companies(&self) -> Result<Vec<Company>, AppError> {
        sqlx::query_as::<_, Company>("SELECT id, name FROM companies ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Returns every vacancy row, ordered by id.
    pub async fn vacancies(&self) -> Result<Vec<Vacancy>, AppError> {
        sqlx::query_as::<_, Vacancy>(
            "SELECT id, company_id, name, salary, link FROM vacancies ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::DatabaseError)
    }

    /// Returns each company name with its number of vacancies.
    ///
    /// Companies without vacancies are reported with a count of zero. Rows are
    /// grouped by name, so company rows sharing a name are reported once.
    pub async fn companies_with_vacancy_counts(
        &self,
    ) -> Result<Vec<CompanyVacancyCount>, AppError> {
        sqlx::query_as::<_, CompanyVacancyCount>(
            r#"
            SELECT c.name, COUNT(v.id) AS vacancies_count
            FROM companies c
            LEFT JOIN vacancies v ON c.id = v.company_id
            GROUP BY c.name
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::DatabaseError)
    }

    /// Returns every vacancy with its company name.
    pub async fn all_vacancies(&self) -> Result<Vec<VacancyListing>, AppError> {
        sqlx::query_as::<_, VacancyListing>(ALL_VACANCIES_QUERY)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Average of all non-null salaries, or `None` when there are none.
    pub async fn average_salary(&self) -> Result<Option<f64>, AppError> {
        sqlx::query_scalar::<_, Option<f64>>("SELECT AVG(salary)::float8 FROM vacancies")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Vacancies whose salary is strictly greater than the current average.
    ///
    /// The average and the filter are two separate statements. When there is
    /// no average, the comparison against NULL matches nothing.
    pub async fn vacancies_above_average_salary(&self) -> Result<Vec<VacancyListing>, AppError> {
        let average = self.average_salary().await?;

        sqlx::query_as::<_, VacancyListing>(ABOVE_SALARY_QUERY)
            .bind(average)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Vacancies whose name contains `keyword`, case-insensitively.
    ///
    /// The keyword is not escaped: `%` and `_` inside it act as ILIKE wildcards.
    // TODO(search): escape LIKE metacharacters once keyword search is meant to be literal.
    pub async fn vacancies_matching_keyword(
        &self,
        keyword: &str,
    ) -> Result<Vec<VacancyListing>, AppError> {
        sqlx::query_as::<_, VacancyListing>(KEYWORD_QUERY)
            .bind(format!("%{}%", keyword))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Checks database connectivity by executing a simple query.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;
        Ok(())
    }
}

// =============================================================================
// Trait Implementations: VacancyStore and VacancyQueries
// =============================================================================

impl VacancyStore for VacancyRepository {
    async fn initialize_schema(&self) -> Result<(), AppError> {
        VacancyRepository::initialize_schema(self).await
    }

    async fn insert_batch(&self, records: &[VacancyRecord]) -> Result<InsertSummary, AppError> {
        VacancyRepository::insert_batch(self, records).await
    }
}

impl VacancyQueries for VacancyRepository {
    async fn all_vacancies(&self) -> Result<Vec<VacancyListing>, AppError> {
        VacancyRepository::all_vacancies(self).await
    }

    async fn vacancies_matching_keyword(
        &self,
        keyword: &str,
    ) -> Result<Vec<VacancyListing>, AppError> {
        VacancyRepository::vacancies_matching_keyword(self, keyword).await
    }

    async fn companies_with_vacancy_counts(&self) -> Result<Vec<CompanyVacancyCount>, AppError> {
        VacancyRepository::companies_with_vacancy_counts(self).await
    }

    async fn average_salary(&self) -> Result<Option<f64>, AppError> {
        VacancyRepository::average_salary(self).await
    }

    async fn vacancies_above_average_salary(&self) -> Result<Vec<VacancyListing>, AppError> {
        VacancyRepository::vacancies_above_average_salary(self).await
    }
}
