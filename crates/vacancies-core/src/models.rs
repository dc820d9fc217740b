//! Domain models for companies and vacancies.

use serde::{Deserialize, Serialize};

/// A company row as stored in the `companies` table.
///
/// Names are not unique at the store level: each startup batch deduplicates
/// only against the names it has seen itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub id: i32,
    pub name: String,
}

/// A vacancy row as stored in the `vacancies` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vacancy {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    /// Lower bound of the advertised salary, if any.
    pub salary: Option<i32>,
    pub link: String,
}

/// A fetched vacancy, normalized from the listing API and ready to insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyRecord {
    pub employer_name: String,
    pub name: String,
    pub salary: Option<i32>,
    pub link: String,
}

/// A vacancy joined with the name of its company.
///
/// Returned by every listing query of the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VacancyListing {
    pub company_name: String,
    pub vacancy_name: String,
    pub salary: Option<i32>,
    pub link: String,
}

/// Number of vacancies per company name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CompanyVacancyCount {
    pub name: String,
    pub vacancies_count: i64,
}

/// Outcome of a single insert batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertSummary {
    pub companies_created: usize,
    pub vacancies_inserted: usize,
}

/// Statistics for one fetch-and-insert run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestStats {
    /// Number of employer ids queried.
    pub employers: usize,
    /// Number of records returned by the listing API.
    pub fetched: usize,
    pub companies_created: usize,
    pub vacancies_inserted: usize,
}

impl HarvestStats {
    /// Folds an insert summary into the run statistics.
    pub fn with_insert(mut self, summary: InsertSummary) -> Self {
        self.companies_created = summary.companies_created;
        self.vacancies_inserted = summary.vacancies_inserted;
        self
    }
}
