//! Trait definitions for external dependencies.
//!
//! The harvest pipeline talks to the listing API and to the database only
//! through these traits, so it can be exercised with in-memory mocks.

use std::future::Future;

use crate::progress::{HarvestEvent, ProgressReporter};
use crate::{AppError, CompanyVacancyCount, InsertSummary, VacancyListing, VacancyRecord};

/// Source of vacancy records, e.g. the hh.ru listing API.
pub trait VacancySource: Send + Sync {
    /// Fetches the first page of vacancies published by one employer.
    ///
    /// # Arguments
    ///
    /// * `employer_id` - Employer identifier understood by the source
    fn fetch_employer(
        &self,
        employer_id: &str,
    ) -> impl Future<Output = Result<Vec<VacancyRecord>, AppError>> + Send;

    /// Fetches every employer one after another and concatenates the records
    /// in employer order.
    ///
    /// The first failing employer aborts the whole fetch. Each successful
    /// employer is reported as [`HarvestEvent::EmployerFetched`].
    fn fetch_all<R: ProgressReporter>(
        &self,
        employer_ids: &[String],
        reporter: &R,
    ) -> impl Future<Output = Result<Vec<VacancyRecord>, AppError>> + Send {
        async move {
            let total = employer_ids.len();
            let mut all_records = Vec::new();

            for (index, employer_id) in employer_ids.iter().enumerate() {
                let records = self.fetch_employer(employer_id).await?;
                reporter.report(HarvestEvent::EmployerFetched {
                    employer_id,
                    index,
                    total,
                    count: records.len(),
                });
                all_records.extend(records);
            }

            Ok(all_records)
        }
    }
}

/// Store for harvested companies and vacancies.
pub trait VacancyStore: Send + Sync {
    /// Ensures the `companies` and `vacancies` tables exist.
    fn initialize_schema(&self) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Inserts one batch of records, deduplicating companies by name within the batch.
    ///
    /// The batch is committed as a whole or not at all.
    fn insert_batch(
        &self,
        records: &[VacancyRecord],
    ) -> impl Future<Output = Result<InsertSummary, AppError>> + Send;
}

/// Read queries offered by the interactive menu.
pub trait VacancyQueries: Send + Sync {
    /// Every vacancy with its company name.
    fn all_vacancies(&self) -> impl Future<Output = Result<Vec<VacancyListing>, AppError>> + Send;

    /// Vacancies whose name contains `keyword`, case-insensitively.
    fn vacancies_matching_keyword(
        &self,
        keyword: &str,
    ) -> impl Future<Output = Result<Vec<VacancyListing>, AppError>> + Send;

    /// Vacancy count per company name.
    fn companies_with_vacancy_counts(
        &self,
    ) -> impl Future<Output = Result<Vec<CompanyVacancyCount>, AppError>> + Send;

    /// Average of non-null salaries.
    fn average_salary(&self) -> impl Future<Output = Result<Option<f64>, AppError>> + Send;

    /// Vacancies paid strictly above the average salary.
    fn vacancies_above_average_salary(
        &self,
    ) -> impl Future<Output = Result<Vec<VacancyListing>, AppError>> + Send;
}
