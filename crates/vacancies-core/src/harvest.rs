//! Harvest service: the one-shot fetch-and-insert batch run at startup.
//!
//! [`HarvestService`] is generic over a [`VacancySource`] and a
//! [`VacancyStore`]. Employers are fetched with [`VacancySource::fetch_all`],
//! strictly one after another, and the result is inserted as a single batch.
//! Any failure aborts the run; nothing is retried.

use crate::progress::{HarvestEvent, ProgressReporter, SilentReporter};
use crate::traits::{VacancySource, VacancyStore};
use crate::{AppError, HarvestStats};

/// Service for harvesting vacancies into the store.
///
/// # Example
///
/// ```ignore
/// use vacancies_core::HarvestService;
///
/// let harvest = HarvestService::new(hh_client, repository);
/// let stats = harvest.run(&["1740".to_string()]).await?;
/// println!("{} vacancies stored", stats.vacancies_inserted);
/// ```
pub struct HarvestService<S, St>
where
    S: VacancySource,
    St: VacancyStore,
{
    source: S,
    store: St,
}

impl<S, St> HarvestService<S, St>
where
    S: VacancySource,
    St: VacancyStore,
{
    pub fn new(source: S, store: St) -> Self {
        Self { source, store }
    }

    /// Returns the underlying store, e.g. to run read queries after the harvest.
    pub fn store(&self) -> &St {
        &self.store
    }

    /// Consumes the service and returns the store.
    pub fn into_store(self) -> St {
        self.store
    }

    /// Creates the schema, fetches all employers and inserts the batch.
    pub async fn run(&self, employer_ids: &[String]) -> Result<HarvestStats, AppError> {
        self.run_with_progress(employer_ids, &SilentReporter).await
    }

    /// Like [`run`](Self::run), reporting progress to `reporter`.
    pub async fn run_with_progress<R: ProgressReporter>(
        &self,
        employer_ids: &[String],
        reporter: &R,
    ) -> Result<HarvestStats, AppError> {
        self.store.initialize_schema().await?;

        reporter.report(HarvestEvent::Started {
            employers: employer_ids.len(),
        });

        let records = self.source.fetch_all(employer_ids, reporter).await?;

        let summary = self.store.insert_batch(&records).await?;
        reporter.report(HarvestEvent::BatchInserted { summary: &summary });

        let stats = HarvestStats {
            employers: employer_ids.len(),
            fetched: records.len(),
            ..Default::default()
        }
        .with_insert(summary);

        reporter.report(HarvestEvent::Completed { stats: &stats });

        Ok(stats)
    }
}
