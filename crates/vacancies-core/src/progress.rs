//! Progress reporting for the harvest pipeline.
//!
//! [`HarvestService`](crate::HarvestService) emits [`HarvestEvent`]s instead of
//! logging directly, so the CLI can route them to `tracing` while tests stay quiet.

use tracing::info;

use crate::{HarvestStats, InsertSummary};

/// Events emitted while a harvest runs.
#[derive(Debug, Clone)]
pub enum HarvestEvent<'a> {
    /// The run started for the given number of employers.
    Started { employers: usize },
    /// One employer's vacancies were fetched.
    EmployerFetched {
        employer_id: &'a str,
        index: usize,
        total: usize,
        count: usize,
    },
    /// The whole batch was committed.
    BatchInserted { summary: &'a InsertSummary },
    /// The run finished.
    Completed { stats: &'a HarvestStats },
}

/// Receiver for harvest progress events.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: HarvestEvent<'_>);
}

/// Reporter that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&self, _event: HarvestEvent<'_>) {}
}

/// Reporter that logs events through `tracing` at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn report(&self, event: HarvestEvent<'_>) {
        match event {
            HarvestEvent::Started { employers } => {
                info!("Fetching vacancies for {} employers", employers);
            }
            HarvestEvent::EmployerFetched {
                employer_id,
                index,
                total,
                count,
            } => {
                info!(
                    "[{}/{}] employer {}: {} vacancies",
                    index + 1,
                    total,
                    employer_id,
                    count
                );
            }
            HarvestEvent::BatchInserted { summary } => {
                info!(
                    "Inserted {} vacancies for {} new companies",
                    summary.vacancies_inserted, summary.companies_created
                );
            }
            HarvestEvent::Completed { stats } => {
                info!(
                    "Harvest complete: {} employers, {} fetched, {} stored",
                    stats.employers, stats.fetched, stats.vacancies_inserted
                );
            }
        }
    }
}
