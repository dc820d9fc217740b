//! Mock implementations of the core traits.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use vacancies_core::progress::{HarvestEvent, ProgressReporter};
use vacancies_core::traits::{VacancySource, VacancyStore};
use vacancies_core::{AppError, InsertSummary, VacancyRecord};

/// Builds a record with a deterministic link.
pub fn record(employer: &str, name: &str, salary: Option<i32>) -> VacancyRecord {
    VacancyRecord {
        employer_name: employer.to_string(),
        name: name.to_string(),
        salary,
        link: format!("https://hh.example/vacancy/{}", name.replace(' ', "-")),
    }
}

// =============================================================================
// MockVacancySource
// =============================================================================

/// Source returning canned records per employer id.
///
/// Unknown employer ids return an empty page. An id registered with
/// [`MockVacancySource::failing_on`] returns a network error.
#[derive(Clone, Default)]
pub struct MockVacancySource {
    pages: HashMap<String, Vec<VacancyRecord>>,
    failing: Option<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockVacancySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, employer_id: &str, records: Vec<VacancyRecord>) -> Self {
        self.pages.insert(employer_id.to_string(), records);
        self
    }

    pub fn failing_on(mut self, employer_id: &str) -> Self {
        self.failing = Some(employer_id.to_string());
        self
    }

    /// Employer ids requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl VacancySource for MockVacancySource {
    async fn fetch_employer(&self, employer_id: &str) -> Result<Vec<VacancyRecord>, AppError> {
        self.calls.lock().unwrap().push(employer_id.to_string());
        if self.failing.as_deref() == Some(employer_id) {
            return Err(AppError::NetworkError(format!(
                "Connection failed for employer {}",
                employer_id
            )));
        }
        Ok(self.pages.get(employer_id).cloned().unwrap_or_default())
    }
}

// =============================================================================
// MockVacancyStore
// =============================================================================

/// In-memory store that records every committed batch.
#[derive(Clone, Default)]
pub struct MockVacancyStore {
    schema_initialized: Arc<Mutex<usize>>,
    batches: Arc<Mutex<Vec<Vec<VacancyRecord>>>>,
}

impl MockVacancyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema_initializations(&self) -> usize {
        *self.schema_initialized.lock().unwrap()
    }

    pub fn batches(&self) -> Vec<Vec<VacancyRecord>> {
        self.batches.lock().unwrap().clone()
    }
}

impl VacancyStore for MockVacancyStore {
    async fn initialize_schema(&self) -> Result<(), AppError> {
        *self.schema_initialized.lock().unwrap() += 1;
        Ok(())
    }

    async fn insert_batch(&self, records: &[VacancyRecord]) -> Result<InsertSummary, AppError> {
        let companies: HashSet<&str> = records.iter().map(|r| r.employer_name.as_str()).collect();
        self.batches.lock().unwrap().push(records.to_vec());
        Ok(InsertSummary {
            companies_created: companies.len(),
            vacancies_inserted: records.len(),
        })
    }
}

// =============================================================================
// RecordingReporter
// =============================================================================

/// Reporter that keeps a short textual trace of every event.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, event: HarvestEvent<'_>) {
        let line = match event {
            HarvestEvent::Started { employers } => format!("started:{}", employers),
            HarvestEvent::EmployerFetched {
                employer_id, count, ..
            } => format!("fetched:{}:{}", employer_id, count),
            HarvestEvent::BatchInserted { summary } => {
                format!("inserted:{}", summary.vacancies_inserted)
            }
            HarvestEvent::Completed { stats } => format!("completed:{}", stats.fetched),
        };
        self.events.lock().unwrap().push(line);
    }
}
