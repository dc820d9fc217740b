//! Vacancies Core - Domain types, configuration and the harvest pipeline.
//!
//! This crate provides the core functionality shared by the client, database
//! and CLI crates:
//!
//! - **Domain models**: [`VacancyRecord`], [`VacancyListing`], [`CompanyVacancyCount`]
//! - **Configuration**: [`DbConfig`], [`HttpConfig`], [`EmployersConfig`]
//! - **Traits**: [`VacancySource`], [`VacancyStore`] and [`VacancyQueries`] for dependency injection
//! - **Services**: [`HarvestService`] for the one-shot fetch-and-insert batch
//! - **Progress reporting**: [`ProgressReporter`] for decoupled logging
//!
//! # Example
//!
//! ```ignore
//! use vacancies_core::{HarvestService, TracingReporter};
//!
//! let harvest = HarvestService::new(hh_client, repository);
//! let stats = harvest
//!     .run_with_progress(&employers.employer_ids(), &TracingReporter)
//!     .await?;
//! println!("Inserted {} vacancies", stats.vacancies_inserted);
//! ```

pub mod config;
pub mod error;
pub mod harvest;
pub mod models;
pub mod progress;
pub mod traits;

// Configuration
pub use config::{
    DbConfig, EmployerEntry, EmployersConfig, HttpConfig, default_config_path,
    load_employers_config,
};

// Error handling
pub use error::AppError;

// Domain models
pub use models::{
    Company, CompanyVacancyCount, HarvestStats, InsertSummary, Vacancy, VacancyListing,
    VacancyRecord,
};

// Progress reporting
pub use progress::{HarvestEvent, ProgressReporter, SilentReporter, TracingReporter};

// Traits for dependency injection
pub use traits::{VacancyQueries, VacancySource, VacancyStore};

// Services
pub use harvest::HarvestService;
