//! Vacancies CLI - command line configuration and the interactive query menu.
//!
//! The `vacancies` binary harvests the configured employers once at startup
//! and then serves the read queries from [`menu::run_menu`].

pub mod config;
pub mod error;
pub mod menu;

pub use config::{Config, version_info};
pub use error::UserContext;
pub use menu::{InvalidChoice, MenuChoice, run_menu};
