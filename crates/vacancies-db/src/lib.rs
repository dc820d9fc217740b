//! Vacancies DB - PostgreSQL repository layer
//!
//! This crate persists harvested vacancies into two tables, `companies` and
//! `vacancies`, and serves the read queries shown by the CLI menu.
//!
//! # Overview
//!
//! - [`VacancyRepository`] - schema creation, batch insert and read queries

mod repository;

pub use repository::VacancyRepository;
