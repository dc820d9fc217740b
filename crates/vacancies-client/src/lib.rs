//! Vacancies Client - HTTP client for the vacancy listing API
//!
//! - [`hh`] - HeadHunter (`api.hh.ru`) vacancy listings
//!
//! The client fetches the first page of vacancies per employer, one request
//! at a time, and converts raw items into [`vacancies_core::VacancyRecord`]s.

pub mod hh;

pub use hh::HhClient;
