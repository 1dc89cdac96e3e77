//! Query and analytics engine for harvest weighing records.
//!
//! This crate turns raw per-worker, per-day weighing records into a filtered,
//! ranked, paginated result set, with derived anomaly flags, autocomplete
//! ranking, a shareable URL state codec, and an anonymized export projection.

#![warn(missing_docs)]

pub mod analytics;
pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod session;
