//! Core data models for the harvest analytics engine.
//!
//! This module contains all the domain models used throughout the engine.

mod aggregate;
mod query_state;
mod worker;

pub use aggregate::RangeAggregate;
pub use query_state::{GroupFilter, PageSize, QueryState, SortDirection, SortKey};
pub use worker::WorkerRecord;
