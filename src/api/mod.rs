//! HTTP read surface for the harvest analytics engine.
//!
//! A library-style axum router over one loaded dataset. Every endpoint is a
//! pure read: URL parameters decode into a query state, the pipeline runs,
//! and the derived view is returned as JSON.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{
    ApiError, SuggestionRow, SummaryResponse, TopRow, WorkerRow, WorkersResponse,
};
pub use state::AppState;
