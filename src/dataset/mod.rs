//! The initial dataset load boundary.
//!
//! The dataset is fetched once per session from an external source; this
//! module owns payload validation and the supersession guard that keeps a
//! stale in-flight load from overwriting a newer one.

mod loader;

pub use loader::{DatasetLoader, LoadTicket, ensure_success_status, parse_dataset};
