//! Dataset payload parsing and load supersession.
//!
//! Loading is the one asynchronous boundary of the engine. Each attempt
//! holds a generation ticket; committing with a stale ticket is refused, so
//! a load that was superseded mid-flight (by a newer load or by teardown)
//! can never overwrite the store. A failed attempt is terminal: the error is
//! surfaced and nothing is retried.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::models::WorkerRecord;

/// Maps a fetch status code to an error unless it is a success code.
pub fn ensure_success_status(status: u16) -> EngineResult<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(EngineError::LoadStatus { status })
    }
}

/// Parses a dataset payload.
///
/// The payload must be a JSON array of worker records. Malformed dates and
/// quantities inside a record are tolerated (the record deserializer coerces
/// them); a payload that is not valid JSON, not an array, or whose records
/// are missing their identifying fields fails the whole load.
pub fn parse_dataset(payload: &str) -> EngineResult<Vec<WorkerRecord>> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| EngineError::LoadPayload {
            message: e.to_string(),
        })?;

    if !value.is_array() {
        return Err(EngineError::LoadPayload {
            message: "payload is not an array".to_string(),
        });
    }

    serde_json::from_value(value).map_err(|e| EngineError::LoadPayload {
        message: e.to_string(),
    })
}

/// A generation ticket for one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// Issues load generations and refuses stale commits.
#[derive(Debug, Default)]
pub struct DatasetLoader {
    generation: AtomicU64,
}

impl DatasetLoader {
    /// Creates a loader with no outstanding attempt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new load attempt, superseding any attempt still in flight.
    pub fn begin(&self) -> LoadTicket {
        LoadTicket {
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Supersedes every outstanding attempt without starting a new one.
    /// Used at teardown.
    pub fn supersede(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// True while the ticket belongs to the latest attempt.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Commits a finished attempt. Returns the records when the ticket is
    /// still current, `None` when the attempt was superseded.
    pub fn commit(
        &self,
        ticket: LoadTicket,
        workers: Vec<WorkerRecord>,
    ) -> Option<Vec<WorkerRecord>> {
        self.is_current(ticket).then_some(workers)
    }

    /// Runs one complete load attempt against an asynchronous source.
    ///
    /// The fetch future resolves to the raw payload text (or a load error,
    /// e.g. from [`ensure_success_status`]). Errors are surfaced; a
    /// superseded attempt resolves to `Ok(None)` and its data is dropped.
    pub async fn load_with<Fut>(&self, fetch: Fut) -> EngineResult<Option<Vec<WorkerRecord>>>
    where
        Fut: Future<Output = EngineResult<String>>,
    {
        let ticket = self.begin();
        let payload = fetch.await?;
        let workers = parse_dataset(&payload)?;
        Ok(self.commit(ticket, workers))
    }
}
