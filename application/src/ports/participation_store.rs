//! Participation store port
//!
//! Persists the participation ledger across sessions. Read before
//! selection, written after a session completes. Callers running sessions
//! concurrently against one store must serialize them; the core gives no
//! cross-session ordering guarantee.

use async_trait::async_trait;
use council_domain::ParticipationLedger;
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur while loading or saving the ledger
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Corrupt participation data: {0}")]
    Corrupt(String),
}

/// Load/save abstraction over the participation ledger
///
/// Injected into selection instead of ambient file paths, so selection
/// stays testable as a pure function over an explicit state snapshot.
#[async_trait]
pub trait ParticipationStore: Send + Sync {
    async fn load(&self) -> Result<ParticipationLedger, StoreError>;
    async fn save(&self, ledger: &ParticipationLedger) -> Result<(), StoreError>;
}

/// In-memory store for tests and dry runs
#[derive(Default)]
pub struct MemoryParticipationStore {
    ledger: Mutex<ParticipationLedger>,
}

impl MemoryParticipationStore {
    pub fn new(ledger: ParticipationLedger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }
}

#[async_trait]
impl ParticipationStore for MemoryParticipationStore {
    async fn load(&self) -> Result<ParticipationLedger, StoreError> {
        Ok(self.ledger.lock().unwrap().clone())
    }

    async fn save(&self, ledger: &ParticipationLedger) -> Result<(), StoreError> {
        *self.ledger.lock().unwrap() = ledger.clone();
        Ok(())
    }
}
