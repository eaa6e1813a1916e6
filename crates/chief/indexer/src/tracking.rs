//! Dynamic contract tracking.
//!
//! When the classification cascade recognizes a spell, the indexer asks the
//! tracker to start delivering that contract's cast events. Requests are
//! issued before the discovering event is committed: a rejected request
//! aborts the event, which is then applied again on redelivery.

use std::sync::Mutex;

use chief_types::{Address, SpellKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// "Begin tracking contract `address` as variant `kind`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRequest {
    pub address: Address,
    pub kind: SpellKind,
}

#[derive(Debug, Error)]
#[error("tracker rejected {address}: {detail}")]
pub struct TrackerError {
    pub address: Address,
    pub detail: String,
}

/// Receives tracking requests. A request may repeat when its event is retried.
pub trait ContractTracker: Send + Sync {
    fn track(&self, request: TrackingRequest) -> Result<(), TrackerError>;
}

/// Tracker that keeps every request in memory, in issue order.
#[derive(Default)]
pub struct RecordingTracker {
    requests: Mutex<Vec<TrackingRequest>>,
}

impl RecordingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<TrackingRequest> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ContractTracker for RecordingTracker {
    fn track(&self, request: TrackingRequest) -> Result<(), TrackerError> {
        let mut guard = self.requests.lock().map_err(|_| TrackerError {
            address: request.address,
            detail: "request log lock poisoned".to_string(),
        })?;
        guard.push(request);
        Ok(())
    }
}
