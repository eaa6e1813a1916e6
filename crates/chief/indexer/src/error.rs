use chief_storage::StorageError;
use chief_types::{Address, ConversionError, PollId, SlateId, Wad};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type IndexerResult<T> = Result<T, IndexerError>;

/// Failures that stop the pipeline.
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("tracking error: {0}")]
    Tracking(String),
}

/// Recoverable conditions: the event is dropped and nothing it touched is written.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("no vote proxy nor address voter {voter}")]
    UnknownVoter { voter: Address },

    #[error("slate {slate} not found")]
    UnknownSlate { slate: SlateId },

    #[error("spell {spell} not found")]
    UnknownSpell { spell: Address },

    #[error("poll {poll_id} not found")]
    UnknownPoll { poll_id: PollId },

    #[error("poll {poll_id} already exists")]
    DuplicatePoll { poll_id: PollId },

    #[error("vote proxy {proxy} already linked")]
    DuplicateProxy { proxy: Address },

    #[error("vote from {voter} arrived after poll {poll_id} ended")]
    LatePollVote { poll_id: PollId, voter: Address },

    #[error("free of {wad} by {voter} exceeds its locked {locked}")]
    FreeExceedsLocked { voter: Address, locked: Wad, wad: Wad },

    #[error("ledger read {call} reverted: {detail}")]
    LedgerRead { call: String, detail: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl SkipReason {
    /// Stable label used as a statistics key.
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::UnknownVoter { .. } => "unknown_voter",
            SkipReason::UnknownSlate { .. } => "unknown_slate",
            SkipReason::UnknownSpell { .. } => "unknown_spell",
            SkipReason::UnknownPoll { .. } => "unknown_poll",
            SkipReason::DuplicatePoll { .. } => "duplicate_poll",
            SkipReason::DuplicateProxy { .. } => "duplicate_proxy",
            SkipReason::LatePollVote { .. } => "late_poll_vote",
            SkipReason::FreeExceedsLocked { .. } => "free_exceeds_locked",
            SkipReason::LedgerRead { .. } => "ledger_read",
            SkipReason::MalformedPayload(_) => "malformed_payload",
        }
    }
}

/// Outcome of a handler that did not apply.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("skipped: {0}")]
    Skip(SkipReason),

    #[error(transparent)]
    Fatal(#[from] IndexerError),
}

pub type HandlerResult<T = ()> = Result<T, HandlerError>;

impl From<SkipReason> for HandlerError {
    fn from(reason: SkipReason) -> Self {
        Self::Skip(reason)
    }
}

impl From<StorageError> for HandlerError {
    fn from(err: StorageError) -> Self {
        Self::Fatal(IndexerError::Storage(err))
    }
}

impl From<ConversionError> for HandlerError {
    fn from(err: ConversionError) -> Self {
        Self::Skip(SkipReason::MalformedPayload(err.to_string()))
    }
}
