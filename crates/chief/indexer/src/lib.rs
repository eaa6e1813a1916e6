//! Chief Indexer - materializes governance events into entities.
//!
//! Events from the chief, the vote proxy factory, tracked spells, the polling
//! emitter and the governance token are applied one at a time by
//! [`GovernanceIndexer::process`]. Each event either commits all of its writes
//! in one batch or, on a recoverable condition, writes nothing.
//!
//! The core pieces:
//! - [`voters`]: proxy-first voter resolution and implicit registration on lock
//! - [`slates`]: member enumeration until the chief reverts
//! - [`classify`]: the paused/direct/parameter spell probe cascade
//! - [`delta`]: approval weight moved by votes, locks and frees

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod actions;
pub mod aggregate;
pub mod classify;
pub mod config;
pub mod context;
pub mod delta;
pub mod error;
pub mod handlers;
pub mod indexer;
pub mod ledger;
pub mod slates;
pub mod tracking;
pub mod voters;

pub use classify::{classify, Classification};
pub use config::IndexerConfig;
pub use context::{Committed, EventContext};
pub use delta::SlateDelta;
pub use error::{HandlerError, HandlerResult, IndexerError, IndexerResult, SkipReason};
pub use indexer::{Disposition, GovernanceIndexer, IndexerStats};
pub use ledger::{CallResult, FixtureLedger, GovernanceLedger, Revert, SpellProbe};
pub use slates::resolve_slate;
pub use tracking::{ContractTracker, RecordingTracker, TrackerError, TrackingRequest};
pub use voters::Voter;
