//! Chief entity storage.
//!
//! This crate defines the storage contract of the governance indexer:
//! - a key-value [`EntityStore`] keyed by (entity kind, id) with all-or-nothing batches
//! - typed load/save helpers through [`EntityStoreExt`]
//! - a [`StagedStore`] overlay that buffers one event's writes until commit
//! - an in-memory reference adapter
//!
//! Backends persist entities as JSON documents; the indexer never sees the
//! document form.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod error;
pub mod memory;
pub mod staging;
mod traits;

pub use error::{StorageError, StorageResult};
pub use memory::InMemoryEntityStore;
pub use staging::StagedStore;
pub use traits::{EntityStore, EntityStoreExt, QueryWindow, StoredEntity, WriteBatch, WriteOp};
