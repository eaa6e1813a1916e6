use std::collections::BTreeMap;
use std::sync::Arc;

use chief_storage::EntityStore;
use chief_types::{GovernanceEvent, GovernanceInfo};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::aggregate;
use crate::config::IndexerConfig;
use crate::context::EventContext;
use crate::error::{HandlerError, IndexerError, IndexerResult, SkipReason};
use crate::handlers;
use crate::ledger::GovernanceLedger;
use crate::tracking::ContractTracker;

/// What happened to one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Applied,
    /// Recoverable condition; nothing was written.
    Skipped(SkipReason),
    /// At or before the stored cursor; nothing was written.
    Replayed,
}

/// Running counters of a processing session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerStats {
    pub applied: u64,
    pub skipped: u64,
    pub replayed: u64,
    pub writes: u64,
    pub tracked: u64,
    pub tracking_failures: u64,
    pub deposit_drift: u64,
    pub skips_by_reason: BTreeMap<String, u64>,
}

/// Applies governance events, one at a time and in order, to an entity store.
pub struct GovernanceIndexer {
    config: IndexerConfig,
    store: Arc<dyn EntityStore>,
    ledger: Arc<dyn GovernanceLedger>,
    tracker: Arc<dyn ContractTracker>,
    stats: IndexerStats,
}

impl GovernanceIndexer {
    pub fn new(
        config: IndexerConfig,
        store: Arc<dyn EntityStore>,
        ledger: Arc<dyn GovernanceLedger>,
        tracker: Arc<dyn ContractTracker>,
    ) -> Self {
        Self {
            config,
            store,
            ledger,
            tracker,
            stats: IndexerStats::default(),
        }
    }

    pub fn config(&self) -> &IndexerConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    pub fn stats(&self) -> &IndexerStats {
        &self.stats
    }

    /// The committed aggregate.
    pub fn governance_info(&self) -> IndexerResult<GovernanceInfo> {
        Ok(aggregate::current(self.store.as_ref())?)
    }

    /// Apply one event. Only storage and tracking failures are errors.
    pub fn process(&mut self, event: &GovernanceEvent) -> IndexerResult<Disposition> {
        let meta = &event.meta;
        let cursor = meta.cursor();

        if self.config.replay_guard {
            let applied = aggregate::current(self.store.as_ref())?.cursor;
            if applied.is_some_and(|applied| cursor <= applied) {
                debug!(tx = %meta.transaction_hash, log_index = meta.log_index, "already applied");
                self.stats.replayed += 1;
                return Ok(Disposition::Replayed);
            }
        }

        let mut ctx = EventContext::open(
            self.store.as_ref(),
            self.ledger.as_ref(),
            &self.config,
            meta,
        )?;

        match handlers::dispatch(&mut ctx, &event.payload) {
            Ok(()) => {}
            Err(HandlerError::Skip(reason)) => {
                warn!(
                    event = event.payload.name(),
                    tx = %meta.transaction_hash,
                    log_index = meta.log_index,
                    block = meta.block_number,
                    %reason,
                    "event skipped"
                );
                self.stats.skipped += 1;
                *self
                    .stats
                    .skips_by_reason
                    .entry(reason.label().to_string())
                    .or_default() += 1;
                return Ok(Disposition::Skipped(reason));
            }
            Err(HandlerError::Fatal(err)) => return Err(err),
        }

        // A spell is discovered once, so its tracking must land before the batch does.
        for request in ctx.pending_tracks() {
            if let Err(err) = self.tracker.track(*request) {
                warn!(
                    contract = %request.address,
                    kind = %request.kind,
                    tx = %meta.transaction_hash,
                    log_index = meta.log_index,
                    %err,
                    "tracking rejected, event not applied"
                );
                self.stats.tracking_failures += 1;
                return Err(IndexerError::Tracking(err.to_string()));
            }
            debug!(contract = %request.address, kind = %request.kind, "tracking requested");
        }

        let committed = ctx.commit()?;
        self.stats.applied += 1;
        self.stats.writes += committed.writes as u64;
        self.stats.tracked += committed.tracks.len() as u64;
        if committed.deposit_drift {
            self.stats.deposit_drift += 1;
        }

        debug!(
            event = event.payload.name(),
            block = meta.block_number,
            log_index = meta.log_index,
            writes = committed.writes,
            "event applied"
        );
        Ok(Disposition::Applied)
    }

    /// Apply events in order, stopping at the first fatal error.
    pub fn process_all<'e, I>(&mut self, events: I) -> IndexerResult<()>
    where
        I: IntoIterator<Item = &'e GovernanceEvent>,
    {
        for event in events {
            self.process(event)?;
        }
        Ok(())
    }
}
