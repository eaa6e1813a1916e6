#![allow(dead_code)]

use std::sync::Arc;

use chief_indexer::{
    Disposition, FixtureLedger, GovernanceIndexer, IndexerConfig, RecordingTracker,
};
use chief_storage::{EntityStoreExt, InMemoryEntityStore};
use chief_types::{
    Address, Entity, EventMeta, EventPayload, GovernanceEvent, GovernanceInfo, SlateId, TxHash,
    Wad, Word,
};
use chrono::{DateTime, TimeZone, Utc};

pub const GENESIS: i64 = 1_600_000_000;

pub fn addr(byte: u8) -> Address {
    Address([byte; 20])
}

pub fn slate_id(n: u128) -> SlateId {
    SlateId(Word::from_u128(n))
}

pub fn units(n: i64) -> Wad {
    Wad::from_units(n)
}

pub fn wad_word(n: i64) -> Word {
    Wad::from_units(n).to_word().unwrap()
}

pub fn block_time(block: u64) -> DateTime<Utc> {
    Utc.timestamp_opt(GENESIS + block as i64 * 15, 0).unwrap()
}

/// An indexer over an in-memory store that numbers events one block apart.
pub struct Harness {
    pub indexer: GovernanceIndexer,
    pub store: Arc<InMemoryEntityStore>,
    pub tracker: Arc<RecordingTracker>,
    pub config: IndexerConfig,
    pub block: u64,
    pub sender: Address,
}

impl Harness {
    pub fn new(ledger: FixtureLedger) -> Self {
        Self::with_config(ledger, IndexerConfig::default())
    }

    pub fn with_config(ledger: FixtureLedger, config: IndexerConfig) -> Self {
        let store = Arc::new(InMemoryEntityStore::new());
        let tracker = Arc::new(RecordingTracker::new());
        let indexer = GovernanceIndexer::new(
            config.clone(),
            store.clone(),
            Arc::new(ledger),
            tracker.clone(),
        );
        Self {
            indexer,
            store,
            tracker,
            config,
            block: 100,
            sender: addr(0xee),
        }
    }

    pub fn next_meta(&mut self, emitter: Address) -> EventMeta {
        self.block += 1;
        EventMeta {
            transaction_hash: TxHash(Word::from_u128(u128::from(self.block))),
            log_index: 0,
            block_number: self.block,
            timestamp: block_time(self.block),
            address: emitter,
            from: self.sender,
        }
    }

    pub fn event(&mut self, emitter: Address, payload: EventPayload) -> GovernanceEvent {
        GovernanceEvent {
            meta: self.next_meta(emitter),
            payload,
        }
    }

    pub fn apply(&mut self, emitter: Address, payload: EventPayload) -> Disposition {
        let event = self.event(emitter, payload);
        self.indexer.process(&event).unwrap()
    }

    pub fn chief(&mut self, payload: EventPayload) -> Disposition {
        let chief = self.config.chief;
        self.apply(chief, payload)
    }

    pub fn lock(&mut self, guy: Address, amount: i64) -> Disposition {
        self.chief(EventPayload::Lock {
            guy,
            foo: wad_word(amount),
        })
    }

    pub fn free(&mut self, guy: Address, amount: i64) -> Disposition {
        self.chief(EventPayload::Free {
            guy,
            foo: wad_word(amount),
        })
    }

    pub fn vote(&mut self, guy: Address, slate: SlateId) -> Disposition {
        self.chief(EventPayload::Vote { guy, foo: slate.0 })
    }

    pub fn load<E: Entity>(&self, id: &str) -> Option<E> {
        self.store.load::<E>(id).unwrap()
    }

    pub fn info(&self) -> GovernanceInfo {
        self.indexer.governance_info().unwrap()
    }
}
