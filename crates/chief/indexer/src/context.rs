use chief_storage::{EntityStore, StagedStore};
use chief_types::{ActionKind, Entity, EventMeta, GovernanceInfo};

use crate::actions;
use crate::aggregate;
use crate::config::IndexerConfig;
use crate::error::{HandlerResult, IndexerResult};
use crate::ledger::GovernanceLedger;
use crate::tracking::TrackingRequest;

/// Everything one handler invocation may read or write.
///
/// Writes are staged; dropping the context without [`EventContext::commit`]
/// leaves the store untouched.
pub struct EventContext<'a> {
    store: StagedStore<'a>,
    ledger: &'a dyn GovernanceLedger,
    config: &'a IndexerConfig,
    meta: &'a EventMeta,
    /// The aggregate, loaded once per event.
    pub info: GovernanceInfo,
    tracks: Vec<TrackingRequest>,
    deposit_drift: bool,
}

/// What a committed event wrote and asked for.
#[derive(Debug, Default)]
pub struct Committed {
    pub writes: usize,
    pub tracks: Vec<TrackingRequest>,
    pub deposit_drift: bool,
}

impl<'a> EventContext<'a> {
    pub fn open(
        store: &'a dyn EntityStore,
        ledger: &'a dyn GovernanceLedger,
        config: &'a IndexerConfig,
        meta: &'a EventMeta,
    ) -> IndexerResult<Self> {
        let store = StagedStore::new(store);
        let info = aggregate::load(&store)?;
        Ok(Self {
            store,
            ledger,
            config,
            meta,
            info,
            tracks: Vec::new(),
            deposit_drift: false,
        })
    }

    pub fn ledger(&self) -> &'a dyn GovernanceLedger {
        self.ledger
    }

    pub fn config(&self) -> &'a IndexerConfig {
        self.config
    }

    pub fn meta(&self) -> &'a EventMeta {
        self.meta
    }

    pub fn load<E: Entity>(&self, id: &str) -> HandlerResult<Option<E>> {
        Ok(self.store.load::<E>(id)?)
    }

    pub fn contains<E: Entity>(&self, id: &str) -> HandlerResult<bool> {
        Ok(self.store.contains::<E>(id)?)
    }

    pub fn save<E: Entity>(&mut self, entity: &E) -> HandlerResult {
        Ok(self.store.save(entity)?)
    }

    /// Append the audit record of `kind` for the current event.
    pub fn record(&mut self, kind: ActionKind) -> HandlerResult {
        let action = actions::build(self.meta, kind);
        Ok(self.store.create(&action)?)
    }

    /// Queue a tracking request. The indexer issues queued requests before committing.
    pub fn track(&mut self, request: TrackingRequest) {
        self.tracks.push(request);
    }

    pub fn pending_tracks(&self) -> &[TrackingRequest] {
        &self.tracks
    }

    pub fn flag_deposit_drift(&mut self) {
        self.deposit_drift = true;
    }

    /// Write the aggregate and every staged record as one batch.
    pub fn commit(self) -> IndexerResult<Committed> {
        let Self {
            mut store,
            meta,
            mut info,
            tracks,
            deposit_drift,
            ..
        } = self;
        aggregate::touch(&mut info, meta);
        store.save(&info)?;
        let writes = store.commit()?;
        Ok(Committed {
            writes,
            tracks,
            deposit_drift,
        })
    }
}
