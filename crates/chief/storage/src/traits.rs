use chief_types::{Entity, EntityKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{StorageError, StorageResult};

/// Generic query window for paged reads. A zero limit means unbounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryWindow {
    pub limit: usize,
    pub offset: usize,
}

impl QueryWindow {
    pub fn all() -> Self {
        Self::default()
    }
}

/// An entity document as persisted by a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEntity {
    pub kind: EntityKind,
    pub id: String,
    pub data: Value,
}

impl StoredEntity {
    pub fn encode<E: Entity>(entity: &E) -> StorageResult<Self> {
        Ok(Self {
            kind: E::KIND,
            id: entity.entity_id(),
            data: serde_json::to_value(entity)?,
        })
    }

    pub fn decode<E: Entity>(&self) -> StorageResult<E> {
        if self.kind != E::KIND {
            return Err(StorageError::Serialization(format!(
                "expected {} record, found {} for id {}",
                E::KIND,
                self.kind,
                self.id
            )));
        }
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

/// A single write inside a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Insert or overwrite.
    Upsert(StoredEntity),
    /// Insert only; the batch fails with `Conflict` when the id already exists.
    Create(StoredEntity),
}

impl WriteOp {
    pub fn entity(&self) -> &StoredEntity {
        match self {
            WriteOp::Upsert(entity) | WriteOp::Create(entity) => entity,
        }
    }
}

/// Ordered writes applied all-or-nothing.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: WriteOp) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// Key-value entity store keyed by (kind, id).
pub trait EntityStore: Send + Sync {
    /// Get one record by id.
    fn get(&self, kind: EntityKind, id: &str) -> StorageResult<Option<StoredEntity>>;

    /// List records of one kind ordered by id.
    fn list(&self, kind: EntityKind, window: QueryWindow) -> StorageResult<Vec<StoredEntity>>;

    /// Number of records of one kind.
    fn count(&self, kind: EntityKind) -> StorageResult<usize>;

    /// Apply every write of the batch, or none of them.
    fn apply(&self, batch: WriteBatch) -> StorageResult<()>;
}

/// Typed access on top of any [`EntityStore`].
pub trait EntityStoreExt: EntityStore {
    fn load<E: Entity>(&self, id: &str) -> StorageResult<Option<E>> {
        self.get(E::KIND, id)?
            .map(|stored| stored.decode::<E>())
            .transpose()
    }

    fn load_all<E: Entity>(&self, window: QueryWindow) -> StorageResult<Vec<E>> {
        self.list(E::KIND, window)?
            .iter()
            .map(StoredEntity::decode::<E>)
            .collect()
    }

    /// Write one entity outside of any staging. Append-only kinds are created, not overwritten.
    fn save<E: Entity>(&self, entity: &E) -> StorageResult<()> {
        let stored = StoredEntity::encode(entity)?;
        let mut batch = WriteBatch::new();
        if E::KIND.is_append_only() {
            batch.push(WriteOp::Create(stored));
        } else {
            batch.push(WriteOp::Upsert(stored));
        }
        self.apply(batch)
    }
}

impl<T: EntityStore + ?Sized> EntityStoreExt for T {}
