//! Per-event write staging.
//!
//! A [`StagedStore`] overlays pending writes on a base [`EntityStore`]. Reads
//! see staged writes first; nothing reaches the base store until the overlay
//! is turned into a [`WriteBatch`] and applied. Dropping the overlay discards
//! everything it staged.

use std::collections::HashMap;

use chief_types::{Entity, EntityKind};
use tracing::trace;

use crate::traits::{EntityStore, StoredEntity, WriteBatch, WriteOp};
use crate::{StorageError, StorageResult};

type Key = (EntityKind, String);

#[derive(Debug)]
struct Pending {
    entity: StoredEntity,
    created: bool,
}

pub struct StagedStore<'a> {
    base: &'a dyn EntityStore,
    pending: HashMap<Key, Pending>,
    order: Vec<Key>,
}

impl<'a> StagedStore<'a> {
    pub fn new(base: &'a dyn EntityStore) -> Self {
        Self {
            base,
            pending: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn load<E: Entity>(&self, id: &str) -> StorageResult<Option<E>> {
        let key = (E::KIND, id.to_string());
        if let Some(pending) = self.pending.get(&key) {
            return pending.entity.decode::<E>().map(Some);
        }
        self.base
            .get(E::KIND, id)?
            .map(|stored| stored.decode::<E>())
            .transpose()
    }

    pub fn contains<E: Entity>(&self, id: &str) -> StorageResult<bool> {
        if self.pending.contains_key(&(E::KIND, id.to_string())) {
            return Ok(true);
        }
        Ok(self.base.get(E::KIND, id)?.is_some())
    }

    /// Stage an insert-or-overwrite. Append-only kinds are routed to [`Self::create`].
    pub fn save<E: Entity>(&mut self, entity: &E) -> StorageResult<()> {
        if E::KIND.is_append_only() {
            return self.create(entity);
        }
        let stored = StoredEntity::encode(entity)?;
        let key = (stored.kind, stored.id.clone());
        match self.pending.get_mut(&key) {
            Some(pending) => pending.entity = stored,
            None => {
                self.order.push(key.clone());
                self.pending.insert(
                    key,
                    Pending {
                        entity: stored,
                        created: false,
                    },
                );
            }
        }
        Ok(())
    }

    /// Stage an insert that must not collide with an existing record.
    pub fn create<E: Entity>(&mut self, entity: &E) -> StorageResult<()> {
        let stored = StoredEntity::encode(entity)?;
        if self.contains::<E>(&stored.id)? {
            return Err(StorageError::Conflict {
                kind: stored.kind,
                id: stored.id,
            });
        }
        let key = (stored.kind, stored.id.clone());
        trace!(kind = %stored.kind, id = %stored.id, "staged create");
        self.order.push(key.clone());
        self.pending.insert(
            key,
            Pending {
                entity: stored,
                created: true,
            },
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Staged writes in first-touch order.
    pub fn into_batch(mut self) -> WriteBatch {
        let mut batch = WriteBatch::new();
        for key in self.order {
            if let Some(pending) = self.pending.remove(&key) {
                if pending.created {
                    batch.push(WriteOp::Create(pending.entity));
                } else {
                    batch.push(WriteOp::Upsert(pending.entity));
                }
            }
        }
        batch
    }

    /// Apply the staged writes to the base store as one batch.
    pub fn commit(self) -> StorageResult<usize> {
        let base = self.base;
        let batch = self.into_batch();
        let written = batch.len();
        base.apply(batch)?;
        Ok(written)
    }
}
