//! In-memory reference implementation of [`EntityStore`].
//!
//! Deterministic and test-friendly: records of each kind are kept ordered by id.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::RwLock;

use chief_types::EntityKind;
use serde_json::Value;

use crate::traits::{EntityStore, QueryWindow, StoredEntity, WriteBatch, WriteOp};
use crate::{StorageError, StorageResult};

/// In-memory entity store.
#[derive(Default)]
pub struct InMemoryEntityStore {
    records: RwLock<HashMap<EntityKind, BTreeMap<String, Value>>>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record of every kind, ordered by kind then id.
    pub fn dump(&self) -> StorageResult<Vec<StoredEntity>> {
        let guard = self
            .records
            .read()
            .map_err(|_| StorageError::Backend("records lock poisoned".to_string()))?;
        let mut kinds: Vec<_> = guard.keys().copied().collect();
        kinds.sort();

        let mut out = Vec::new();
        for kind in kinds {
            if let Some(table) = guard.get(&kind) {
                out.extend(table.iter().map(|(id, data)| StoredEntity {
                    kind,
                    id: id.clone(),
                    data: data.clone(),
                }));
            }
        }
        Ok(out)
    }
}

impl EntityStore for InMemoryEntityStore {
    fn get(&self, kind: EntityKind, id: &str) -> StorageResult<Option<StoredEntity>> {
        let guard = self
            .records
            .read()
            .map_err(|_| StorageError::Backend("records lock poisoned".to_string()))?;
        Ok(guard
            .get(&kind)
            .and_then(|table| table.get(id))
            .map(|data| StoredEntity {
                kind,
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    fn list(&self, kind: EntityKind, window: QueryWindow) -> StorageResult<Vec<StoredEntity>> {
        let guard = self
            .records
            .read()
            .map_err(|_| StorageError::Backend("records lock poisoned".to_string()))?;
        let values = guard
            .get(&kind)
            .map(|table| {
                table
                    .iter()
                    .map(|(id, data)| StoredEntity {
                        kind,
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        Ok(apply_window(values, window))
    }

    fn count(&self, kind: EntityKind) -> StorageResult<usize> {
        let guard = self
            .records
            .read()
            .map_err(|_| StorageError::Backend("records lock poisoned".to_string()))?;
        Ok(guard.get(&kind).map(BTreeMap::len).unwrap_or(0))
    }

    fn apply(&self, batch: WriteBatch) -> StorageResult<()> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| StorageError::Backend("records lock poisoned".to_string()))?;

        // Validate every create before touching any table.
        {
            let mut created: HashSet<(EntityKind, &str)> = HashSet::new();
            for op in batch.ops() {
                if let WriteOp::Create(entity) = op {
                    let exists = guard
                        .get(&entity.kind)
                        .is_some_and(|table| table.contains_key(&entity.id));
                    if exists || !created.insert((entity.kind, entity.id.as_str())) {
                        return Err(StorageError::Conflict {
                            kind: entity.kind,
                            id: entity.id.clone(),
                        });
                    }
                }
            }
        }

        for op in batch.into_ops() {
            let (WriteOp::Upsert(entity) | WriteOp::Create(entity)) = op;
            guard
                .entry(entity.kind)
                .or_default()
                .insert(entity.id, entity.data);
        }
        Ok(())
    }
}

fn apply_window<T>(items: Vec<T>, window: QueryWindow) -> Vec<T> {
    let iter = items.into_iter().skip(window.offset);
    if window.limit == 0 {
        iter.collect()
    } else {
        iter.take(window.limit).collect()
    }
}
