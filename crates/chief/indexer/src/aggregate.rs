//! The governance aggregate record.
//!
//! The aggregate is loaded once when an event opens its context, mutated
//! through [`crate::EventContext::info`] by the handler, and written back with
//! the rest of the event's effects.

use chief_storage::{EntityStore, EntityStoreExt, QueryWindow, StagedStore, StorageResult};
use chief_types::{AddressVoter, EventMeta, GovernanceInfo, VoteProxy, Wad};

/// Aggregate as seen through an event's staging overlay, or a fresh one.
pub fn load(store: &StagedStore<'_>) -> StorageResult<GovernanceInfo> {
    Ok(store
        .load::<GovernanceInfo>(GovernanceInfo::ID)?
        .unwrap_or_default())
}

/// Committed aggregate, or a fresh one.
pub fn current(store: &dyn EntityStore) -> StorageResult<GovernanceInfo> {
    Ok(store
        .load::<GovernanceInfo>(GovernanceInfo::ID)?
        .unwrap_or_default())
}

/// Record `meta` as the last applied event.
pub fn touch(info: &mut GovernanceInfo, meta: &EventMeta) {
    info.last_block = meta.block_number;
    info.last_synced = Some(meta.timestamp);
    info.cursor = Some(meta.cursor());
}

/// Sum of the locked amounts of every address voter and vote proxy.
///
/// Matches [`GovernanceInfo::locked`] whenever every lock and free was applied.
pub fn voter_locked_total(store: &dyn EntityStore) -> StorageResult<Wad> {
    let addresses: Wad = store
        .load_all::<AddressVoter>(QueryWindow::all())?
        .iter()
        .map(|voter| voter.locked)
        .sum();
    let proxies: Wad = store
        .load_all::<VoteProxy>(QueryWindow::all())?
        .iter()
        .map(|proxy| proxy.locked)
        .sum();
    Ok(addresses + proxies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chief_storage::InMemoryEntityStore;
    use chief_types::{Address, TxHash, Word};
    use chrono::{TimeZone, Utc};

    #[test]
    fn missing_aggregate_starts_empty() {
        let store = InMemoryEntityStore::new();
        let info = current(&store).unwrap();
        assert_eq!(info, GovernanceInfo::default());
        assert_eq!(voter_locked_total(&store).unwrap(), Wad::ZERO);
    }

    #[test]
    fn touch_moves_the_cursor() {
        let meta = EventMeta {
            transaction_hash: TxHash(Word::ZERO),
            log_index: 2,
            block_number: 50,
            timestamp: Utc.timestamp_opt(1_000, 0).unwrap(),
            address: Address::ZERO,
            from: Address::ZERO,
        };
        let mut info = GovernanceInfo::default();
        touch(&mut info, &meta);
        assert_eq!(info.last_block, 50);
        assert_eq!(info.cursor, Some(meta.cursor()));
        assert_eq!(info.last_synced, Some(meta.timestamp));
    }

    #[test]
    fn locked_total_sums_both_voter_kinds() {
        let store = InMemoryEntityStore::new();
        store
            .save(&AddressVoter {
                address: Address([1; 20]),
                locked: Wad::from_units(3),
                voted_slate: None,
                created_at: Utc::now(),
            })
            .unwrap();
        store
            .save(&VoteProxy {
                address: Address([2; 20]),
                owner: "link".to_string(),
                locked: Wad::from_units(4),
                voted_slate: None,
                created_at: Utc::now(),
            })
            .unwrap();
        assert_eq!(voter_locked_total(&store).unwrap(), Wad::from_units(7));
    }
}
