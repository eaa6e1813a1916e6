//! Audit record construction.

use chief_types::{Action, ActionKind, Address, EventMeta};

/// `<prefix>-<tx hash>-<log index>`.
pub fn action_id(prefix: &str, meta: &EventMeta) -> String {
    format!("{prefix}-{}", meta.key())
}

/// `<prefix>-<tx hash>-<log index>-<spell>`, for events that touch several spells.
pub fn spell_action_id(prefix: &str, meta: &EventMeta, spell: &Address) -> String {
    format!("{prefix}-{}-{spell}", meta.key())
}

fn per_spell(kind: &ActionKind) -> Option<Address> {
    match kind {
        ActionKind::Add { spell, .. }
        | ActionKind::Remove { spell, .. }
        | ActionKind::SpellLock { spell, .. }
        | ActionKind::SpellFree { spell, .. } => Some(*spell),
        _ => None,
    }
}

/// Build the audit record of `kind` for the event described by `meta`.
pub fn build(meta: &EventMeta, kind: ActionKind) -> Action {
    let id = match per_spell(&kind) {
        Some(spell) => spell_action_id(kind.prefix(), meta, &spell),
        None => action_id(kind.prefix(), meta),
    };
    Action {
        id,
        block_number: meta.block_number,
        transaction_hash: meta.transaction_hash,
        timestamp: meta.timestamp,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chief_types::{TxHash, Wad, Word};
    use chrono::{TimeZone, Utc};

    fn meta() -> EventMeta {
        EventMeta {
            transaction_hash: TxHash(Word::from_u128(0xabc)),
            log_index: 4,
            block_number: 9,
            timestamp: Utc.timestamp_opt(1_600_000_000, 0).unwrap(),
            address: Address::ZERO,
            from: Address::ZERO,
        }
    }

    #[test]
    fn single_record_ids_use_the_event_key() {
        let action = build(
            &meta(),
            ActionKind::Lock {
                sender: Address([1; 20]),
                wad: Wad::from_units(1),
            },
        );
        assert_eq!(action.id, format!("LOCK-{}-4", Word::from_u128(0xabc)));
        assert_eq!(action.block_number, 9);
    }

    #[test]
    fn weighted_ids_are_distinct_per_spell() {
        let sender = Address([1; 20]);
        let a = build(
            &meta(),
            ActionKind::Add {
                sender,
                spell: Address([2; 20]),
                locked: Wad::ZERO,
            },
        );
        let b = build(
            &meta(),
            ActionKind::Add {
                sender,
                spell: Address([3; 20]),
                locked: Wad::ZERO,
            },
        );
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("ADD-"));
        assert!(a.id.ends_with(&Address([2; 20]).to_hex()));
    }
}
