//! Spell weight bookkeeping.
//!
//! Votes move a voter's whole weight between slates; locks and frees move a
//! delta across the voter's current slate. Only members with a spell record
//! carry weight.

use std::collections::BTreeSet;

use chief_types::{ActionKind, Address, Slate, Spell, Wad};

use crate::context::EventContext;
use crate::error::HandlerResult;

/// Members gained and lost when a voter switches slates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlateDelta {
    pub added: BTreeSet<Address>,
    pub removed: BTreeSet<Address>,
}

impl SlateDelta {
    /// Set differences between the previous slate (none on a first vote) and the next one.
    pub fn between(previous: Option<&Slate>, next: &Slate) -> Self {
        let before = previous.map(Slate::distinct_yays).unwrap_or_default();
        let after = next.distinct_yays();
        Self {
            added: after.difference(&before).copied().collect(),
            removed: before.difference(&after).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Record `ADD`/`REMOVE` for every changed spell and move `weight` with it.
pub fn apply_vote_delta(
    ctx: &mut EventContext<'_>,
    delta: &SlateDelta,
    sender: Address,
    weight: Wad,
) -> HandlerResult {
    for member in &delta.added {
        let Some(mut spell) = ctx.load::<Spell>(&member.to_hex())? else {
            continue;
        };
        spell.total_votes += 1;
        spell.approvals = spell.approvals.try_add(weight)?;
        spell.timeline_count += 1;
        ctx.save(&spell)?;
        ctx.record(ActionKind::Add {
            sender,
            spell: *member,
            locked: weight,
        })?;
    }

    for member in &delta.removed {
        let Some(mut spell) = ctx.load::<Spell>(&member.to_hex())? else {
            continue;
        };
        spell.total_votes = spell.total_votes.saturating_sub(1);
        spell.approvals = spell.approvals.try_sub(weight)?;
        spell.timeline_count += 1;
        ctx.save(&spell)?;
        ctx.record(ActionKind::Remove {
            sender,
            spell: *member,
            locked: weight,
        })?;
    }
    Ok(())
}

/// Whether a stake change adds to or takes from the voter's spells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakeChange {
    Lock,
    Free,
}

/// Propagate a lock or free of `wad` to every spell on the voter's slate.
pub fn apply_stake_change(
    ctx: &mut EventContext<'_>,
    slate: &Slate,
    sender: Address,
    wad: Wad,
    change: StakeChange,
) -> HandlerResult {
    for member in slate.distinct_yays() {
        let Some(mut spell) = ctx.load::<Spell>(&member.to_hex())? else {
            continue;
        };
        let kind = match change {
            StakeChange::Lock => {
                spell.approvals = spell.approvals.try_add(wad)?;
                ActionKind::SpellLock {
                    sender,
                    spell: member,
                    wad,
                }
            }
            StakeChange::Free => {
                spell.approvals = spell.approvals.try_sub(wad)?;
                ActionKind::SpellFree {
                    sender,
                    spell: member,
                    wad,
                }
            }
        };
        spell.timeline_count += 1;
        ctx.save(&spell)?;
        ctx.record(kind)?;
    }
    Ok(())
}
