//! Append-only audit trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::entity::{Entity, EntityKind};
use crate::ids::{PollId, SlateId, TxHash};
use crate::wad::Wad;

/// One immutable audit record of a state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub block_number: u64,
    pub transaction_hash: TxHash,
    pub timestamp: DateTime<Utc>,
    pub kind: ActionKind,
}

impl Entity for Action {
    const KIND: EntityKind = EntityKind::Action;

    fn entity_id(&self) -> String {
        self.id.clone()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// A voter became known: an address voter on first lock or a linked proxy.
    Voter {
        voter: Address,
        #[serde(default)]
        registry: Option<String>,
    },
    Lock {
        sender: Address,
        wad: Wad,
    },
    Free {
        sender: Address,
        wad: Wad,
    },
    Vote {
        sender: Address,
        wad: Wad,
        slate: SlateId,
        yays: Vec<Address>,
    },
    Etch {
        sender: Address,
        slate: SlateId,
    },
    Lift {
        sender: Address,
        hat: Address,
    },
    Cast {
        sender: Address,
        spell: Address,
    },
    /// Spell gained a voter's weight through a vote.
    Add {
        sender: Address,
        spell: Address,
        locked: Wad,
    },
    /// Spell lost a voter's weight through a vote.
    Remove {
        sender: Address,
        spell: Address,
        locked: Wad,
    },
    /// A voter of this spell locked more tokens.
    SpellLock {
        sender: Address,
        spell: Address,
        wad: Wad,
    },
    /// A voter of this spell freed tokens.
    SpellFree {
        sender: Address,
        spell: Address,
        wad: Wad,
    },
    PollCreated {
        sender: Address,
        poll_id: PollId,
    },
    PollVote {
        voter: Address,
        poll_id: PollId,
        option: u64,
    },
    PollWithdrawn {
        sender: Address,
        poll_id: PollId,
    },
}

impl ActionKind {
    /// Id prefix for records of this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            ActionKind::Voter {
                registry: Some(_), ..
            } => "PROXY-VOTER",
            ActionKind::Voter { registry: None, .. } => "ADDRESS-VOTER",
            ActionKind::Lock { .. } => "LOCK",
            ActionKind::Free { .. } => "FREE",
            ActionKind::Vote { .. } => "VOTE",
            ActionKind::Etch { .. } => "ETCH",
            ActionKind::Lift { .. } => "LIFT",
            ActionKind::Cast { .. } => "CAST",
            ActionKind::Add { .. } => "ADD",
            ActionKind::Remove { .. } => "REMOVE",
            ActionKind::SpellLock { .. } => "SPELL-LOCK",
            ActionKind::SpellFree { .. } => "SPELL-FREE",
            ActionKind::PollCreated { .. } => "POLL-CREATED",
            ActionKind::PollVote { .. } => "POLL-VOTE",
            ActionKind::PollWithdrawn { .. } => "POLL-WITHDRAWN",
        }
    }

    /// Spell touched by a weighted action, if any.
    pub fn spell(&self) -> Option<Address> {
        match self {
            ActionKind::Add { spell, .. }
            | ActionKind::Remove { spell, .. }
            | ActionKind::SpellLock { spell, .. }
            | ActionKind::SpellFree { spell, .. }
            | ActionKind::Cast { spell, .. } => Some(*spell),
            ActionKind::Lift { hat, .. } => Some(*hat),
            _ => None,
        }
    }
}
