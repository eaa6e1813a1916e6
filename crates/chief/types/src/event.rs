//! Typed events delivered by the ledger client.
//!
//! Decoding raw logs and call traces into these payloads happens upstream;
//! the indexer only sees the typed form. Log-note arguments (`foo`) stay raw
//! words because their interpretation depends on the handler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::ids::{PollId, SlateId, TxHash};
use crate::word::Word;

/// Canonical position of an event in the stream.
///
/// Orders by block number, then by log or call index within the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventCursor {
    pub block_number: u64,
    pub log_index: u64,
}

/// Envelope fields shared by every event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeta {
    pub transaction_hash: TxHash,
    /// Log index, or call index for call-trace events.
    pub log_index: u64,
    pub block_number: u64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Contract that emitted the log or received the call.
    pub address: Address,
    /// Transaction sender.
    pub from: Address,
}

impl EventMeta {
    pub fn cursor(&self) -> EventCursor {
        EventCursor {
            block_number: self.block_number,
            log_index: self.log_index,
        }
    }

    /// `<tx hash>-<log index>`, the base of every id derived from this event.
    pub fn key(&self) -> String {
        format!("{}-{}", self.transaction_hash, self.log_index)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventPayload {
    /// Chief `lock(wad)` log note.
    Lock { guy: Address, foo: Word },
    /// Chief `free(wad)` log note.
    Free { guy: Address, foo: Word },
    /// Chief `vote(bytes32 slate)` log note.
    Vote { guy: Address, foo: Word },
    /// Chief `vote(address[] yays)` log note. The slate id is read back from the chief.
    VoteYays { guy: Address },
    Etch { slate: SlateId },
    /// Chief `lift(whom)` log note; `foo` holds the lifted address.
    Lift { guy: Address, foo: Word },
    /// Vote proxy factory link between a cold and a hot wallet.
    LinkConfirmed {
        cold: Address,
        hot: Address,
        vote_proxy: Address,
    },
    /// `cast()` on a tracked spell, from a log note or a call trace.
    SpellCast { spell: Address, sender: Address },
    PollCreated {
        creator: Address,
        block_created: u64,
        poll_id: PollId,
        #[serde(with = "chrono::serde::ts_seconds")]
        start_date: DateTime<Utc>,
        #[serde(with = "chrono::serde::ts_seconds")]
        end_date: DateTime<Utc>,
        multi_hash: String,
        url: String,
    },
    PollVoted {
        voter: Address,
        poll_id: PollId,
        option_id: u64,
    },
    PollWithdrawn {
        creator: Address,
        poll_id: PollId,
        block_withdrawn: u64,
    },
    TokenTransfer {
        from: Address,
        to: Address,
        value: Word,
    },
    TokenMint { guy: Address, wad: Word },
    TokenBurn { guy: Address, wad: Word },
}

impl EventPayload {
    pub fn name(&self) -> &'static str {
        match self {
            EventPayload::Lock { .. } => "lock",
            EventPayload::Free { .. } => "free",
            EventPayload::Vote { .. } => "vote",
            EventPayload::VoteYays { .. } => "vote_yays",
            EventPayload::Etch { .. } => "etch",
            EventPayload::Lift { .. } => "lift",
            EventPayload::LinkConfirmed { .. } => "link_confirmed",
            EventPayload::SpellCast { .. } => "spell_cast",
            EventPayload::PollCreated { .. } => "poll_created",
            EventPayload::PollVoted { .. } => "poll_voted",
            EventPayload::PollWithdrawn { .. } => "poll_withdrawn",
            EventPayload::TokenTransfer { .. } => "token_transfer",
            EventPayload::TokenMint { .. } => "token_mint",
            EventPayload::TokenBurn { .. } => "token_burn",
        }
    }
}

/// One event as delivered by the ledger client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceEvent {
    pub meta: EventMeta,
    pub payload: EventPayload,
}
