//! Chief Types - shared vocabulary of the governance indexer.
//!
//! - byte-level primitives: [`Address`], [`Word`], [`Bytes`] and the ids built on them
//! - the numeric conversion layer: [`Wad`] fixed-point amounts decoded from payload words
//! - persisted entities ([`Slate`], [`Spell`], voters, polls, the [`GovernanceInfo`] aggregate)
//! - the append-only [`Action`] audit record
//! - typed ledger events ([`GovernanceEvent`])

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod encoding;

pub mod action;
pub mod address;
pub mod entity;
pub mod error;
pub mod event;
pub mod ids;
pub mod token;
pub mod wad;
pub mod word;

pub use action::{Action, ActionKind};
pub use address::Address;
pub use encoding::{decode_prefixed, encode_prefixed};
pub use entity::{
    AddressVoter, Entity, EntityKind, GovernanceInfo, Poll, PollVote, Slate, Spell, SpellKind,
    VoteProxy, VoterRegistry,
};
pub use error::{ConversionError, ConversionResult};
pub use event::{EventCursor, EventMeta, EventPayload, GovernanceEvent};
pub use ids::{PollId, SlateId, TxHash};
pub use token::{Account, AccountBalance, AccountBalanceSnapshot, TokenEvent, TokenEventKind};
pub use wad::{Wad, WAD_DECIMALS, WAD_SCALE};
pub use word::{ByteOrder, Bytes, Word};
