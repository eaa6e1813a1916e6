//! Persisted governance entities.
//!
//! Every entity is keyed by a stable string id and is never deleted. The
//! [`Entity`] trait ties each type to its [`EntityKind`] namespace in the store.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::event::EventCursor;
use crate::ids::{PollId, SlateId, TxHash};
use crate::wad::Wad;
use crate::word::Bytes;

/// Store namespace of an entity type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    AddressVoter,
    VoteProxy,
    VoterRegistry,
    Slate,
    Spell,
    Poll,
    PollVote,
    Action,
    GovernanceInfo,
    Account,
    AccountBalance,
    AccountBalanceSnapshot,
    TokenEvent,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::AddressVoter => "address_voter",
            EntityKind::VoteProxy => "vote_proxy",
            EntityKind::VoterRegistry => "voter_registry",
            EntityKind::Slate => "slate",
            EntityKind::Spell => "spell",
            EntityKind::Poll => "poll",
            EntityKind::PollVote => "poll_vote",
            EntityKind::Action => "action",
            EntityKind::GovernanceInfo => "governance_info",
            EntityKind::Account => "account",
            EntityKind::AccountBalance => "account_balance",
            EntityKind::AccountBalanceSnapshot => "account_balance_snapshot",
            EntityKind::TokenEvent => "token_event",
        }
    }

    /// Kinds whose records are written once and never updated.
    pub fn is_append_only(&self) -> bool {
        matches!(
            self,
            EntityKind::Action | EntityKind::VoterRegistry | EntityKind::TokenEvent
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that can be loaded from and saved to the entity store.
pub trait Entity: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync {
    const KIND: EntityKind;

    fn entity_id(&self) -> String;
}

/// A voter that locks directly from its own address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressVoter {
    pub address: Address,
    pub locked: Wad,
    #[serde(default)]
    pub voted_slate: Option<SlateId>,
    pub created_at: DateTime<Utc>,
}

impl Entity for AddressVoter {
    const KIND: EntityKind = EntityKind::AddressVoter;

    fn entity_id(&self) -> String {
        self.address.to_hex()
    }
}

/// A delegated voting contract linking a cold and a hot wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteProxy {
    pub address: Address,
    /// Id of the [`VoterRegistry`] link that created this proxy.
    pub owner: String,
    pub locked: Wad,
    #[serde(default)]
    pub voted_slate: Option<SlateId>,
    pub created_at: DateTime<Utc>,
}

impl Entity for VoteProxy {
    const KIND: EntityKind = EntityKind::VoteProxy;

    fn entity_id(&self) -> String {
        self.address.to_hex()
    }
}

/// One cold/hot link confirmation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRegistry {
    pub id: String,
    pub cold_address: Address,
    pub hot_address: Address,
    pub vote_proxy: Address,
    pub created_at: DateTime<Utc>,
}

impl Entity for VoterRegistry {
    const KIND: EntityKind = EntityKind::VoterRegistry;

    fn entity_id(&self) -> String {
        self.id.clone()
    }
}

/// An etched slate and its members in discovery order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slate {
    pub id: SlateId,
    pub yays: Vec<Address>,
    pub created_at: DateTime<Utc>,
}

impl Slate {
    /// The member list as a set; duplicates collapse.
    pub fn distinct_yays(&self) -> BTreeSet<Address> {
        self.yays.iter().copied().collect()
    }
}

impl Entity for Slate {
    const KIND: EntityKind = EntityKind::Slate;

    fn entity_id(&self) -> String {
        self.id.to_hex()
    }
}

/// Variant a spell was recognized as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellKind {
    /// Scheduled through the pause; cast arrives as a call.
    Paused,
    /// Acts on the governance mom directly.
    Direct,
    /// Parameter adjustment spell exposing `MOM()`.
    Parameter,
}

impl fmt::Display for SpellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SpellKind::Paused => "paused",
            SpellKind::Direct => "direct",
            SpellKind::Parameter => "parameter",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub address: Address,
    pub kind: SpellKind,
    #[serde(default)]
    pub data: Option<Bytes>,
    pub created_at: DateTime<Utc>,
    pub approvals: Wad,
    pub total_votes: u64,
    pub timeline_count: u64,
    #[serde(default)]
    pub casted: Option<DateTime<Utc>>,
    #[serde(default)]
    pub casted_with: Option<Wad>,
    #[serde(default)]
    pub lifted: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lifted_with: Option<Wad>,
}

impl Spell {
    pub fn new(address: Address, kind: SpellKind, created_at: DateTime<Utc>) -> Self {
        Self {
            address,
            kind,
            data: None,
            created_at,
            approvals: Wad::ZERO,
            total_votes: 0,
            timeline_count: 0,
            casted: None,
            casted_with: None,
            lifted: None,
            lifted_with: None,
        }
    }
}

impl Entity for Spell {
    const KIND: EntityKind = EntityKind::Spell;

    fn entity_id(&self) -> String {
        self.address.to_hex()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub poll_id: PollId,
    pub creator: Address,
    pub block_created: u64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub multi_hash: String,
    pub url: String,
    pub votes_count: u64,
    pub timeline_count: u64,
    #[serde(default)]
    pub withdrawn: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub transaction_hash: TxHash,
}

impl Poll {
    pub fn key(poll_id: PollId) -> String {
        poll_id.to_string()
    }
}

impl Entity for Poll {
    const KIND: EntityKind = EntityKind::Poll;

    fn entity_id(&self) -> String {
        Self::key(self.poll_id)
    }
}

/// A voter's current choice in a poll. Re-voting overwrites the record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollVote {
    pub poll_id: PollId,
    pub voter: Address,
    pub option: u64,
    pub first_voted_at: DateTime<Utc>,
    pub voted_at: DateTime<Utc>,
    pub block_number: u64,
    pub transaction_hash: TxHash,
}

impl PollVote {
    pub fn key(poll_id: PollId, voter: &Address) -> String {
        format!("{poll_id}-{voter}")
    }
}

impl Entity for PollVote {
    const KIND: EntityKind = EntityKind::PollVote;

    fn entity_id(&self) -> String {
        Self::key(self.poll_id, &self.voter)
    }
}

/// System-wide governance aggregate. A single record with id [`GovernanceInfo::ID`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceInfo {
    pub count_proxies: u64,
    pub count_addresses: u64,
    pub count_slates: u64,
    pub count_spells: u64,
    pub count_lock: u64,
    pub count_free: u64,
    pub count_casted: u64,
    pub count_polls: u64,
    pub locked: Wad,
    #[serde(default)]
    pub hat: Option<Address>,
    pub last_block: u64,
    #[serde(default)]
    pub last_synced: Option<DateTime<Utc>>,
    /// Position of the last event applied by the indexer.
    #[serde(default)]
    pub cursor: Option<EventCursor>,
}

impl GovernanceInfo {
    pub const ID: &'static str = "0x0";
}

impl Entity for GovernanceInfo {
    const KIND: EntityKind = EntityKind::GovernanceInfo;

    fn entity_id(&self) -> String {
        Self::ID.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_yays_collapses_duplicates() {
        let a = Address([1; 20]);
        let b = Address([2; 20]);
        let slate = Slate {
            id: SlateId(crate::word::Word::ZERO),
            yays: vec![b, a, b],
            created_at: Utc::now(),
        };
        let distinct: Vec<_> = slate.distinct_yays().into_iter().collect();
        assert_eq!(distinct, vec![a, b]);
        assert_eq!(slate.yays.len(), 3);
    }

    #[test]
    fn poll_vote_key_combines_poll_and_voter() {
        let voter = Address([0xaa; 20]);
        assert_eq!(PollVote::key(7, &voter), format!("7-0x{}", "aa".repeat(20)));
    }

    #[test]
    fn append_only_kinds() {
        assert!(EntityKind::Action.is_append_only());
        assert!(!EntityKind::Spell.is_append_only());
    }
}
