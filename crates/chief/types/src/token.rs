//! Governance token accounting records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::entity::{Entity, EntityKind};
use crate::ids::TxHash;
use crate::wad::Wad;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
}

impl Entity for Account {
    const KIND: EntityKind = EntityKind::Account;

    fn entity_id(&self) -> String {
        self.address.to_hex()
    }
}

/// Balance of one account in one token contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub account: Address,
    pub token: Address,
    pub amount: Wad,
    pub block_number: u64,
    pub modified: DateTime<Utc>,
    pub transaction_hash: TxHash,
}

impl AccountBalance {
    pub fn key(account: &Address, token: &Address) -> String {
        format!("{account}-{token}")
    }
}

impl Entity for AccountBalance {
    const KIND: EntityKind = EntityKind::AccountBalance;

    fn entity_id(&self) -> String {
        Self::key(&self.account, &self.token)
    }
}

/// Balance as of one block timestamp; later events in the same second overwrite it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalanceSnapshot {
    pub id: String,
    pub account: Address,
    pub token: Address,
    pub amount: Wad,
    pub block_number: u64,
    pub transaction_hash: TxHash,
    pub timestamp: DateTime<Utc>,
    /// Id of the [`TokenEvent`] that produced this snapshot.
    pub event: String,
}

impl AccountBalanceSnapshot {
    pub fn key(balance_id: &str, timestamp: DateTime<Utc>) -> String {
        format!("{balance_id}-{}", timestamp.timestamp())
    }
}

impl Entity for AccountBalanceSnapshot {
    const KIND: EntityKind = EntityKind::AccountBalanceSnapshot;

    fn entity_id(&self) -> String {
        self.id.clone()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenEventKind {
    Burn {
        burner: Address,
    },
    Mint {
        destination: Address,
        minter: Address,
    },
    Transfer {
        source: Address,
        destination: Address,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEvent {
    pub id: String,
    pub token: Address,
    pub amount: Wad,
    pub sender: Address,
    pub kind: TokenEventKind,
    pub block_number: u64,
    pub timestamp: DateTime<Utc>,
    pub transaction_hash: TxHash,
}

impl Entity for TokenEvent {
    const KIND: EntityKind = EntityKind::TokenEvent;

    fn entity_id(&self) -> String {
        self.id.clone()
    }
}
