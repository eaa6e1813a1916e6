use serde::{Deserialize, Serialize};

use crate::error::ConversionResult;
use crate::word::Word;

/// Identifier of an etched slate (the hash of its sorted yays).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlateId(pub Word);

impl SlateId {
    pub fn parse_hex(value: &str) -> ConversionResult<Self> {
        Word::parse_hex(value).map(Self)
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<Word> for SlateId {
    fn from(value: Word) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for SlateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hash of the transaction that carried an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub Word);

impl TxHash {
    pub fn parse_hex(value: &str) -> ConversionResult<Self> {
        Word::parse_hex(value).map(Self)
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Identifier assigned to a poll by the polling emitter.
pub type PollId = u64;
