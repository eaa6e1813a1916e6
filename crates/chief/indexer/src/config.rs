//! Indexer configuration

use chief_types::{Address, ByteOrder};
use serde::{Deserialize, Serialize};

/// Mainnet DSChief.
pub const MAINNET_CHIEF: Address = Address([
    0x9e, 0xf0, 0x5f, 0x7f, 0x6d, 0xeb, 0x61, 0x6f, 0xd3, 0x7a, 0xc3, 0xc9, 0x59, 0xa2, 0xdd, 0xd2,
    0x5a, 0x54, 0xe4, 0xf5,
]);

/// Mainnet DSPause proxy returned by `pause()` on paused spells.
pub const MAINNET_PAUSE: Address = Address([
    0xbe, 0x28, 0x64, 0x31, 0x45, 0x47, 0x14, 0xf5, 0x11, 0x00, 0x87, 0x13, 0x97, 0x3d, 0x3b, 0x05,
    0x3a, 0x2d, 0x38, 0xf3,
]);

/// Mainnet SaiMom, the governance mom.
pub const MAINNET_GOVERNANCE_MOM: Address = Address([
    0xf2, 0xc5, 0x36, 0x9c, 0xff, 0xb8, 0xea, 0x62, 0x84, 0x45, 0x2b, 0x03, 0x26, 0xe3, 0x26, 0xdb,
    0xfd, 0xcb, 0x86, 0x7c,
]);

/// Slate members that answer the spell probes but are not spells.
pub const MAINNET_EXCLUDED_MEMBERS: [Address; 2] = [
    Address([
        0x48, 0x35, 0x74, 0xd8, 0x69, 0xbc, 0x34, 0xd2, 0x13, 0x10, 0x32, 0xe6, 0x5a, 0x31, 0x14,
        0xa9, 0x01, 0x92, 0x8e, 0x91,
    ]),
    Address([
        0xe7, 0xbb, 0xc8, 0xfe, 0xa5, 0x7a, 0x92, 0xfc, 0x30, 0x7d, 0x65, 0x0d, 0x78, 0xe5, 0x48,
        0x1b, 0x25, 0xcc, 0xed, 0xff,
    ]),
];

/// Indexer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Chief queried for approvals when a spell is cast
    #[serde(default = "default_chief")]
    pub chief: Address,

    /// Identity a paused spell must report from `pause()`
    #[serde(default = "default_pause")]
    pub pause: Address,

    /// Identity direct and parameter spells must report
    #[serde(default = "default_governance_mom")]
    pub governance_mom: Address,

    /// Members never promoted to spells
    #[serde(default = "default_excluded_members")]
    pub excluded_members: Vec<Address>,

    /// Byte order of raw amount and address words in log notes
    #[serde(default)]
    pub byte_order: ByteOrder,

    /// Skip events at or before the last applied cursor
    #[serde(default = "default_true")]
    pub replay_guard: bool,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            chief: default_chief(),
            pause: default_pause(),
            governance_mom: default_governance_mom(),
            excluded_members: default_excluded_members(),
            byte_order: ByteOrder::default(),
            replay_guard: true,
        }
    }
}

impl IndexerConfig {
    pub fn is_excluded(&self, member: &Address) -> bool {
        self.excluded_members.contains(member)
    }
}

fn default_chief() -> Address {
    MAINNET_CHIEF
}

fn default_pause() -> Address {
    MAINNET_PAUSE
}

fn default_governance_mom() -> Address {
    MAINNET_GOVERNANCE_MOM
}

fn default_excluded_members() -> Vec<Address> {
    MAINNET_EXCLUDED_MEMBERS.to_vec()
}

fn default_true() -> bool {
    true
}
