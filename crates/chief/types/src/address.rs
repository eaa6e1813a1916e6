use crate::encoding::{decode_prefixed, encode_prefixed, impl_hex_string};
use crate::error::{ConversionError, ConversionResult};

/// Byte length of a contract or account address.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account or contract address.
///
/// Renders as lowercase `0x`-prefixed hex, which is also its entity id form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Build from exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> ConversionResult<Self> {
        let raw: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| ConversionError::InvalidLength {
            expected: ADDRESS_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(raw))
    }

    pub fn parse_hex(value: &str) -> ConversionResult<Self> {
        Self::from_slice(&decode_prefixed(value)?)
    }

    pub fn to_hex(&self) -> String {
        encode_prefixed(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }
}

impl_hex_string!(Address);
