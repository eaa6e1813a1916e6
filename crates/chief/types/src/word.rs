//! Raw 32-byte payload words and opaque byte strings.
//!
//! Log notes carry their arguments as untyped 32-byte words (`foo`, `bar`,
//! `wad`). Depending on the ledger client, the bytes may arrive in ABI
//! (big-endian) order or reversed, so every numeric or address view of a word
//! takes an explicit [`ByteOrder`].

use serde::{Deserialize, Serialize};

use crate::address::{Address, ADDRESS_LEN};
use crate::encoding::{decode_prefixed, encode_prefixed, impl_hex_string};
use crate::error::{ConversionError, ConversionResult};

pub const WORD_LEN: usize = 32;

/// Byte order of a raw payload word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// ABI order: most significant byte first.
    #[default]
    BigEndian,
    LittleEndian,
}

/// A raw 32-byte payload word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Word(pub [u8; WORD_LEN]);

impl Word {
    pub const ZERO: Word = Word([0u8; WORD_LEN]);

    /// Build from up to 32 big-endian bytes, left-padding shorter input.
    pub fn from_slice(bytes: &[u8]) -> ConversionResult<Self> {
        if bytes.len() > WORD_LEN {
            return Err(ConversionError::InvalidLength {
                expected: WORD_LEN,
                actual: bytes.len(),
            });
        }
        let mut raw = [0u8; WORD_LEN];
        raw[WORD_LEN - bytes.len()..].copy_from_slice(bytes);
        Ok(Self(raw))
    }

    pub fn from_u128(value: u128) -> Self {
        let mut raw = [0u8; WORD_LEN];
        raw[16..].copy_from_slice(&value.to_be_bytes());
        Self(raw)
    }

    /// ABI encoding of an address: twelve zero bytes followed by the address.
    pub fn from_address(address: &Address) -> Self {
        let mut raw = [0u8; WORD_LEN];
        raw[WORD_LEN - ADDRESS_LEN..].copy_from_slice(address.as_bytes());
        Self(raw)
    }

    pub fn parse_hex(value: &str) -> ConversionResult<Self> {
        Self::from_slice(&decode_prefixed(value)?)
    }

    pub fn to_hex(&self) -> String {
        encode_prefixed(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; WORD_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; WORD_LEN]
    }

    /// The word's bytes rearranged into big-endian order.
    pub fn normalized(&self, order: ByteOrder) -> [u8; WORD_LEN] {
        match order {
            ByteOrder::BigEndian => self.0,
            ByteOrder::LittleEndian => {
                let mut raw = self.0;
                raw.reverse();
                raw
            }
        }
    }

    /// The address held in the low 20 bytes of the normalized word.
    pub fn to_address(&self, order: ByteOrder) -> Address {
        let raw = self.normalized(order);
        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(&raw[WORD_LEN - ADDRESS_LEN..]);
        Address(out)
    }

    /// Interpret the normalized word as an unsigned integer.
    ///
    /// Fails when the value does not fit in 128 bits.
    pub fn to_u128(&self, order: ByteOrder) -> ConversionResult<u128> {
        let raw = self.normalized(order);
        if raw[..16].iter().any(|byte| *byte != 0) {
            return Err(ConversionError::Overflow(format!(
                "{} exceeds 128 bits",
                encode_prefixed(&raw)
            )));
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&raw[16..]);
        Ok(u128::from_be_bytes(low))
    }
}

impl_hex_string!(Word);

/// An opaque byte string (e.g. a spell's packed calldata).
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn parse_hex(value: &str) -> ConversionResult<Self> {
        Ok(Self(decode_prefixed(value)?))
    }

    pub fn to_hex(&self) -> String {
        encode_prefixed(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl_hex_string!(Bytes);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_left_padded() {
        let word = Word::from_slice(&[0x01, 0x02]).unwrap();
        assert_eq!(word.0[30], 0x01);
        assert_eq!(word.0[31], 0x02);
        assert!(word.0[..30].iter().all(|b| *b == 0));
    }

    #[test]
    fn address_is_taken_from_low_bytes() {
        let addr = Address([0x11; 20]);
        let word = Word::from_address(&addr);
        assert_eq!(word.to_address(ByteOrder::BigEndian), addr);

        let mut reversed = word.0;
        reversed.reverse();
        assert_eq!(Word(reversed).to_address(ByteOrder::LittleEndian), addr);
    }

    #[test]
    fn integer_respects_byte_order() {
        let word = Word::from_u128(258);
        assert_eq!(word.to_u128(ByteOrder::BigEndian).unwrap(), 258);

        let mut reversed = word.0;
        reversed.reverse();
        assert_eq!(Word(reversed).to_u128(ByteOrder::LittleEndian).unwrap(), 258);
    }

    #[test]
    fn integer_overflow_is_reported() {
        let mut raw = [0u8; WORD_LEN];
        raw[0] = 1;
        assert!(matches!(
            Word(raw).to_u128(ByteOrder::BigEndian),
            Err(ConversionError::Overflow(_))
        ));
    }

    #[test]
    fn oversized_input_is_rejected() {
        assert!(Word::from_slice(&[0u8; 33]).is_err());
    }
}
