//! `0x`-prefixed hex helpers shared by the byte-oriented types.

use crate::error::{ConversionError, ConversionResult};

/// Encode bytes as lowercase `0x`-prefixed hex.
pub fn encode_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode `0x`-prefixed (or bare) hex. Odd-length input is left-padded with a zero nibble.
pub fn decode_prefixed(value: &str) -> ConversionResult<Vec<u8>> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let decoded = if digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))
    } else {
        hex::decode(digits)
    };

    decoded.map_err(|err| ConversionError::InvalidHex(format!("{value}: {err}")))
}

/// Implements `Display`, `FromStr` and string-based serde for a hex newtype.
///
/// The type must provide `to_hex(&self) -> String` and `parse_hex(&str) -> ConversionResult<Self>`.
macro_rules! impl_hex_string {
    ($ty:ty) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($ty), self.to_hex())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::error::ConversionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_hex(s)
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::parse_hex(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_hex_string;
