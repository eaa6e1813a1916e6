//! 18-decimal fixed-point token amounts.
//!
//! Token amounts travel on the ledger as unsigned integers scaled by 10^18
//! ("wads"). [`Wad`] keeps that raw integer and renders it as a decimal
//! string, so `1_500_000_000_000_000_000` raw units display as `1.5`.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Neg};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConversionError, ConversionResult};
use crate::word::{ByteOrder, Word};

pub const WAD_DECIMALS: usize = 18;
pub const WAD_SCALE: i128 = 1_000_000_000_000_000_000;

/// A signed 18-decimal fixed-point amount.
///
/// Signed because approval weights are adjusted by deltas and may transiently
/// go below zero when the upstream feed is inconsistent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wad(i128);

impl Wad {
    pub const ZERO: Wad = Wad(0);

    /// Wrap a raw scaled integer.
    pub const fn from_raw(raw: i128) -> Self {
        Self(raw)
    }

    /// The raw scaled integer.
    pub const fn raw(self) -> i128 {
        self.0
    }

    /// Whole token units, e.g. `Wad::from_units(100)` is `100.0`.
    pub fn from_units(units: i64) -> Self {
        Self(i128::from(units) * WAD_SCALE)
    }

    /// Convert an unsigned raw scaled integer.
    pub fn from_uint(raw: u128) -> ConversionResult<Self> {
        i128::try_from(raw)
            .map(Self)
            .map_err(|_| ConversionError::Overflow(format!("{raw} does not fit a wad")))
    }

    /// Decode a raw payload word as a scaled amount.
    pub fn from_word(word: &Word, order: ByteOrder) -> ConversionResult<Self> {
        Self::from_uint(word.to_u128(order)?)
    }

    /// Encode back to a big-endian payload word. Negative amounts cannot be encoded.
    pub fn to_word(self) -> ConversionResult<Word> {
        let raw = u128::try_from(self.0).map_err(|_| {
            ConversionError::Overflow(format!("negative amount {self} has no word encoding"))
        })?;
        Ok(Word::from_u128(raw))
    }

    pub fn checked_add(self, other: Wad) -> Option<Wad> {
        self.0.checked_add(other.0).map(Wad)
    }

    pub fn checked_sub(self, other: Wad) -> Option<Wad> {
        self.0.checked_sub(other.0).map(Wad)
    }

    /// `self + other`, failing with [`ConversionError::Overflow`] outside the `i128` range.
    pub fn try_add(self, other: Wad) -> ConversionResult<Wad> {
        self.checked_add(other)
            .ok_or_else(|| ConversionError::Overflow(format!("{self} + {other}")))
    }

    /// `self - other`, failing with [`ConversionError::Overflow`] outside the `i128` range.
    pub fn try_sub(self, other: Wad) -> ConversionResult<Wad> {
        self.checked_sub(other)
            .ok_or_else(|| ConversionError::Overflow(format!("{self} - {other}")))
    }
}

/// Saturates at the `i128` bounds; use [`Wad::try_add`] where overflow must be detected.
impl Add for Wad {
    type Output = Wad;

    fn add(self, rhs: Wad) -> Wad {
        Wad(self.0.saturating_add(rhs.0))
    }
}

impl Neg for Wad {
    type Output = Wad;

    fn neg(self) -> Wad {
        Wad(self.0.saturating_neg())
    }
}

impl Sum for Wad {
    fn sum<I: Iterator<Item = Wad>>(iter: I) -> Wad {
        iter.fold(Wad::ZERO, Add::add)
    }
}

impl fmt::Display for Wad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = WAD_SCALE as u128;
        let magnitude = self.0.unsigned_abs();
        let integer = magnitude / scale;
        let fraction = magnitude % scale;

        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "{integer}")?;
        if fraction != 0 {
            let digits = format!("{fraction:0width$}", width = WAD_DECIMALS);
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        Ok(())
    }
}

impl FromStr for Wad {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConversionError::InvalidDecimal(s.to_string());
        let trimmed = s.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (integer, fraction) = body.split_once('.').unwrap_or((body, ""));
        if integer.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if fraction.len() > WAD_DECIMALS {
            return Err(ConversionError::InvalidDecimal(format!(
                "{s}: more than {WAD_DECIMALS} fractional digits"
            )));
        }
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(integer) || !all_digits(fraction) {
            return Err(invalid());
        }

        let integer_value: i128 = if integer.is_empty() {
            0
        } else {
            integer.parse().map_err(|_| invalid())?
        };
        let fraction_value: i128 = if fraction.is_empty() {
            0
        } else {
            format!("{fraction:0<width$}", width = WAD_DECIMALS)
                .parse()
                .map_err(|_| invalid())?
        };

        let magnitude = integer_value
            .checked_mul(WAD_SCALE)
            .and_then(|scaled| scaled.checked_add(fraction_value))
            .ok_or_else(|| ConversionError::Overflow(s.to_string()))?;

        Ok(Wad(if negative { -magnitude } else { magnitude }))
    }
}

impl Serialize for Wad {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Wad {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn displays_trimmed_decimals() {
        assert_eq!(Wad::from_units(100).to_string(), "100");
        assert_eq!(Wad::from_raw(WAD_SCALE / 2).to_string(), "0.5");
        assert_eq!(Wad::from_raw(-WAD_SCALE - WAD_SCALE / 4).to_string(), "-1.25");
        assert_eq!(Wad::from_raw(1).to_string(), "0.000000000000000001");
    }

    #[test]
    fn parses_decimal_strings() {
        assert_eq!("100".parse::<Wad>().unwrap(), Wad::from_units(100));
        assert_eq!(".5".parse::<Wad>().unwrap(), Wad::from_raw(WAD_SCALE / 2));
        assert_eq!("-40.0".parse::<Wad>().unwrap(), -Wad::from_units(40));
        assert!("1.0000000000000000001".parse::<Wad>().is_err());
        assert!("1e18".parse::<Wad>().is_err());
        assert!("".parse::<Wad>().is_err());
        assert!(".".parse::<Wad>().is_err());
    }

    #[test]
    fn decodes_payload_words() {
        let word = Word::from_u128(100 * WAD_SCALE as u128);
        assert_eq!(
            Wad::from_word(&word, ByteOrder::BigEndian).unwrap(),
            Wad::from_units(100)
        );
        assert_eq!(Wad::from_units(100).to_word().unwrap(), word);
        assert!(Wad::from_units(-1).to_word().is_err());
    }

    #[test]
    fn rejects_values_above_signed_range() {
        assert!(Wad::from_uint(u128::MAX).is_err());
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let max = Wad::from_raw(i128::MAX);
        assert_eq!(
            Wad::from_units(2).try_sub(Wad::from_units(5)).unwrap(),
            Wad::from_units(-3)
        );
        assert!(matches!(
            max.try_add(Wad::from_raw(1)),
            Err(ConversionError::Overflow(_))
        ));
        assert!(Wad::from_raw(i128::MIN).try_sub(Wad::from_raw(1)).is_err());
        assert_eq!(max.try_sub(max).unwrap(), Wad::ZERO);
    }

    proptest! {
        #[test]
        fn property_display_parse_is_lossless(raw in any::<i64>()) {
            let wad = Wad::from_raw(i128::from(raw) * 1_000_003);
            let parsed: Wad = wad.to_string().parse().unwrap();
            prop_assert_eq!(parsed, wad);
        }
    }
}
