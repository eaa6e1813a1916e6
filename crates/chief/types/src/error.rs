use thiserror::Error;

/// Result type for payload and amount conversions.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Errors raised while decoding raw payload bytes or decimal amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid length: expected at most {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("integer overflow: {0}")]
    Overflow(String),

    #[error("invalid decimal: {0}")]
    InvalidDecimal(String),
}
