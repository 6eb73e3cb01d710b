//! Monetary error taxonomy.
//!
//! Every fallible operation in the workspace reports one of these variants.
//! Errors are returned to the immediate caller and never retried internally.

use thiserror::Error;

/// Result type alias using `MoneyError`.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Errors raised by currency lookup, registration and money arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// A currency lookup failed (code, numeric code, country or locale).
    #[error("Unknown currency '{0}'")]
    UnknownCurrency(String),

    /// A binary operation mixed two currencies.
    #[error("Currency mismatch: expected {expected} but found {actual}")]
    CurrencyMismatch {
        /// Currency code of the receiver.
        expected: String,
        /// Currency code of the operand.
        actual: String,
    },

    /// An argument was malformed or out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Registration collided with an existing code, numeric code or country.
    #[error("Already registered: {0}")]
    AlreadyRegistered(String),

    /// Precision would be lost without a rounding mode, or a value overflowed.
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// A numeric literal could not be parsed.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A required value was absent.
    #[error("Missing value: {0}")]
    NullValue(String),

    /// A decoded record disagrees with the current registry metadata.
    #[error("Invalidated record: {0}")]
    InvalidatedRecord(String),
}

impl MoneyError {
    /// Builds a `CurrencyMismatch` from the two offending codes.
    pub fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::CurrencyMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Returns the stable error code used in logs and API payloads.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::AlreadyRegistered(_) => "ALREADY_REGISTERED",
            Self::Arithmetic(_) => "ARITHMETIC_ERROR",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::NullValue(_) => "NULL_VALUE",
            Self::InvalidatedRecord(_) => "INVALIDATED_RECORD",
        }
    }

    /// Returns true if the caller can reasonably recover, e.g. by falling
    /// back to another currency or prompting for a different code.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnknownCurrency(_))
    }
}
