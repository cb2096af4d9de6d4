//! Error types for BudgetPal
//!
//! Budget and backup failures are split into two typed families,
//! [`ValidationError`] and [`CodecError`], both of which fold into the crate
//! wide [`BudgetPalError`]. Every operation returns these as values; a
//! rejected operation leaves stored state unchanged.

use thiserror::Error;

use crate::models::Money;

/// Rejections raised by budget and transaction rules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The monthly budget would drop below what categories already hold
    #[error("Monthly budget {requested} cannot be less than the {allocated} allocated to categories")]
    BudgetBelowAllocated { requested: Money, allocated: Money },

    /// A category budget would push total allocation past the monthly budget
    #[error(
        "Budget of {requested} for '{category}' brings the total allocated to {total}, \
         exceeding the monthly budget of {monthly}"
    )]
    AllocationExceedsMonthly {
        category: String,
        requested: Money,
        total: Money,
        monthly: Money,
    },

    /// Category budgets add up to more than can be represented
    #[error("Total allocated to categories is too large")]
    AllocationOverflow,

    /// Budgets cannot be negative
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Money),

    /// Transaction amounts must be strictly positive
    #[error("Amount must be greater than zero: {0}")]
    NonPositiveAmount(Money),

    /// User input that is not a number
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    /// Category outside the configured set for the transaction type
    #[error("'{category}' is not a configured {kind} category")]
    UnknownCategory { category: String, kind: String },
}

/// Failures while encoding, decoding or locating backups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Payload is not JSON or is missing a mandatory section
    #[error("Malformed backup payload: {0}")]
    MalformedPayload(String),

    /// A field is present but holds the wrong kind of value
    #[error("Backup field '{field}' has the wrong type: expected {expected}")]
    TypeMismatch { field: String, expected: String },

    /// The named backup artifact does not exist
    #[error("Backup not found: {0}")]
    ArtifactNotFound(String),
}

/// The main error type for BudgetPal operations
#[derive(Error, Debug)]
pub enum BudgetPalError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Budget or transaction rule violations
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Backup encoding and restore errors
    #[error("Backup error: {0}")]
    Codec(#[from] CodecError),

    /// A typed id prefix matches more than one entity
    #[error("{entity_type} id prefix '{prefix}' is ambiguous; type more characters")]
    AmbiguousId {
        entity_type: &'static str,
        prefix: String,
    },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl BudgetPalError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The underlying validation error, if any
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// The underlying codec error, if any
    pub fn as_codec(&self) -> Option<&CodecError> {
        match self {
            Self::Codec(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BudgetPalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetPalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for BudgetPal operations
pub type BudgetPalResult<T> = Result<T, BudgetPalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BudgetPalError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BudgetPalError::transaction_not_found("abc");
        assert_eq!(err.to_string(), "Transaction not found: abc");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_allocation_error_display() {
        let err = ValidationError::AllocationExceedsMonthly {
            category: "Transportation".into(),
            requested: Money::from_cents(80_000),
            total: Money::from_cents(110_000),
            monthly: Money::from_cents(100_000),
        };
        assert_eq!(
            err.to_string(),
            "Budget of 800.00 for 'Transportation' brings the total allocated to 1100.00, \
             exceeding the monthly budget of 1000.00"
        );
    }

    #[test]
    fn test_validation_wraps() {
        let err: BudgetPalError = ValidationError::NegativeAmount(Money::from_cents(-1)).into();
        assert!(err.is_validation());
        assert_eq!(
            err.as_validation(),
            Some(&ValidationError::NegativeAmount(Money::from_cents(-1)))
        );
        assert!(err.as_codec().is_none());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BudgetPalError = io_err.into();
        assert!(matches!(err, BudgetPalError::Io(_)));
    }
}
