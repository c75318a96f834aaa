//! Ledger error types.
//!
//! Validation failures are raised before any I/O and block the whole business
//! action. Store failures surface as `Infrastructure` and are never turned
//! into a zero balance.

use rust_decimal::Decimal;
use thiserror::Error;

use super::validation::ValidationError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The candidate entry failed the balance gate.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A business event carried a zero or negative amount.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// A business event is malformed (e.g. a transfer to the same cashbox).
    #[error("Invalid business event: {0}")]
    InvalidEvent(String),

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record (client, supplier, cashbox, ...).
        entity: &'static str,
        /// The id that did not resolve.
        id: String,
    },

    /// A unique key on a source record was violated.
    #[error("Already exists: {0}")]
    ConstraintViolation(String),

    /// The ledger store is unreachable or a transaction failed to commit.
    #[error("Ledger store error: {0}")]
    Infrastructure(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(ValidationError::TooFewLines { .. }) => "TOO_FEW_LINES",
            Self::Validation(ValidationError::Unbalanced { .. }) => "UNBALANCED_ENTRY",
            Self::Validation(ValidationError::MixedLine { .. }) => "MIXED_LINE",
            Self::Validation(ValidationError::NegativeAmount { .. }) => "NEGATIVE_AMOUNT",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidEvent(_) => "INVALID_EVENT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ConstraintViolation(_) => "ALREADY_EXISTS",
            Self::Infrastructure(_) => "LEDGER_STORE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InvalidAmount(_) | Self::InvalidEvent(_) => 400,
            Self::NotFound { .. } => 404,
            Self::ConstraintViolation(_) => 409,
            Self::Infrastructure(_) => 500,
        }
    }

    /// Shorthand for a `NotFound` error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::from(ValidationError::TooFewLines { count: 1 }).error_code(),
            "TOO_FEW_LINES"
        );
        assert_eq!(
            LedgerError::from(ValidationError::Unbalanced {
                total_debit: dec!(100),
                total_credit: dec!(50),
            })
            .error_code(),
            "UNBALANCED_ENTRY"
        );
        assert_eq!(
            LedgerError::ConstraintViolation("x".into()).error_code(),
            "ALREADY_EXISTS"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(
            LedgerError::from(ValidationError::MixedLine { index: 0 }).http_status_code(),
            400
        );
        assert_eq!(LedgerError::InvalidAmount(dec!(0)).http_status_code(), 400);
        assert_eq!(LedgerError::not_found("client", "C1").http_status_code(), 404);
        assert_eq!(
            LedgerError::ConstraintViolation("x".into()).http_status_code(),
            409
        );
        assert_eq!(
            LedgerError::Infrastructure("down".into()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::from(ValidationError::Unbalanced {
            total_debit: dec!(1000.00),
            total_credit: dec!(999.98),
        });
        assert_eq!(
            err.to_string(),
            "Journal entry is not balanced. Debit: 1000.00, Credit: 999.98"
        );
        assert_eq!(
            LedgerError::not_found("cashbox", "BOX9").to_string(),
            "cashbox not found: BOX9"
        );
    }
}
