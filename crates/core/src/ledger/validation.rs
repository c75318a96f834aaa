//! The balance gate every candidate journal entry passes before persistence.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::entry::JournalLineSpec;

/// Largest debit/credit difference still treated as balanced (exclusive): 0.01.
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Validation errors for candidate journal entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Fewer than two lines were supplied.
    #[error("Journal entry must have at least 2 lines, got {count}")]
    TooFewLines {
        /// Number of lines supplied.
        count: usize,
    },

    /// Debits and credits differ by at least the tolerance.
    #[error("Journal entry is not balanced. Debit: {total_debit}, Credit: {total_credit}")]
    Unbalanced {
        /// Sum of all debits.
        total_debit: Decimal,
        /// Sum of all credits.
        total_credit: Decimal,
    },

    /// A single line carries both a debit and a credit.
    #[error("Line {index} has both a debit and a credit")]
    MixedLine {
        /// Zero-based position of the offending line.
        index: usize,
    },

    /// A line carries a negative debit or credit.
    #[error("Line {index} has a negative amount")]
    NegativeAmount {
        /// Zero-based position of the offending line.
        index: usize,
    },
}

/// Debit and credit totals of a line set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BalanceCheck {
    /// Whether `|total_debit - total_credit| < BALANCE_TOLERANCE`.
    pub is_balanced: bool,
    /// Sum of all debits.
    pub total_debit: Decimal,
    /// Sum of all credits.
    pub total_credit: Decimal,
    /// `total_debit - total_credit`.
    pub difference: Decimal,
}

/// Sums the debits and credits of a line set.
#[must_use]
pub fn check_balance(lines: &[JournalLineSpec]) -> BalanceCheck {
    let total_debit: Decimal = lines.iter().map(|l| l.debit).sum();
    let total_credit: Decimal = lines.iter().map(|l| l.credit).sum();
    let difference = total_debit - total_credit;

    BalanceCheck {
        is_balanced: difference.abs() < BALANCE_TOLERANCE,
        total_debit,
        total_credit,
        difference,
    }
}

/// Rejects any line set that may not be persisted as a journal entry.
///
/// Checks, in order: at least two lines, no negative amounts, no line with
/// both sides populated, and debits equal to credits within the tolerance.
///
/// # Errors
///
/// Returns the first `ValidationError` found.
pub fn validate_entry(lines: &[JournalLineSpec]) -> Result<(), ValidationError> {
    if lines.len() < 2 {
        return Err(ValidationError::TooFewLines { count: lines.len() });
    }

    for (index, line) in lines.iter().enumerate() {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount { index });
        }
        if line.is_mixed() {
            return Err(ValidationError::MixedLine { index });
        }
    }

    let check = check_balance(lines);
    if !check.is_balanced {
        return Err(ValidationError::Unbalanced {
            total_debit: check.total_debit,
            total_credit: check.total_credit,
        });
    }

    Ok(())
}
