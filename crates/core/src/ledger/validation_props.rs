//! Property-based tests for the balance validator.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::entry::JournalLineSpec;
use super::validation::{check_balance, validate_entry, ValidationError, BALANCE_TOLERANCE};

/// Strategy to generate a positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate an imbalance of at least the tolerance.
fn imbalance() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate an imbalance strictly below the tolerance.
fn sub_tolerance() -> impl Strategy<Value = Decimal> {
    (0i64..100i64).prop_map(|ten_thousandths| Decimal::new(ten_thousandths, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any imbalance of 0.01 or more is rejected with both totals.
    #[test]
    fn prop_imbalance_rejected(amount in positive_amount(), delta in imbalance()) {
        let lines = vec![
            JournalLineSpec::debit("1100", amount + delta),
            JournalLineSpec::credit("4000", amount),
        ];

        prop_assert_eq!(
            validate_entry(&lines),
            Err(ValidationError::Unbalanced {
                total_debit: amount + delta,
                total_credit: amount,
            })
        );
    }

    /// Differences below the tolerance pass.
    #[test]
    fn prop_sub_tolerance_accepted(amount in positive_amount(), delta in sub_tolerance()) {
        let lines = vec![
            JournalLineSpec::debit("1100", amount),
            JournalLineSpec::credit("4000", amount + delta),
        ];

        prop_assert!(delta < BALANCE_TOLERANCE);
        prop_assert!(validate_entry(&lines).is_ok());
        prop_assert!(check_balance(&lines).is_balanced);
    }

    /// Fewer than two lines are rejected whatever the amounts.
    #[test]
    fn prop_single_line_rejected(amount in positive_amount(), debit in any::<bool>()) {
        let line = if debit {
            JournalLineSpec::debit("1100", amount)
        } else {
            JournalLineSpec::credit("4000", amount)
        };

        prop_assert_eq!(
            validate_entry(&[line]),
            Err(ValidationError::TooFewLines { count: 1 })
        );
    }

    /// A line with both sides populated is rejected even when totals balance.
    #[test]
    fn prop_mixed_line_rejected(a in positive_amount(), b in positive_amount()) {
        let mut mixed = JournalLineSpec::debit("1100", a);
        mixed.credit = b;
        let lines = vec![
            mixed,
            JournalLineSpec::debit("5100", b),
            JournalLineSpec::credit("4000", a),
        ];

        prop_assert!(check_balance(&lines).is_balanced);
        prop_assert_eq!(
            validate_entry(&lines),
            Err(ValidationError::MixedLine { index: 0 })
        );
    }

    /// Splitting one side over many lines keeps an entry balanced.
    #[test]
    fn prop_split_lines_balance(parts in prop::collection::vec(positive_amount(), 1..10)) {
        let total: Decimal = parts.iter().copied().sum();
        let mut lines: Vec<JournalLineSpec> = parts
            .iter()
            .map(|amount| JournalLineSpec::debit("5100", *amount))
            .collect();
        lines.push(JournalLineSpec::credit("2000", total));

        let check = check_balance(&lines);
        prop_assert!(check.is_balanced);
        prop_assert_eq!(check.total_debit, total);
        prop_assert!(validate_entry(&lines).is_ok());
    }
}
