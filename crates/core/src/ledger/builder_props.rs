//! Property-based tests for the entry builders.
//!
//! Every builder output balances exactly, carries the event amount on both
//! sides, and has exactly one nonzero side per line.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::builder::EntryBuilder;
use super::entry::JournalLineSpec;
use super::types::{BusinessEvent, LinkedAccounts};
use super::validation::validate_entry;

/// Strategy to generate a positive amount (0.0001 to 100,000,000.0000).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000_000i64).prop_map(|units| Decimal::new(units, 4))
}

fn optional_id(prefix: &'static str) -> impl Strategy<Value = Option<String>> {
    proptest::option::of((1u32..50).prop_map(move |n| format!("{prefix}{n}")))
}

fn linked() -> LinkedAccounts {
    LinkedAccounts::new()
        .with_cashbox("BOX-CASH", "1000")
        .with_cashbox("BOX-BANK", "1010")
        .with_partner("A", "3100")
        .with_partner("B", "3110")
}

/// Strategy covering every business event kind.
fn event_strategy() -> impl Strategy<Value = BusinessEvent> {
    (
        positive_amount(),
        optional_id("C"),
        optional_id("S"),
        optional_id("P"),
        any::<bool>(),
        0u8..11,
    )
        .prop_map(|(amount, client, supplier, project, flip, kind)| {
            let (from_box, to_box) = if flip {
                ("BOX-CASH", "BOX-BANK")
            } else {
                ("BOX-BANK", "BOX-CASH")
            };
            let (payer, receiver) = if flip { ("A", "B") } else { ("B", "A") };

            match kind {
                0 => BusinessEvent::Revenue {
                    amount,
                    account_id: "4000".into(),
                    client_id: client,
                    project_id: project,
                },
                1 => BusinessEvent::Expense {
                    amount,
                    account_id: "5200".into(),
                    supplier_id: supplier,
                    project_id: project,
                },
                2 => BusinessEvent::ClientInvoice {
                    amount,
                    client_id: client.unwrap_or_else(|| "C1".into()),
                    project_id: project,
                },
                3 => BusinessEvent::SupplierInvoice {
                    amount,
                    supplier_id: supplier.unwrap_or_else(|| "S1".into()),
                    project_id: project,
                },
                4 => BusinessEvent::ClientPayment {
                    amount,
                    cashbox_id: from_box.into(),
                    client_id: client.unwrap_or_else(|| "C1".into()),
                    project_id: project,
                },
                5 => BusinessEvent::SupplierPayment {
                    amount,
                    cashbox_id: to_box.into(),
                    supplier_id: supplier.unwrap_or_else(|| "S1".into()),
                    project_id: project,
                },
                6 => BusinessEvent::CashboxTransfer {
                    amount,
                    from_cashbox_id: from_box.into(),
                    to_cashbox_id: to_box.into(),
                },
                7 => BusinessEvent::MaterialConsumption {
                    amount,
                    project_id: project.unwrap_or_else(|| "P1".into()),
                },
                8 => BusinessEvent::PayrollAccrual {
                    amount,
                    project_id: project,
                },
                9 => BusinessEvent::PayrollPayment {
                    amount,
                    cashbox_id: from_box.into(),
                    project_id: project,
                },
                _ => BusinessEvent::PartnerSettlement {
                    amount,
                    from_partner_id: payer.into(),
                    to_partner_id: receiver.into(),
                },
            }
        })
}

fn build(event: &BusinessEvent) -> Vec<JournalLineSpec> {
    EntryBuilder::default()
        .build(event, &linked())
        .expect("generated events are well-formed")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Debits equal credits exactly and both equal the event amount.
    #[test]
    fn prop_builder_output_balances_exactly(event in event_strategy()) {
        let lines = build(&event);
        let total_debit: Decimal = lines.iter().map(|l| l.debit).sum();
        let total_credit: Decimal = lines.iter().map(|l| l.credit).sum();

        prop_assert!(lines.len() >= 2);
        prop_assert_eq!(total_debit, total_credit);
        prop_assert_eq!(total_debit, event.amount());
    }

    /// Exactly one side of every line is nonzero.
    #[test]
    fn prop_lines_are_single_sided(event in event_strategy()) {
        for line in build(&event) {
            prop_assert!(line.debit >= Decimal::ZERO && line.credit >= Decimal::ZERO);
            prop_assert!(
                line.side().is_some(),
                "line on {} has debit {} and credit {}",
                line.account_id,
                line.debit,
                line.credit
            );
        }
    }

    /// The validator accepts every builder output.
    #[test]
    fn prop_validator_accepts_builder_output(event in event_strategy()) {
        let lines = build(&event);
        prop_assert!(validate_entry(&lines).is_ok());
    }

    /// A project-tagged event tags every line; client and supplier tags only
    /// ride on receivables and payables.
    #[test]
    fn prop_tags_follow_routing_rules(event in event_strategy()) {
        let dims = event.dimensions();
        let lines = build(&event);

        if let Some(project) = dims.project_id {
            prop_assert!(lines.iter().all(|l| l.project_id.as_deref() == Some(project)));
        }
        for line in &lines {
            if line.client_id.is_some() {
                prop_assert_eq!(line.account_id.as_str(), "1100");
            }
            if line.supplier_id.is_some() {
                prop_assert_eq!(line.account_id.as_str(), "2000");
            }
        }
    }
}
