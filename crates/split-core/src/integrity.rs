//! Read-only consistency checks over a group snapshot.
//!
//! The ledger itself tolerates every problem reported here; the warnings
//! exist so callers can surface data that will not reconcile the way a
//! user expects.

use std::collections::HashSet;

use rust_decimal::Decimal;
use split_domain::{Amounted, BelongsToGroup, Displayable, GroupSnapshot, Identifiable};
use uuid::Uuid;

use crate::money::within_minor_unit;

/// Human-readable warnings, in snapshot order.
pub fn ledger_warnings(group: &GroupSnapshot, scale: u32) -> Vec<String> {
    let mut warnings = Vec::new();
    let expense_ids: HashSet<Uuid> = group.expenses.iter().map(|expense| expense.id).collect();

    for expense in &group.expenses {
        let label = format!("expense {} [{}]", expense.id(), expense.display_label());
        record_checks(&mut warnings, &label, expense, group.group_id);
        if expense.payer_key().is_none() {
            warnings.push(format!("{label} has no payer and is left out of balances"));
        }
        let blank_shares = expense
            .participants
            .iter()
            .filter(|share| share.key().is_none())
            .count();
        if blank_shares > 0 {
            warnings.push(format!("{label} has {blank_shares} share(s) without a participant"));
        }
        let total = expense.shares_total();
        if !within_minor_unit(total, expense.amount, scale) {
            warnings.push(format!(
                "{label} shares total {total} but amount is {}",
                expense.amount
            ));
        }
    }

    for settlement in &group.settlements {
        let label = format!("settlement {}", settlement.id());
        record_checks(&mut warnings, &label, settlement, group.group_id);
        if settlement.from.key().is_none() || settlement.to.key().is_none() {
            warnings.push(format!("{label} has an unresolvable party and is ignored"));
        }
        if let Some(expense_id) = settlement.expense_id {
            if !expense_ids.contains(&expense_id) {
                warnings.push(format!("{label} references unknown expense {expense_id}"));
            }
        }
    }

    warnings.extend(overpaid_shares(group));
    warnings
}

/// Checks shared by every ledger record: group membership and a positive amount.
fn record_checks<R>(warnings: &mut Vec<String>, label: &str, record: &R, group_id: Uuid)
where
    R: Amounted + BelongsToGroup,
{
    if record.group_id() != group_id {
        warnings.push(format!("{label} belongs to group {}", record.group_id()));
    }
    if record.amount() <= Decimal::ZERO {
        warnings.push(format!("{label} has non-positive amount {}", record.amount()));
    }
}

fn overpaid_shares(group: &GroupSnapshot) -> Vec<String> {
    let mut warnings = Vec::new();
    for expense in &group.expenses {
        let Some(payer) = expense.payer_key() else {
            continue;
        };
        for key in expense.participant_keys() {
            if key == payer {
                continue;
            }
            let settled: Decimal = group
                .settlements
                .iter()
                .filter(|s| s.is_scoped_to(expense.id))
                .filter(|s| s.from.key().as_ref() == Some(&key))
                .filter(|s| s.to.key().as_ref() == Some(&payer))
                .map(|s| s.amount.max(Decimal::ZERO))
                .sum();
            let share = expense.share_of(&key);
            if settled > share {
                warnings.push(format!(
                    "{} settled {settled} toward expense {} against a share of {share}",
                    key.label(),
                    expense.id
                ));
            }
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use split_domain::{Expense, ParticipantRef, Settlement};

    #[test]
    fn clean_snapshot_has_no_warnings() {
        let group_id = Uuid::from_u128(100);
        let mut group = GroupSnapshot::new(group_id);
        group.add_expense(
            Expense::new(
                group_id,
                "Fuel",
                dec!(20),
                ParticipantRef::member(Uuid::from_u128(1)),
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            )
            .with_share(ParticipantRef::guest("Kim"), dec!(20)),
        );
        assert!(ledger_warnings(&group, 2).is_empty());
    }

    #[test]
    fn reports_mismatches_and_overpayments() {
        let group_id = Uuid::from_u128(100);
        let alice = Uuid::from_u128(1);
        let mut group = GroupSnapshot::new(group_id);
        let expense_id = group.add_expense(
            Expense::new(
                group_id,
                "Fuel",
                dec!(20),
                ParticipantRef::member(alice),
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            )
            .with_share(ParticipantRef::guest("Kim"), dec!(15)),
        );
        group.add_settlement(Settlement::new(
            group_id,
            ParticipantRef::guest("Kim"),
            ParticipantRef::member(alice),
            dec!(16),
            Some(expense_id),
        ));
        group.add_settlement(Settlement::new(
            Uuid::from_u128(7),
            ParticipantRef::guest("Kim"),
            ParticipantRef::default(),
            dec!(1),
            Some(Uuid::from_u128(8)),
        ));

        let warnings = ledger_warnings(&group, 2);

        assert_eq!(warnings.len(), 5, "{warnings:#?}");
        assert!(warnings[0].contains("shares total 15"));
        assert!(warnings.iter().any(|w| w.contains("belongs to group")));
        assert!(warnings.iter().any(|w| w.contains("unresolvable party")));
        assert!(warnings.iter().any(|w| w.contains("unknown expense")));
        assert!(warnings.last().unwrap().contains("Kim settled 16"));
    }
}
