//! Folds expense and settlement history into per-participant balances.

use rust_decimal::Decimal;
use split_domain::{Balances, Expense, ParticipantKey, Settlement};
use tracing::debug;

use crate::money::{minor_unit, round_to_minor};

/// Builds the group ledger from scratch on every call.
///
/// Nothing is cached: balances are a pure function of the full expense
/// and settlement history, so concurrent readers always agree.
pub struct BalanceService;

impl BalanceService {
    /// Computes net balances (positive is owed, negative owes).
    ///
    /// Each expense credits its payer by `amount` and debits every
    /// participant by their share, so a payer who is also a participant
    /// nets out their own share. Each settlement credits `from` and debits
    /// `to`.
    ///
    /// Malformed rows never raise. An expense or settlement whose parties
    /// cannot be resolved is skipped as a whole. A share row without an
    /// identity stays with the payer. Both rules keep the sum of all
    /// balances at zero.
    pub fn compute_balances(expenses: &[Expense], settlements: &[Settlement]) -> Balances {
        let mut balances = Balances::new();
        let mut skipped_rows = 0usize;

        for expense in expenses {
            let Some(payer) = expense.payer_key() else {
                debug!(expense = %expense.id, "skipping expense without a resolvable payer");
                skipped_rows += 1;
                continue;
            };
            adjust(&mut balances, &payer, expense.amount);
            for share in &expense.participants {
                match share.key() {
                    Some(key) => adjust(&mut balances, &key, -share.share_amount),
                    None => {
                        debug!(
                            expense = %expense.id,
                            "share row has no participant identity; payer keeps it"
                        );
                        skipped_rows += 1;
                        adjust(&mut balances, &payer, -share.share_amount);
                    }
                }
            }
        }

        for settlement in settlements {
            match (settlement.from.key(), settlement.to.key()) {
                (Some(from), Some(to)) => {
                    adjust(&mut balances, &from, settlement.amount);
                    adjust(&mut balances, &to, -settlement.amount);
                }
                _ => {
                    debug!(settlement = %settlement.id, "skipping settlement with unresolvable party");
                    skipped_rows += 1;
                }
            }
        }

        debug!(
            expenses = expenses.len(),
            settlements = settlements.len(),
            participants = balances.len(),
            skipped_rows,
            "balances recomputed"
        );
        balances
    }

    /// Rounded balance of one participant; zero when they have no entry.
    pub fn balance_of(balances: &Balances, key: &ParticipantKey, scale: u32) -> Decimal {
        balances
            .get(key)
            .map(|balance| round_to_minor(*balance, scale))
            .unwrap_or(Decimal::ZERO)
    }

    /// Sum of every balance. Zero for a consistent ledger.
    pub fn total(balances: &Balances) -> Decimal {
        balances.values().copied().sum()
    }

    /// `true` when balances sum to zero within one minor unit.
    pub fn is_conserved(balances: &Balances, scale: u32) -> bool {
        Self::total(balances).abs() <= minor_unit(scale)
    }

    /// Copy of `balances` with every entry rounded to the minor unit.
    pub fn rounded(balances: &Balances, scale: u32) -> Balances {
        balances
            .iter()
            .map(|(key, balance)| (key.clone(), round_to_minor(*balance, scale)))
            .collect()
    }
}

fn adjust(balances: &mut Balances, key: &ParticipantKey, delta: Decimal) {
    *balances.entry(key.clone()).or_insert(Decimal::ZERO) += delta;
}
