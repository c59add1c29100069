//! Greedy debt simplification over net balances.

use rust_decimal::Decimal;
use split_domain::{Balances, Displayable, ParticipantKey, SuggestedTransfer};
use tracing::{debug, trace};

use crate::money::{minor_unit, round_to_minor};

pub struct SimplifyService;

impl SimplifyService {
    /// Suggests transfers that bring every balance to zero.
    ///
    /// Balances are rounded to the minor unit first; anything within one
    /// minor unit of zero is already settled. Creditors and debtors are each sorted by
    /// magnitude, largest first, and matched pairwise, moving
    /// `min(credit, debt)` per step. Ties keep participant-key order so the
    /// output is deterministic.
    ///
    /// This is the greedy largest-first heuristic, not a minimum-transfer
    /// solver. It emits at most `creditors + debtors - 1` transfers.
    pub fn simplify(balances: &Balances, scale: u32) -> Vec<SuggestedTransfer> {
        let mut creditors: Vec<(ParticipantKey, Decimal)> = Vec::new();
        let mut debtors: Vec<(ParticipantKey, Decimal)> = Vec::new();

        let epsilon = minor_unit(scale);

        for (key, balance) in balances {
            let rounded = round_to_minor(*balance, scale);
            if rounded > epsilon {
                creditors.push((key.clone(), rounded));
            } else if rounded < -epsilon {
                debtors.push((key.clone(), -rounded));
            }
        }

        creditors.sort_by(|a, b| b.1.cmp(&a.1));
        debtors.sort_by(|a, b| b.1.cmp(&a.1));

        let mut transfers = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < creditors.len() && j < debtors.len() {
            let amount = creditors[i].1.min(debtors[j].1);
            let transfer =
                SuggestedTransfer::new(debtors[j].0.clone(), creditors[i].0.clone(), amount);
            trace!(transfer = %transfer.display_label(), "matched");
            transfers.push(transfer);
            creditors[i].1 -= amount;
            debtors[j].1 -= amount;
            if creditors[i].1.is_zero() {
                i += 1;
            }
            if debtors[j].1.is_zero() {
                j += 1;
            }
        }

        // Leftovers mean the input did not sum to zero at this scale.
        let unmatched: Decimal = creditors[i..]
            .iter()
            .chain(&debtors[j..])
            .map(|(_, amount)| *amount)
            .sum();
        if !unmatched.is_zero() {
            debug!(%unmatched, "balances were not conserved; residue left unmatched");
        }

        debug!(
            creditors = creditors.len(),
            debtors = debtors.len(),
            transfers = transfers.len(),
            "suggested transfers computed"
        );
        transfers
    }

    /// Applies transfers to a copy of `balances`: the payer's balance rises
    /// and the receiver's falls.
    pub fn apply(balances: &Balances, transfers: &[SuggestedTransfer]) -> Balances {
        let mut applied = balances.clone();
        for transfer in transfers {
            *applied.entry(transfer.from.clone()).or_insert(Decimal::ZERO) += transfer.amount;
            *applied.entry(transfer.to.clone()).or_insert(Decimal::ZERO) -= transfer.amount;
        }
        applied
    }
}
