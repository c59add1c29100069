//! Per-expense repayment tracking.
//!
//! A participant's obligation on an expense is their share minus every
//! settlement scoped to that expense that they paid to its payer. General
//! settlements never reduce a per-expense remainder.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use split_domain::{Expense, ParticipantKey, Settlement, SuggestedTransfer};
use tracing::{debug, info};

use crate::{money::round_to_minor, CoreError};

pub struct SettlementService;

impl SettlementService {
    /// What `participant` still owes the payer of `expense`, never negative.
    ///
    /// The payer owes themselves nothing, and an expense without a payer
    /// has no one to repay. Negative settlement amounts are ignored so the
    /// remainder can only shrink as settlements are recorded.
    pub fn remaining_for_participant(
        expense: &Expense,
        participant: &ParticipantKey,
        settlements: &[Settlement],
    ) -> Decimal {
        let Some(payer) = expense.payer_key() else {
            return Decimal::ZERO;
        };
        if &payer == participant {
            return Decimal::ZERO;
        }
        let settled = Self::settled_toward(expense, &payer, participant, settlements);
        (expense.share_of(participant) - settled).max(Decimal::ZERO)
    }

    /// Sum of remainders over every non-payer participant.
    pub fn remaining_for_expense(expense: &Expense, settlements: &[Settlement]) -> Decimal {
        expense
            .participant_keys()
            .iter()
            .map(|key| Self::remaining_for_participant(expense, key, settlements))
            .sum()
    }

    pub fn is_fully_settled(expense: &Expense, settlements: &[Settlement]) -> bool {
        Self::remaining_for_expense(expense, settlements).is_zero()
    }

    /// One instruction per (expense, participant) with something left to
    /// pay, in expense order then participant order. Each carries its
    /// expense id.
    pub fn build_settlement_instructions(
        expenses: &[Expense],
        settlements: &[Settlement],
    ) -> Vec<SuggestedTransfer> {
        let mut instructions = Vec::new();
        for expense in expenses {
            let Some(payer) = expense.payer_key() else {
                debug!(expense = %expense.id, "no payer; no instructions");
                continue;
            };
            for key in expense.participant_keys() {
                let remaining = Self::remaining_for_participant(expense, &key, settlements);
                if remaining > Decimal::ZERO {
                    instructions.push(SuggestedTransfer::for_expense(
                        expense.id,
                        key,
                        payer.clone(),
                        remaining,
                    ));
                }
            }
        }
        debug!(
            expenses = expenses.len(),
            instructions = instructions.len(),
            "settlement instructions built"
        );
        instructions
    }

    /// Validates a repayment of `amount` by `from` toward `expense` and
    /// returns the settlement record to persist.
    ///
    /// The amount must be positive, a whole number of minor units at
    /// `scale`, and no larger than what `from` still owes on this expense.
    pub fn prepare_settlement(
        expense: &Expense,
        from: &ParticipantKey,
        amount: Decimal,
        scale: u32,
        settlements: &[Settlement],
        settled_at: DateTime<Utc>,
    ) -> Result<Settlement, CoreError> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::InvalidAmount(format!(
                "settlement amount must be positive, got {amount}"
            )));
        }
        if round_to_minor(amount, scale) != amount {
            return Err(CoreError::InvalidAmount(format!(
                "{amount} is finer than the currency's minor unit"
            )));
        }
        let payer = expense
            .payer_key()
            .ok_or_else(|| CoreError::Validation(format!("expense {} has no payer", expense.id)))?;
        if &payer == from {
            return Err(CoreError::Validation(format!(
                "{from} paid expense {} and cannot settle with themselves",
                expense.id
            )));
        }
        let remaining = Self::remaining_for_participant(expense, from, settlements);
        if amount > remaining {
            return Err(CoreError::ExceedsRemaining {
                requested: amount,
                remaining,
            });
        }

        let transfer = SuggestedTransfer::for_expense(expense.id, from.clone(), payer, amount);
        let settlement = Settlement::from_transfer(expense.group_id, &transfer, settled_at);
        info!(
            expense = %expense.id,
            from = %transfer.from,
            to = %transfer.to,
            %amount,
            "settlement prepared"
        );
        Ok(settlement)
    }

    fn settled_toward(
        expense: &Expense,
        payer: &ParticipantKey,
        participant: &ParticipantKey,
        settlements: &[Settlement],
    ) -> Decimal {
        settlements
            .iter()
            .filter(|settlement| settlement.is_scoped_to(expense.id))
            .filter(|settlement| settlement.to.key().as_ref() == Some(payer))
            .filter(|settlement| settlement.from.key().as_ref() == Some(participant))
            .map(|settlement| settlement.amount.max(Decimal::ZERO))
            .sum()
    }
}
