//! Builds validated expenses from user input.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use split_domain::{Expense, ParticipantKey, ParticipantRef};
use tracing::info;
use uuid::Uuid;

use crate::{
    money::{split_equally, within_minor_unit},
    CoreError,
};

/// Header fields of an expense before its shares are decided.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub group_id: Uuid,
    pub title: String,
    pub amount: Decimal,
    pub payer: ParticipantRef,
    pub date: NaiveDate,
}

impl ExpenseDraft {
    pub fn new(
        group_id: Uuid,
        title: impl Into<String>,
        amount: Decimal,
        payer: ParticipantRef,
        date: NaiveDate,
    ) -> Self {
        Self {
            group_id,
            title: title.into(),
            amount,
            payer,
            date,
        }
    }
}

pub struct ExpenseService;

impl ExpenseService {
    /// Splits the draft amount equally between `participants` in the given
    /// order; the last participant absorbs the rounding remainder.
    pub fn equal_split(
        draft: ExpenseDraft,
        participants: &[ParticipantRef],
        scale: u32,
    ) -> Result<Expense, CoreError> {
        Self::validate_header(&draft)?;
        Self::validate_participants(participants.iter())?;
        let shares = split_equally(draft.amount, participants.len(), scale)?;
        let expense = participants
            .iter()
            .zip(shares)
            .fold(Self::blank(draft), |expense, (participant, share)| {
                expense.with_share(participant.clone(), share)
            });
        info!(expense = %expense.id, shares = expense.participants.len(), "equal split created");
        Ok(expense)
    }

    /// Accepts explicit shares. Shares may be zero but not negative, and
    /// must add up to the draft amount within one minor unit.
    pub fn custom_split(
        draft: ExpenseDraft,
        shares: &[(ParticipantRef, Decimal)],
        scale: u32,
    ) -> Result<Expense, CoreError> {
        Self::validate_header(&draft)?;
        Self::validate_participants(shares.iter().map(|(participant, _)| participant))?;
        if let Some((participant, amount)) = shares.iter().find(|(_, amount)| *amount < Decimal::ZERO)
        {
            return Err(CoreError::Validation(format!(
                "share for {} is negative ({amount})",
                participant.key().map(|key| key.label()).unwrap_or_default()
            )));
        }
        let actual: Decimal = shares.iter().map(|(_, amount)| *amount).sum();
        if !within_minor_unit(actual, draft.amount, scale) {
            return Err(CoreError::ShareMismatch {
                expected: draft.amount,
                actual,
            });
        }
        let expense = shares
            .iter()
            .fold(Self::blank(draft), |expense, (participant, amount)| {
                expense.with_share(participant.clone(), *amount)
            });
        info!(expense = %expense.id, shares = expense.participants.len(), "custom split created");
        Ok(expense)
    }

    fn blank(draft: ExpenseDraft) -> Expense {
        Expense::new(draft.group_id, draft.title, draft.amount, draft.payer, draft.date)
    }

    fn validate_header(draft: &ExpenseDraft) -> Result<(), CoreError> {
        if draft.title.trim().is_empty() {
            return Err(CoreError::Validation("expense title is required".into()));
        }
        if draft.amount <= Decimal::ZERO {
            return Err(CoreError::InvalidAmount(format!(
                "expense amount must be positive, got {}",
                draft.amount
            )));
        }
        if draft.payer.key().is_none() {
            return Err(CoreError::Validation("expense payer is missing".into()));
        }
        Ok(())
    }

    fn validate_participants<'a>(
        participants: impl Iterator<Item = &'a ParticipantRef>,
    ) -> Result<(), CoreError> {
        let mut seen: Vec<ParticipantKey> = Vec::new();
        for participant in participants {
            let key = participant
                .key()
                .ok_or_else(|| CoreError::Validation("participant has no identity".into()))?;
            if seen.contains(&key) {
                return Err(CoreError::Validation(format!(
                    "participant {} listed twice",
                    key.label()
                )));
            }
            seen.push(key);
        }
        if seen.is_empty() {
            return Err(CoreError::InvalidParticipantCount(0));
        }
        Ok(())
    }
}
