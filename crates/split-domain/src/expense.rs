//! Shared expense records and their participant shares.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, participant::*};

/// A shared expense: one payer, many participants owing a share each.
///
/// Shares are expected to sum to `amount` within one minor unit; that is
/// checked where expenses are constructed, not by the ledger. The payer
/// may or may not appear among the participants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub payer: ParticipantRef,
    #[serde(default)]
    pub participants: Vec<ExpenseShare>,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(
        group_id: Uuid,
        title: impl Into<String>,
        amount: Decimal,
        payer: ParticipantRef,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            title: title.into(),
            amount,
            payer,
            participants: Vec::new(),
            date,
        }
    }

    pub fn with_share(mut self, participant: ParticipantRef, share_amount: Decimal) -> Self {
        self.participants.push(ExpenseShare {
            participant,
            share_amount,
        });
        self
    }

    pub fn payer_key(&self) -> Option<ParticipantKey> {
        self.payer.key()
    }

    /// Total share owed by `key` on this expense (zero when absent).
    pub fn share_of(&self, key: &ParticipantKey) -> Decimal {
        self.participants
            .iter()
            .filter(|share| share.key().as_ref() == Some(key))
            .map(|share| share.share_amount)
            .sum()
    }

    pub fn shares_total(&self) -> Decimal {
        self.participants.iter().map(|share| share.share_amount).sum()
    }

    /// Distinct participant keys in first-seen order, malformed rows skipped.
    pub fn participant_keys(&self) -> Vec<ParticipantKey> {
        let mut keys: Vec<ParticipantKey> = Vec::with_capacity(self.participants.len());
        for key in self.participants.iter().filter_map(ExpenseShare::key) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl BelongsToGroup for Expense {
    fn group_id(&self) -> Uuid {
        self.group_id
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} ({}) on {}", self.title, self.amount, self.date)
    }
}

/// One participant's portion of an expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseShare {
    #[serde(default)]
    pub participant: ParticipantRef,
    #[serde(default)]
    pub share_amount: Decimal,
}

impl ExpenseShare {
    pub fn new(participant: ParticipantRef, share_amount: Decimal) -> Self {
        Self {
            participant,
            share_amount,
        }
    }

    pub fn key(&self) -> Option<ParticipantKey> {
        self.participant.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn dinner() -> Expense {
        let alice = Uuid::from_u128(1);
        let bob = Uuid::from_u128(2);
        Expense::new(
            Uuid::from_u128(100),
            "Dinner",
            dec!(90),
            ParticipantRef::member(alice),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        )
        .with_share(ParticipantRef::member(alice), dec!(30))
        .with_share(ParticipantRef::member(bob), dec!(30))
        .with_share(ParticipantRef::guest("Kim"), dec!(30))
    }

    #[test]
    fn share_lookup_matches_by_key() {
        let expense = dinner();
        let bob = ParticipantKey::Member(Uuid::from_u128(2));
        assert_eq!(expense.share_of(&bob), dec!(30));
        assert_eq!(expense.share_of(&ParticipantKey::Guest("Kim".into())), dec!(30));
        assert_eq!(expense.share_of(&ParticipantKey::Guest("Nobody".into())), Decimal::ZERO);
        assert_eq!(expense.shares_total(), dec!(90));
        assert_eq!(expense.participant_keys().len(), 3);
    }

    #[test]
    fn missing_numbers_deserialize_as_zero() {
        let raw = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "group_id": "00000000-0000-0000-0000-000000000064",
            "payer": { "user_id": "00000000-0000-0000-0000-000000000002" },
            "participants": [ { "participant": { "guest_name": "Kim" } } ],
            "date": "2025-03-01"
        }"#;
        let expense: Expense = serde_json::from_str(raw).expect("parse expense");
        assert_eq!(expense.amount, Decimal::ZERO);
        assert_eq!(expense.participants[0].share_amount, Decimal::ZERO);
        assert!(expense.title.is_empty());
    }

    #[test]
    fn amounts_accept_json_numbers_and_strings() {
        let raw = r#"{
            "id": "00000000-0000-0000-0000-000000000001",
            "group_id": "00000000-0000-0000-0000-000000000064",
            "amount": 12.5,
            "payer": { "guest_name": "Kim" },
            "participants": [ { "participant": { "guest_name": "Kim" }, "share_amount": "12.50" } ],
            "date": "2025-03-01"
        }"#;
        let expense: Expense = serde_json::from_str(raw).expect("parse expense");
        assert_eq!(expense.amount, dec!(12.5));
        assert_eq!(expense.participants[0].share_amount, dec!(12.50));
    }
}
