//! Recorded settlements and engine-suggested transfers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, participant::*};

/// Append-only repayment record: `from` paid `to` the given amount.
///
/// `expense_id` scopes the repayment to one expense; `None` is a general
/// settlement against the aggregate balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settlement {
    pub id: Uuid,
    pub group_id: Uuid,
    #[serde(default)]
    pub from: ParticipantRef,
    #[serde(default)]
    pub to: ParticipantRef,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_id: Option<Uuid>,
    pub settled_at: DateTime<Utc>,
}

impl Settlement {
    pub fn new(
        group_id: Uuid,
        from: ParticipantRef,
        to: ParticipantRef,
        amount: Decimal,
        expense_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            from,
            to,
            amount,
            expense_id,
            settled_at: Utc::now(),
        }
    }

    /// Turns a suggested transfer into a record the caller can persist.
    pub fn from_transfer(
        group_id: Uuid,
        transfer: &SuggestedTransfer,
        settled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            from: ParticipantRef::from(&transfer.from),
            to: ParticipantRef::from(&transfer.to),
            amount: transfer.amount,
            expense_id: transfer.expense_id,
            settled_at,
        }
    }

    pub fn is_general(&self) -> bool {
        self.expense_id.is_none()
    }

    pub fn is_scoped_to(&self, expense_id: Uuid) -> bool {
        self.expense_id == Some(expense_id)
    }
}

impl Identifiable for Settlement {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Settlement {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl BelongsToGroup for Settlement {
    fn group_id(&self) -> Uuid {
        self.group_id
    }
}

/// Derived, ephemeral repayment suggestion.
///
/// Aggregate suggestions carry no expense; per-expense instructions carry
/// the originating `expense_id` so the recorded settlement stays traceable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestedTransfer {
    pub from: ParticipantKey,
    pub to: ParticipantKey,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_id: Option<Uuid>,
}

impl SuggestedTransfer {
    pub fn new(from: ParticipantKey, to: ParticipantKey, amount: Decimal) -> Self {
        Self {
            from,
            to,
            amount,
            expense_id: None,
        }
    }

    pub fn for_expense(
        expense_id: Uuid,
        from: ParticipantKey,
        to: ParticipantKey,
        amount: Decimal,
    ) -> Self {
        Self {
            from,
            to,
            amount,
            expense_id: Some(expense_id),
        }
    }

    pub fn involves(&self, key: &ParticipantKey) -> bool {
        &self.from == key || &self.to == key
    }
}

impl Displayable for SuggestedTransfer {
    fn display_label(&self) -> String {
        format!("{} -> {}: {}", self.from, self.to, self.amount)
    }
}
