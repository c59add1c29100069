//! Shared traits and aliases for ledger records.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::participant::ParticipantKey;

/// Derived net position per participant: positive is owed, negative owes.
///
/// Ordered so every consumer iterates participants in the same sequence.
pub type Balances = BTreeMap<ParticipantKey, Decimal>;

/// Exposes a stable identifier for records supplied by persistence.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving monetary amounts.
pub trait Amounted {
    fn amount(&self) -> Decimal;
}

/// Associates records with the group whose ledger they belong to.
pub trait BelongsToGroup {
    fn group_id(&self) -> Uuid;
}

/// Converts a record into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}
