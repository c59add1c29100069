//! Bundles one group's expense and settlement history.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{expense::Expense, settlement::Settlement};

/// Read-only view of everything the engine needs for one group.
///
/// The persistence layer fills this from its own tables; the engine
/// recomputes every derived figure from it on each request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupSnapshot {
    pub group_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

impl GroupSnapshot {
    pub fn new(group_id: Uuid) -> Self {
        Self {
            group_id,
            name: None,
            expenses: Vec::new(),
            settlements: Vec::new(),
        }
    }

    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        id
    }

    pub fn add_settlement(&mut self, settlement: Settlement) -> Uuid {
        let id = settlement.id;
        self.settlements.push(settlement);
        id
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn expense_count(&self) -> usize {
        self.expenses.len()
    }
}
