//! Report renderers for each CLI command.

use split_core::{
    format_balance, ledger_warnings, BalanceService, BalanceStyle, CurrencyFormatter,
    SettlementService, SimplifyService, SummaryService,
};
use serde::Serialize;
use split_domain::{Balances, GroupSnapshot, ParticipantKey, SuggestedTransfer};
use uuid::Uuid;

use super::output::Printer;
use crate::errors::{Result, SplitError};

/// Display label for a ledger party; guests are marked as such.
pub fn label(key: &ParticipantKey) -> String {
    match key {
        ParticipantKey::Member(_) => key.label(),
        ParticipantKey::Guest(_) => format!("{} (guest)", key.label()),
    }
}

fn group_title(group: &GroupSnapshot) -> String {
    group
        .name
        .clone()
        .unwrap_or_else(|| group.group_id.to_string())
}

pub fn balances(printer: &mut Printer<'_>, group: &GroupSnapshot, style: &BalanceStyle) -> Result<()> {
    printer.section(format!("Balances: {}", group_title(group)))?;
    let balances = BalanceService::compute_balances(&group.expenses, &group.settlements);
    if balances.is_empty() {
        return printer.info("No expenses recorded.");
    }
    for (key, balance) in &balances {
        let formatted = format_balance(*balance, style);
        let text = printer.toned(&formatted.text, formatted.tone());
        printer.info(format!("{:<40} {} {}", label(key), text, formatted.label))?;
    }
    Ok(())
}

pub fn suggestions(
    printer: &mut Printer<'_>,
    group: &GroupSnapshot,
    style: &BalanceStyle,
) -> Result<()> {
    printer.section(format!("Suggested transfers: {}", group_title(group)))?;
    let balances = BalanceService::compute_balances(&group.expenses, &group.settlements);
    let transfers = SimplifyService::simplify(&balances, style.scale());
    if transfers.is_empty() {
        return printer.success("Everyone is settled up.");
    }
    for transfer in &transfers {
        printer.info(transfer_line(transfer, style))?;
    }
    Ok(())
}

pub fn instructions(
    printer: &mut Printer<'_>,
    group: &GroupSnapshot,
    expense_ids: &[Uuid],
    style: &BalanceStyle,
) -> Result<()> {
    let expenses = if expense_ids.is_empty() {
        group.expenses.clone()
    } else {
        expense_ids
            .iter()
            .map(|id| {
                group
                    .expense(*id)
                    .cloned()
                    .ok_or_else(|| SplitError::InvalidRef(format!("expense {id} not found")))
            })
            .collect::<Result<Vec<_>>>()?
    };

    printer.section(format!("Settlement instructions: {}", group_title(group)))?;
    let instructions =
        SettlementService::build_settlement_instructions(&expenses, &group.settlements);
    if instructions.is_empty() {
        return printer.success("Nothing left to settle.");
    }
    for instruction in &instructions {
        let title = instruction
            .expense_id
            .and_then(|id| group.expense(id))
            .map(|expense| expense.title.as_str())
            .unwrap_or("-");
        printer.info(format!("[{title}] {}", transfer_line(instruction, style)))?;
    }
    Ok(())
}

pub fn remaining(
    printer: &mut Printer<'_>,
    group: &GroupSnapshot,
    expense_id: Uuid,
    style: &BalanceStyle,
) -> Result<()> {
    let expense = group
        .expense(expense_id)
        .ok_or_else(|| SplitError::InvalidRef(format!("expense {expense_id} not found")))?;
    let payer = expense.payer_key();

    printer.section(format!(
        "{} ({})",
        expense.title,
        style.format_amount(expense.amount)
    ))?;
    for key in expense.participant_keys() {
        if payer.as_ref() == Some(&key) {
            printer.info(format!("{:<40} paid", label(&key)))?;
            continue;
        }
        let left = SettlementService::remaining_for_participant(expense, &key, &group.settlements);
        printer.info(format!(
            "{:<40} {} of {} left",
            label(&key),
            style.format_amount(left),
            style.format_amount(expense.share_of(&key))
        ))?;
    }

    if SettlementService::is_fully_settled(expense, &group.settlements) {
        printer.success("Fully settled.")
    } else {
        let total = SettlementService::remaining_for_expense(expense, &group.settlements);
        printer.info(format!("Outstanding: {}", style.format_amount(total)))
    }
}

pub fn summary(
    printer: &mut Printer<'_>,
    group: &GroupSnapshot,
    participant: &ParticipantKey,
    style: &BalanceStyle,
) -> Result<()> {
    let summary = SummaryService::member_summary(group, participant, style);
    printer.section(format!("Summary for {}", label(participant)))?;
    let text = printer.toned(&summary.formatted.text, summary.formatted.tone());
    printer.info(format!("Balance:     {} {}", text, summary.formatted.label))?;
    printer.info(format!("Paid:        {}", style.format_amount(summary.paid_total)))?;
    printer.info(format!("Share:       {}", style.format_amount(summary.share_total)))?;
    printer.info(format!("Group total: {}", style.format_amount(summary.group_total)))?;
    if summary.transfers.is_empty() {
        return printer.success("No transfers involve this participant.");
    }
    printer.section("Your transfers")?;
    for transfer in &summary.transfers {
        printer.info(transfer_line(transfer, style))?;
    }
    Ok(())
}

pub fn warnings(printer: &mut Printer<'_>, group: &GroupSnapshot, style: &BalanceStyle) -> Result<()> {
    printer.section(format!("Ledger check: {}", group_title(group)))?;
    let warnings = ledger_warnings(group, style.scale());
    if warnings.is_empty() {
        return printer.success("No issues found.");
    }
    for warning in &warnings {
        printer.warning(warning)?;
    }
    Ok(())
}

/// Machine-readable view of a group for other front ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub group_id: Uuid,
    pub balances: Balances,
    pub transfers: Vec<SuggestedTransfer>,
    pub instructions: Vec<SuggestedTransfer>,
    pub warnings: Vec<String>,
}

impl GroupReport {
    pub fn build(group: &GroupSnapshot, scale: u32) -> Self {
        let balances = BalanceService::compute_balances(&group.expenses, &group.settlements);
        Self {
            group_id: group.group_id,
            transfers: SimplifyService::simplify(&balances, scale),
            balances: BalanceService::rounded(&balances, scale),
            instructions: SettlementService::build_settlement_instructions(
                &group.expenses,
                &group.settlements,
            ),
            warnings: ledger_warnings(group, scale),
        }
    }
}

pub fn export(printer: &mut Printer<'_>, group: &GroupSnapshot, style: &BalanceStyle) -> Result<()> {
    let report = GroupReport::build(group, style.scale());
    printer.info(serde_json::to_string_pretty(&report)?)
}

fn transfer_line(transfer: &SuggestedTransfer, style: &BalanceStyle) -> String {
    format!(
        "{} -> {}: {}",
        label(&transfer.from),
        label(&transfer.to),
        style.format_amount(transfer.amount)
    )
}
