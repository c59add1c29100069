//! Per-member overview of a group.

use rust_decimal::Decimal;
use split_domain::{Expense, GroupSnapshot, ParticipantKey, SuggestedTransfer};

use crate::{
    balance_service::BalanceService,
    format::{format_balance, BalanceStyle, FormattedBalance},
    settlement_service::SettlementService,
    simplify_service::SimplifyService,
};

#[derive(Debug, Clone, PartialEq)]
pub struct MemberSummary {
    pub participant: ParticipantKey,
    pub balance: Decimal,
    pub formatted: FormattedBalance,
    /// Total the member paid as payer.
    pub paid_total: Decimal,
    /// Total of the member's shares across every expense.
    pub share_total: Decimal,
    pub group_total: Decimal,
    /// Aggregate suggestions where the member pays or receives.
    pub transfers: Vec<SuggestedTransfer>,
    /// Per-expense instructions where the member pays or receives.
    pub instructions: Vec<SuggestedTransfer>,
}

pub struct SummaryService;

impl SummaryService {
    /// Sum of every expense amount in the group.
    pub fn group_total(expenses: &[Expense]) -> Decimal {
        expenses.iter().map(|expense| expense.amount).sum()
    }

    pub fn member_summary(
        group: &GroupSnapshot,
        member: &ParticipantKey,
        style: &BalanceStyle,
    ) -> MemberSummary {
        let scale = style.scale();
        let balances = BalanceService::compute_balances(&group.expenses, &group.settlements);
        let balance = BalanceService::balance_of(&balances, member, scale);
        let transfers = SimplifyService::simplify(&balances, scale)
            .into_iter()
            .filter(|transfer| transfer.involves(member))
            .collect();
        let instructions =
            SettlementService::build_settlement_instructions(&group.expenses, &group.settlements)
                .into_iter()
                .filter(|instruction| instruction.involves(member))
                .collect();
        let paid_total = group
            .expenses
            .iter()
            .filter(|expense| expense.payer_key().as_ref() == Some(member))
            .map(|expense| expense.amount)
            .sum();
        let share_total = group
            .expenses
            .iter()
            .map(|expense| expense.share_of(member))
            .sum();

        MemberSummary {
            participant: member.clone(),
            balance,
            formatted: format_balance(balance, style),
            paid_total,
            share_total,
            group_total: Self::group_total(&group.expenses),
            transfers,
            instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use split_domain::{currency::CurrencyCode, currency::LocaleConfig, ParticipantRef};
    use uuid::Uuid;

    #[test]
    fn summarizes_one_member() {
        let group_id = Uuid::from_u128(100);
        let alice = Uuid::from_u128(1);
        let bob = Uuid::from_u128(2);
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let mut group = GroupSnapshot::new(group_id);
        group.add_expense(
            Expense::new(group_id, "Hotel", dec!(3000), ParticipantRef::member(alice), date)
                .with_share(ParticipantRef::member(alice), dec!(1000))
                .with_share(ParticipantRef::member(bob), dec!(1000))
                .with_share(ParticipantRef::guest("Kim"), dec!(1000)),
        );
        group.add_expense(
            Expense::new(group_id, "Lunch", dec!(600), ParticipantRef::member(bob), date)
                .with_share(ParticipantRef::member(alice), dec!(300))
                .with_share(ParticipantRef::member(bob), dec!(300)),
        );
        let style = BalanceStyle::new(CurrencyCode::new("JPY"), LocaleConfig::for_tag("en-US"));

        let summary = SummaryService::member_summary(&group, &ParticipantKey::Member(alice), &style);

        assert_eq!(summary.balance, dec!(1700));
        assert_eq!(summary.formatted.text, "+¥1,700");
        assert_eq!(summary.paid_total, dec!(3000));
        assert_eq!(summary.share_total, dec!(1300));
        assert_eq!(summary.group_total, dec!(3600));
        assert!(summary.transfers.iter().all(|t| t.to == ParticipantKey::Member(alice)));
        assert_eq!(
            summary.transfers.iter().map(|t| t.amount).sum::<Decimal>(),
            dec!(1700)
        );
        assert_eq!(summary.instructions.len(), 3);
    }
}
