//! Read-side rollups for the dashboard.
//!
//! Nothing here is stored; every figure is recomputed from the ledger on read.

pub mod types;

pub use types::*;

use rust_decimal::Decimal;

use crate::fund::{FundType, total_budget};
use crate::tithe::TitheSummary;

/// Builds the dashboard summary from the year's tithe figures, its expense
/// total and the user's funds.
///
/// Income is taken from `tithe.total_income` so the two views agree.
/// `funds` yields `(type, include_in_budget, amount)` for the year.
pub fn summarize<I>(
    period: PeriodInfo,
    tithe: TitheSummary,
    total_expenses: Decimal,
    funds: I,
) -> DashboardSummary
where
    I: IntoIterator<Item = (FundType, bool, Decimal)>,
{
    let total_budget = total_budget(funds);
    DashboardSummary {
        budget_year: period,
        total_income: tithe.total_income,
        total_expenses,
        balance: tithe.total_income - total_expenses,
        total_budget,
        budget_remaining: total_budget - total_expenses,
        tithe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hearth_shared::types::BudgetYearId;
    use rust_decimal_macros::dec;

    fn period() -> PeriodInfo {
        PeriodInfo {
            id: BudgetYearId::new(),
            name: "2024".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        }
    }

    #[test]
    fn test_summarize() {
        let tithe = TitheSummary::compute(dec!(80000), None, dec!(2500));
        let funds = [
            (FundType::Monthly, true, dec!(2000)),
            (FundType::Annual, true, dec!(10000)),
            (FundType::Savings, false, dec!(5000)),
        ];

        let summary = summarize(period(), tithe, dec!(30000), funds);

        assert_eq!(summary.total_income, dec!(80000));
        assert_eq!(summary.tithe, tithe);
        assert_eq!(summary.balance, dec!(50000));
        assert_eq!(summary.total_budget, dec!(34000));
        assert_eq!(summary.budget_remaining, dec!(4000));
        assert_eq!(summary.tithe.required, dec!(8000));
        assert_eq!(summary.tithe.remaining, dec!(5500));
    }

    #[test]
    fn test_negative_balance() {
        let tithe = TitheSummary::compute(dec!(100), Some(dec!(5)), Decimal::ZERO);
        let summary = summarize(period(), tithe, dec!(250), Vec::new());
        assert_eq!(summary.balance, dec!(-150));
        assert_eq!(summary.tithe.required, dec!(5));
    }
}
