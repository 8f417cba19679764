//! Dashboard data types.

use chrono::NaiveDate;
use hearth_shared::types::BudgetYearId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tithe::TitheSummary;

/// Dashboard summary response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Budget year the figures cover.
    pub budget_year: PeriodInfo,
    /// Sum of incomes in the year.
    pub total_income: Decimal,
    /// Sum of expenses in the year.
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`.
    pub balance: Decimal,
    /// Yearly budget over funds included in the budget.
    pub total_budget: Decimal,
    /// Budget left after expenses.
    pub budget_remaining: Decimal,
    /// Tithe status.
    pub tithe: TitheSummary,
}

/// Budget year the summary was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInfo {
    /// Budget year ID.
    pub id: BudgetYearId,
    /// Budget year name.
    pub name: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
}
