//! Revert/apply planning for `FundBudget.spent`.

use hearth_shared::types::{BudgetYearId, FundId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What one expense adds to a fund budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Fund the expense is charged to.
    pub fund_id: FundId,
    /// Budget year the expense date falls in.
    pub budget_year_id: BudgetYearId,
    /// Expense amount.
    pub amount: Decimal,
}

impl Contribution {
    /// The (fund, budget year) key this contribution lands on.
    #[must_use]
    pub const fn bucket(&self) -> (FundId, BudgetYearId) {
        (self.fund_id, self.budget_year_id)
    }
}

/// A signed change to one fund budget's `spent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Fund to adjust.
    pub fund_id: FundId,
    /// Budget year to adjust.
    pub budget_year_id: BudgetYearId,
    /// Amount added to `spent`; negative when reverting.
    pub delta: Decimal,
}

impl Adjustment {
    fn apply(c: &Contribution) -> Self {
        Self {
            fund_id: c.fund_id,
            budget_year_id: c.budget_year_id,
            delta: c.amount,
        }
    }

    fn revert(c: &Contribution) -> Self {
        Self {
            fund_id: c.fund_id,
            budget_year_id: c.budget_year_id,
            delta: -c.amount,
        }
    }
}

/// Adjustments for a newly created expense.
#[must_use]
pub fn plan_create(new: &Contribution) -> Vec<Adjustment> {
    vec![Adjustment::apply(new)]
}

/// Adjustments for a deleted expense.
#[must_use]
pub fn plan_delete(old: &Contribution) -> Vec<Adjustment> {
    vec![Adjustment::revert(old)]
}

/// Adjustments for an edited expense: revert `old`, then apply `new`.
///
/// Both steps are always emitted, even when the bucket is unchanged, so the
/// net effect on a shared bucket is `new.amount - old.amount`.
#[must_use]
pub fn plan_update(old: &Contribution, new: &Contribution) -> Vec<Adjustment> {
    vec![Adjustment::revert(old), Adjustment::apply(new)]
}
