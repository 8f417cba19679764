//! Fund budget ledger.
//!
//! Every expense contributes its amount to the `spent` total of exactly one
//! (fund, budget year) pair. Mutations are expressed as a list of
//! [`Adjustment`]s which the store applies with one atomic increment each:
//!
//! - create: apply the new contribution
//! - update: revert the old contribution, then apply the new one
//! - delete: revert the old contribution
//!
//! Incomes resolve a budget year but never adjust fund totals.

mod plan;
mod types;

#[cfg(test)]
mod tests;

pub use plan::{Adjustment, Contribution, plan_create, plan_delete, plan_update};
pub use types::{
    ExpensePatch, IncomePatch, NewExpense, NewIncome, month_and_year, validate_amount,
};
