//! Budget years: user-defined accounting periods.
//!
//! A user's budget years partition time into non-overlapping inclusive date
//! ranges. At most one of them is active. Incomes and expenses are pinned to
//! the year enclosing their date at write time.

mod activation;
mod range;

pub use activation::{ActivationError, active_count, successor_after_delete};
pub use range::{Resolution, default_for_date, find_overlap, ranges_overlap, resolve, validate_date_range};

use chrono::NaiveDate;
use hearth_shared::types::BudgetYearId;
use serde::{Deserialize, Serialize};

/// A budget year as seen by the rules in this module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetYear {
    /// Budget year ID.
    pub id: BudgetYearId,
    /// Display name, e.g. "2026".
    pub name: String,
    /// First day, inclusive.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
    /// Whether this is the user's active year.
    pub is_active: bool,
}

impl BudgetYear {
    /// Returns true if `date` lies within `[start_date, end_date]`.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Fields for a budget year about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudgetYear {
    /// Display name.
    pub name: String,
    /// First day, inclusive.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
}
