//! Inputs for ledger mutations.
//!
//! Updates are patches: `None` leaves a field untouched. For nullable columns
//! the patch holds `Option<Option<T>>`, where `Some(None)` clears the value.

use chrono::{Datelike, NaiveDate};
use hearth_shared::types::CategoryId;
use rust_decimal::Decimal;

use crate::error::DomainError;

/// Rejects negative amounts.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `amount < 0`.
pub fn validate_amount(amount: Decimal) -> Result<(), DomainError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(DomainError::validation(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    Ok(())
}

/// Month (1-12) and year of a date, stored alongside incomes for grouping.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn month_and_year(date: NaiveDate) -> (i16, i32) {
    (date.month() as i16, date.year())
}

/// A new expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Category, which fixes the fund.
    pub category_id: CategoryId,
    /// Amount spent.
    pub amount: Decimal,
    /// Date spent; selects the budget year.
    pub date: NaiveDate,
    /// Short description.
    pub name: String,
    /// Free-form note.
    pub note: Option<String>,
}

impl NewExpense {
    /// Validates amount and name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on a negative amount or blank name.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_amount(self.amount)?;
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("expense name must not be empty"));
        }
        Ok(())
    }
}

/// Partial update of an expense.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    /// New category (moves the expense to that category's fund).
    pub category_id: Option<CategoryId>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New date (may move the expense to another budget year).
    pub date: Option<NaiveDate>,
    /// New name.
    pub name: Option<String>,
    /// New note; `Some(None)` clears it.
    pub note: Option<Option<String>>,
}

impl ExpensePatch {
    /// Validates the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on a negative amount or blank name.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::validation("expense name must not be empty"));
        }
        Ok(())
    }

    /// True when the patch can move the expense's ledger contribution.
    #[must_use]
    pub const fn touches_ledger(&self) -> bool {
        self.category_id.is_some() || self.amount.is_some() || self.date.is_some()
    }
}

/// A new income record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncome {
    /// Amount received.
    pub amount: Decimal,
    /// Date received; selects the budget year.
    pub date: NaiveDate,
    /// Where it came from.
    pub source: String,
    /// Free-form note.
    pub note: Option<String>,
}

impl NewIncome {
    /// Validates amount and source.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on a negative amount or blank source.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_amount(self.amount)?;
        if self.source.trim().is_empty() {
            return Err(DomainError::validation("income source must not be empty"));
        }
        Ok(())
    }
}

/// Partial update of an income record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomePatch {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New date.
    pub date: Option<NaiveDate>,
    /// New source.
    pub source: Option<String>,
    /// New note; `Some(None)` clears it.
    pub note: Option<Option<String>>,
}

impl IncomePatch {
    /// Validates the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on a negative amount or blank source.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if self.source.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(DomainError::validation("income source must not be empty"));
        }
        Ok(())
    }
}
