//! Debts owed by the household.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ledger::validate_amount;

/// Debt lifecycle. `Unpaid -> Paid` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    /// Still owed.
    Unpaid,
    /// Settled.
    Paid,
}

impl std::fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unpaid => write!(f, "unpaid"),
            Self::Paid => write!(f, "paid"),
        }
    }
}

impl std::str::FromStr for DebtStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unpaid" => Ok(Self::Unpaid),
            "paid" => Ok(Self::Paid),
            _ => Err(DomainError::validation(format!("unknown debt status '{s}'"))),
        }
    }
}

/// Checks that a debt can be marked paid.
///
/// # Errors
///
/// Returns `DomainError::AlreadyInState` if it is already paid.
pub fn ensure_can_mark_paid(status: DebtStatus) -> Result<(), DomainError> {
    match status {
        DebtStatus::Unpaid => Ok(()),
        DebtStatus::Paid => Err(DomainError::AlreadyInState("debt is already paid".into())),
    }
}

/// A new debt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDebt {
    /// Short description.
    pub name: String,
    /// Who is owed.
    pub creditor: Option<String>,
    /// Amount owed.
    pub amount: Decimal,
    /// When it falls due.
    pub due_date: Option<NaiveDate>,
    /// Free-form note.
    pub note: Option<String>,
}

impl NewDebt {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on a blank name or negative amount.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_amount(self.amount)?;
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("debt name must not be empty"));
        }
        Ok(())
    }
}

/// Partial update of a debt. Status changes go through mark-paid only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebtPatch {
    /// New name.
    pub name: Option<String>,
    /// New creditor; `Some(None)` clears it.
    pub creditor: Option<Option<String>>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New due date; `Some(None)` clears it.
    pub due_date: Option<Option<NaiveDate>>,
    /// New note; `Some(None)` clears it.
    pub note: Option<Option<String>>,
}

impl DebtPatch {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on a blank name or negative amount.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::validation("debt name must not be empty"));
        }
        Ok(())
    }
}
