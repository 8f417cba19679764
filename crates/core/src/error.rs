//! Domain error taxonomy.
//!
//! Every error here is deterministic given the same input and stored state.
//! Store connectivity failures never appear here; the database crate wraps
//! them separately.

use chrono::NaiveDate;
use hearth_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by budgeting rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Entity does not exist or belongs to another user.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. "expense".
        entity: &'static str,
        /// Requested ID.
        id: Uuid,
    },

    /// A per-user unique name is already taken.
    #[error("{entity} name already exists: {name}")]
    DuplicateName {
        /// Entity kind.
        entity: &'static str,
        /// The conflicting name.
        name: String,
    },

    /// Budget year range overlaps another of the user's years.
    #[error("Budget year overlaps with existing year: {0}")]
    OverlappingBudgetYear(String),

    /// No budget year encloses the date.
    #[error("No budget year covers date {0}")]
    NoBudgetYearForDate(NaiveDate),

    /// Deletion refused because dependent rows exist.
    #[error("{entity} still has {dependents}")]
    HasDependentData {
        /// Entity kind being deleted.
        entity: &'static str,
        /// Description of what depends on it.
        dependents: &'static str,
    },

    /// The requested one-way transition already happened.
    #[error("{0}")]
    AlreadyInState(String),

    /// Malformed input.
    #[error("{0}")]
    Validation(String),

    /// A store-level constraint rejected the write.
    #[error("{0}")]
    ConstraintViolation(String),
}

impl DomainError {
    /// Shorthand for `NotFound`.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<Uuid>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Shorthand for `Validation`.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::NotFound { .. } => Self::NotFound(message),
            DomainError::DuplicateName { .. } => Self::DuplicateName(message),
            DomainError::OverlappingBudgetYear(name) => Self::OverlappingBudgetYear(name),
            DomainError::NoBudgetYearForDate(date) => Self::NoBudgetYearForDate(date.to_string()),
            DomainError::HasDependentData { .. } => Self::HasDependentData(message),
            DomainError::AlreadyInState(_) => Self::AlreadyInState(message),
            DomainError::Validation(_) => Self::Validation(message),
            DomainError::ConstraintViolation(_) => Self::ConstraintViolation(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let id = Uuid::nil();
        let err = DomainError::not_found("expense", id);
        assert_eq!(err.to_string(), format!("expense not found: {id}"));
    }

    #[test]
    fn test_maps_to_app_error_kinds() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let app: AppError = DomainError::NoBudgetYearForDate(date).into();
        assert_eq!(app.status_code(), 422);
        assert_eq!(app.to_string(), "No budget year covers date 2025-01-01");

        let app: AppError = DomainError::OverlappingBudgetYear("2024".into()).into();
        assert_eq!(app.error_code(), "overlapping_budget_year");

        let app: AppError = DomainError::HasDependentData {
            entity: "category",
            dependents: "expenses",
        }
        .into();
        assert_eq!(app.to_string(), "Cannot delete: category still has expenses");
    }
}
