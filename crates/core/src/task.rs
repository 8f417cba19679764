//! Household to-do items.

use chrono::NaiveDate;

use crate::error::DomainError;

/// Checks that a task can be completed.
///
/// # Errors
///
/// Returns `DomainError::AlreadyInState` if it is already complete.
pub fn ensure_can_complete(is_completed: bool) -> Result<(), DomainError> {
    if is_completed {
        return Err(DomainError::AlreadyInState("task is already completed".into()));
    }
    Ok(())
}

/// A new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// What to do.
    pub title: String,
    /// Details.
    pub description: Option<String>,
    /// Optional deadline.
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on a blank title.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_title(&self.title)
    }
}

/// Partial update of a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// New deadline; `Some(None)` clears it.
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on a blank title.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.title.as_deref().map_or(Ok(()), validate_title)
    }
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("task title must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_once() {
        assert!(ensure_can_complete(false).is_ok());
        assert!(ensure_can_complete(true).is_err());
    }

    #[test]
    fn test_blank_title_rejected() {
        let task = NewTask {
            title: " ".into(),
            description: None,
            due_date: None,
        };
        assert!(task.validate().is_err());
        assert!(TaskPatch::default().validate().is_ok());
    }
}
