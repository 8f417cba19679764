//! Exclusive activation of budget years.
//!
//! Activation is "deactivate all, then activate one" inside a single store
//! transaction, so the rules here only decide what the outcome should be.

use hearth_shared::types::BudgetYearId;
use thiserror::Error;

use super::BudgetYear;

/// Violations of the single-active-year rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivationError {
    /// More than one year is flagged active.
    #[error("{0} budget years are active, expected at most one")]
    MultipleActive(usize),
}

/// Counts active years, failing if the single-active rule is broken.
///
/// # Errors
///
/// Returns `ActivationError::MultipleActive` if more than one is active.
pub fn active_count(years: &[BudgetYear]) -> Result<usize, ActivationError> {
    match years.iter().filter(|y| y.is_active).count() {
        n if n > 1 => Err(ActivationError::MultipleActive(n)),
        n => Ok(n),
    }
}

/// Picks the year to activate after the active one is deleted: the
/// remaining year with the latest `start_date`, if any.
#[must_use]
pub fn successor_after_delete(remaining: &[BudgetYear]) -> Option<BudgetYearId> {
    remaining.iter().max_by_key(|y| y.start_date).map(|y| y.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn year(start_year: i32, is_active: bool) -> BudgetYear {
        BudgetYear {
            id: BudgetYearId::new(),
            name: start_year.to_string(),
            start_date: NaiveDate::from_ymd_opt(start_year, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(start_year, 12, 31).unwrap(),
            is_active,
        }
    }

    #[test]
    fn test_successor_is_latest_start() {
        let years = vec![year(2022, false), year(2024, false), year(2023, false)];
        assert_eq!(successor_after_delete(&years), Some(years[1].id));
    }

    #[test]
    fn test_no_successor_when_empty() {
        assert_eq!(successor_after_delete(&[]), None);
    }

    #[test]
    fn test_active_count() {
        assert_eq!(active_count(&[year(2023, false), year(2024, true)]), Ok(1));
        assert_eq!(active_count(&[]), Ok(0));
        assert_eq!(
            active_count(&[year(2023, true), year(2024, true)]),
            Err(ActivationError::MultipleActive(2))
        );
    }
}
