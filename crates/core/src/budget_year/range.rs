//! Date-range rules: validation, overlap, and resolution of a date to its year.

use chrono::{Datelike, NaiveDate};
use hearth_shared::types::BudgetYearId;

use super::{BudgetYear, NewBudgetYear};
use crate::error::DomainError;

/// Requires `start_date <= end_date`. A single-day year is allowed.
///
/// # Errors
///
/// Returns `DomainError::Validation` when the range is inverted.
pub fn validate_date_range(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), DomainError> {
    if start_date > end_date {
        return Err(DomainError::validation(format!(
            "start_date {start_date} is after end_date {end_date}"
        )));
    }
    Ok(())
}

/// Two inclusive ranges `[s1, e1]` and `[s2, e2]` overlap iff `s1 <= e2 && s2 <= e1`.
#[must_use]
pub fn ranges_overlap(s1: NaiveDate, e1: NaiveDate, s2: NaiveDate, e2: NaiveDate) -> bool {
    s1 <= e2 && s2 <= e1
}

/// Finds the first of `years` overlapping `[start, end]`, skipping `exclude`.
#[must_use]
pub fn find_overlap<'a>(
    years: &'a [BudgetYear],
    start: NaiveDate,
    end: NaiveDate,
    exclude: Option<BudgetYearId>,
) -> Option<&'a BudgetYear> {
    years
        .iter()
        .filter(|y| Some(y.id) != exclude)
        .find(|y| ranges_overlap(y.start_date, y.end_date, start, end))
}

/// Outcome of resolving a date to a budget year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The chosen year.
    pub budget_year_id: BudgetYearId,
    /// How many years enclosed the date. Anything above 1 is corrupt data.
    pub matches: usize,
}

impl Resolution {
    /// True when more than one year enclosed the date.
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        self.matches > 1
    }
}

/// Picks the year enclosing `date`. On multiple matches the lowest
/// `start_date` wins and the caller is expected to log the anomaly.
///
/// # Errors
///
/// Returns `DomainError::NoBudgetYearForDate` when nothing encloses `date`.
pub fn resolve(years: &[BudgetYear], date: NaiveDate) -> Result<Resolution, DomainError> {
    let mut enclosing: Vec<&BudgetYear> = years.iter().filter(|y| y.contains(date)).collect();
    enclosing.sort_by_key(|y| y.start_date);

    let first = enclosing
        .first()
        .ok_or(DomainError::NoBudgetYearForDate(date))?;

    Ok(Resolution {
        budget_year_id: first.id,
        matches: enclosing.len(),
    })
}

/// The calendar year containing `date`, used when a user registers.
#[must_use]
pub fn default_for_date(date: NaiveDate) -> NewBudgetYear {
    let year = date.year();
    NewBudgetYear {
        name: year.to_string(),
        start_date: NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(date),
        end_date: NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn year(name: &str, start: NaiveDate, end: NaiveDate) -> BudgetYear {
        BudgetYear {
            id: BudgetYearId::new(),
            name: name.to_string(),
            start_date: start,
            end_date: end,
            is_active: false,
        }
    }

    #[rstest]
    #[case(d(2024, 1, 1), d(2024, 6, 30), d(2024, 6, 1), d(2024, 12, 31), true)]
    #[case(d(2024, 1, 1), d(2024, 6, 30), d(2024, 6, 30), d(2024, 12, 31), true)]
    #[case(d(2024, 1, 1), d(2024, 6, 30), d(2024, 7, 1), d(2024, 12, 31), false)]
    #[case(d(2024, 3, 1), d(2024, 3, 31), d(2024, 1, 1), d(2024, 12, 31), true)]
    #[case(d(2025, 1, 1), d(2025, 12, 31), d(2024, 1, 1), d(2024, 12, 31), false)]
    fn test_ranges_overlap(
        #[case] s1: NaiveDate,
        #[case] e1: NaiveDate,
        #[case] s2: NaiveDate,
        #[case] e2: NaiveDate,
        #[case] expected: bool,
    ) {
        assert_eq!(ranges_overlap(s1, e1, s2, e2), expected);
        assert_eq!(ranges_overlap(s2, e2, s1, e1), expected);
    }

    #[test]
    fn test_overlapping_second_half_rejected() {
        let years = vec![year("H1", d(2024, 1, 1), d(2024, 6, 30))];
        let hit = find_overlap(&years, d(2024, 6, 1), d(2024, 12, 31), None);
        assert_eq!(hit.map(|y| y.name.as_str()), Some("H1"));
    }

    #[test]
    fn test_update_excludes_itself() {
        let years = vec![year("2024", d(2024, 1, 1), d(2024, 12, 31))];
        let own_id = years[0].id;
        assert!(find_overlap(&years, d(2024, 2, 1), d(2024, 12, 31), Some(own_id)).is_none());
    }

    #[test]
    fn test_validate_date_range() {
        assert!(validate_date_range(d(2024, 1, 1), d(2024, 1, 1)).is_ok());
        assert!(matches!(
            validate_date_range(d(2024, 2, 1), d(2024, 1, 1)),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_resolve_inclusive_bounds() {
        let years = vec![year("2024", d(2024, 1, 1), d(2024, 12, 31))];
        assert_eq!(resolve(&years, d(2024, 1, 1)).unwrap().budget_year_id, years[0].id);
        assert_eq!(resolve(&years, d(2024, 12, 31)).unwrap().budget_year_id, years[0].id);
    }

    #[test]
    fn test_resolve_outside_every_year() {
        let years = vec![year("2024", d(2024, 1, 1), d(2024, 12, 31))];
        assert_eq!(
            resolve(&years, d(2025, 1, 1)),
            Err(DomainError::NoBudgetYearForDate(d(2025, 1, 1)))
        );
    }

    #[test]
    fn test_resolve_ambiguous_picks_lowest_start() {
        let later = year("late", d(2024, 3, 1), d(2024, 12, 31));
        let earlier = year("early", d(2024, 1, 1), d(2024, 6, 30));
        let years = vec![later, earlier.clone()];

        let resolution = resolve(&years, d(2024, 4, 15)).unwrap();
        assert_eq!(resolution.budget_year_id, earlier.id);
        assert!(resolution.is_ambiguous());
    }

    #[test]
    fn test_default_for_date() {
        let new = default_for_date(d(2026, 10, 18));
        assert_eq!(new.name, "2026");
        assert_eq!(new.start_date, d(2026, 1, 1));
        assert_eq!(new.end_date, d(2026, 12, 31));
    }

    proptest! {
        /// Overlap is symmetric and agrees with "some day lies in both ranges".
        #[test]
        fn prop_overlap_matches_shared_day(
            a in 0i64..400, a_len in 0i64..60,
            b in 0i64..400, b_len in 0i64..60,
        ) {
            let base = d(2024, 1, 1);
            let (s1, e1) = (base + chrono::Duration::days(a), base + chrono::Duration::days(a + a_len));
            let (s2, e2) = (base + chrono::Duration::days(b), base + chrono::Duration::days(b + b_len));

            let shared = (a..=a + a_len).any(|day| day >= b && day <= b + b_len);
            prop_assert_eq!(ranges_overlap(s1, e1, s2, e2), shared);
            prop_assert_eq!(ranges_overlap(s1, e1, s2, e2), ranges_overlap(s2, e2, s1, e1));
        }
    }
}
