//! Tithe obligations derived from income.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ledger::validate_amount;

/// Percentage used when the user has no `tithe_percentage` setting.
pub const DEFAULT_TITHE_PERCENTAGE: Decimal = Decimal::TEN;

/// Required, given and remaining tithe for one budget year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitheSummary {
    /// Income the tithe is computed from.
    pub total_income: Decimal,
    /// Percentage applied.
    pub percentage: Decimal,
    /// `total_income * percentage / 100`.
    pub required: Decimal,
    /// Sum of recorded tithe payments.
    pub given: Decimal,
    /// `max(0, required - given)`.
    pub remaining: Decimal,
}

impl TitheSummary {
    /// Computes the summary. `percentage` falls back to
    /// [`DEFAULT_TITHE_PERCENTAGE`] when `None`.
    #[must_use]
    pub fn compute(total_income: Decimal, percentage: Option<Decimal>, given: Decimal) -> Self {
        let percentage = percentage.unwrap_or(DEFAULT_TITHE_PERCENTAGE);
        let required = total_income * percentage / Decimal::ONE_HUNDRED;
        let remaining = (required - given).max(Decimal::ZERO);
        Self {
            total_income,
            percentage,
            required,
            given,
            remaining,
        }
    }
}

/// A tithe payment to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTitheGiven {
    /// Amount given.
    pub amount: Decimal,
    /// Date given; selects the budget year.
    pub date: NaiveDate,
    /// Who received it.
    pub recipient: Option<String>,
    /// Free-form note.
    pub note: Option<String>,
}

impl NewTitheGiven {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on a negative amount.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_amount(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(5000), None, dec!(0), dec!(500), dec!(500))]
    #[case(dec!(5000), None, dec!(200), dec!(500), dec!(300))]
    #[case(dec!(5000), None, dec!(800), dec!(500), dec!(0))]
    #[case(dec!(5000), Some(dec!(12.5)), dec!(0), dec!(625), dec!(625))]
    #[case(dec!(0), None, dec!(0), dec!(0), dec!(0))]
    fn test_compute(
        #[case] income: Decimal,
        #[case] pct: Option<Decimal>,
        #[case] given: Decimal,
        #[case] required: Decimal,
        #[case] remaining: Decimal,
    ) {
        let summary = TitheSummary::compute(income, pct, given);
        assert_eq!(summary.required, required);
        assert_eq!(summary.remaining, remaining);
    }

    #[test]
    fn test_default_percentage_is_ten() {
        let summary = TitheSummary::compute(dec!(100), None, Decimal::ZERO);
        assert_eq!(summary.percentage, dec!(10));
    }
}
