//! Funds: named budget buckets and their per-year balances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// How a fund's budget is expressed and how its remaining balance is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundType {
    /// Budget amount is per month; remaining is tracked against `amount_given`.
    Monthly,
    /// Budget amount is for the whole year.
    Annual,
    /// Accumulating savings bucket.
    Savings,
}

impl FundType {
    /// Multiplier turning the stored amount into a yearly figure.
    #[must_use]
    pub const fn periods_per_year(self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Annual | Self::Savings => 1,
        }
    }
}

impl std::fmt::Display for FundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Annual => write!(f, "annual"),
            Self::Savings => write!(f, "savings"),
        }
    }
}

impl std::str::FromStr for FundType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "annual" => Ok(Self::Annual),
            "savings" => Ok(Self::Savings),
            _ => Err(DomainError::validation(format!(
                "unknown fund type '{s}', expected monthly, annual or savings"
            ))),
        }
    }
}

/// Priority tier of a fund, 1 (highest) to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct FundLevel(i16);

impl FundLevel {
    /// Lowest accepted level.
    pub const MIN: i16 = 1;
    /// Highest accepted level.
    pub const MAX: i16 = 3;

    /// Returns the raw level.
    #[must_use]
    pub const fn get(self) -> i16 {
        self.0
    }
}

impl Default for FundLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<i16> for FundLevel {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::validation(format!(
                "fund level must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }
}

impl From<FundLevel> for i16 {
    fn from(level: FundLevel) -> Self {
        level.0
    }
}

/// Per-(fund, budget year) allocation and running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FundBalance {
    /// Allocated amount.
    pub amount: Decimal,
    /// Amount handed out (monthly funds).
    pub amount_given: Decimal,
    /// Sum of live expenses.
    pub spent: Decimal,
}

impl FundBalance {
    /// `amount - amount_given` for monthly funds, `amount - spent` otherwise.
    #[must_use]
    pub fn remaining(&self, fund_type: FundType) -> Decimal {
        match fund_type {
            FundType::Monthly => self.amount - self.amount_given,
            FundType::Annual | FundType::Savings => self.amount - self.spent,
        }
    }
}

/// A fund's contribution to the yearly budget total.
#[must_use]
pub fn annualized_amount(fund_type: FundType, amount: Decimal) -> Decimal {
    amount * Decimal::from(fund_type.periods_per_year())
}

/// Sums the yearly figure over funds flagged `include_in_budget`.
pub fn total_budget<I>(funds: I) -> Decimal
where
    I: IntoIterator<Item = (FundType, bool, Decimal)>,
{
    funds
        .into_iter()
        .filter(|(_, include, _)| *include)
        .map(|(fund_type, _, amount)| annualized_amount(fund_type, amount))
        .sum()
}

/// Amount a fund starts with in a freshly created budget year: the amount
/// it had in the currently active year, or zero.
#[must_use]
pub fn seed_amount(active_year_amount: Option<Decimal>) -> Decimal {
    active_year_amount.unwrap_or(Decimal::ZERO)
}

/// Trims a fund or category name and rejects blanks.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an empty name.
pub fn normalize_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("name must not be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_remaining_monthly_uses_amount_given() {
        let balance = FundBalance {
            amount: dec!(1000),
            amount_given: dec!(300),
            spent: dec!(900),
        };
        assert_eq!(balance.remaining(FundType::Monthly), dec!(700));
        assert_eq!(balance.remaining(FundType::Annual), dec!(100));
        assert_eq!(balance.remaining(FundType::Savings), dec!(100));
    }

    #[test]
    fn test_total_budget_annualizes_monthly() {
        let total = total_budget([
            (FundType::Monthly, true, dec!(1000)),
            (FundType::Annual, true, dec!(50000)),
            (FundType::Savings, false, dec!(99999)),
        ]);
        assert_eq!(total, dec!(62000));
    }

    #[test]
    fn test_fund_level_bounds() {
        assert!(FundLevel::try_from(0).is_err());
        assert_eq!(FundLevel::try_from(2).unwrap().get(), 2);
        assert!(FundLevel::try_from(4).is_err());
    }

    #[test]
    fn test_fund_type_parse() {
        assert_eq!(FundType::from_str("Monthly").unwrap(), FundType::Monthly);
        assert_eq!(FundType::from_str("savings").unwrap(), FundType::Savings);
        assert!(FundType::from_str("weekly").is_err());
        assert_eq!(FundType::Annual.to_string(), "annual");
    }

    #[test]
    fn test_seed_amount() {
        assert_eq!(seed_amount(Some(dec!(250))), dec!(250));
        assert_eq!(seed_amount(None), Decimal::ZERO);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Groceries ").unwrap(), "Groceries");
        assert!(normalize_name("   ").is_err());
    }
}
