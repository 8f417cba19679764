//! Per-user settings.
//!
//! Settings are stored as text key/value pairs; this module knows which keys
//! exist and what their values must look like.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Recognized setting keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    /// Percentage of income owed as tithe, 0 to 100.
    TithePercentage,
    /// Symbol shown next to amounts.
    CurrencySymbol,
}

impl SettingKey {
    /// Stored key string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TithePercentage => "tithe_percentage",
            Self::CurrencySymbol => "currency_symbol",
        }
    }

    /// Validates and normalizes a value for this key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the value is malformed.
    pub fn normalize_value(self, value: &str) -> Result<String, DomainError> {
        let value = value.trim();
        match self {
            Self::TithePercentage => {
                let pct = parse_percentage(value)?;
                Ok(pct.normalize().to_string())
            }
            Self::CurrencySymbol => {
                if value.is_empty() || value.chars().count() > 8 {
                    return Err(DomainError::validation(
                        "currency_symbol must be 1 to 8 characters",
                    ));
                }
                Ok(value.to_string())
            }
        }
    }
}

impl std::fmt::Display for SettingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tithe_percentage" => Ok(Self::TithePercentage),
            "currency_symbol" => Ok(Self::CurrencySymbol),
            _ => Err(DomainError::validation(format!("unknown setting '{s}'"))),
        }
    }
}

fn parse_percentage(value: &str) -> Result<Decimal, DomainError> {
    let pct = Decimal::from_str(value)
        .map_err(|_| DomainError::validation(format!("'{value}' is not a number")))?;
    if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
        return Err(DomainError::validation(
            "tithe_percentage must be between 0 and 100",
        ));
    }
    Ok(pct)
}

/// Reads a stored `tithe_percentage`. Missing or unparsable values yield
/// `None` so the caller falls back to the default.
#[must_use]
pub fn tithe_percentage(stored: Option<&str>) -> Option<Decimal> {
    stored.and_then(|v| parse_percentage(v.trim()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("10", Ok("10"))]
    #[case(" 12.50 ", Ok("12.5"))]
    #[case("0", Ok("0"))]
    #[case("101", Err(()))]
    #[case("-1", Err(()))]
    #[case("ten", Err(()))]
    fn test_tithe_percentage_values(#[case] input: &str, #[case] expected: Result<&str, ()>) {
        let got = SettingKey::TithePercentage.normalize_value(input);
        match expected {
            Ok(v) => assert_eq!(got.unwrap(), v),
            Err(()) => assert!(got.is_err()),
        }
    }

    #[test]
    fn test_key_round_trip() {
        for key in [SettingKey::TithePercentage, SettingKey::CurrencySymbol] {
            assert_eq!(SettingKey::from_str(key.as_str()).unwrap(), key);
        }
        assert!(SettingKey::from_str("theme").is_err());
    }

    #[test]
    fn test_stored_percentage_fallback() {
        assert_eq!(tithe_percentage(Some("15")), Some(dec!(15)));
        assert_eq!(tithe_percentage(Some("garbage")), None);
        assert_eq!(tithe_percentage(None), None);
    }
}
