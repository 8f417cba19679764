//! Net-worth snapshots.
//!
//! A snapshot is a dated list of asset and liability lines; net worth is
//! derived from the lines and never stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ledger::validate_amount;

/// Side of the balance sheet a line sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Something owned.
    Asset,
    /// Something owed.
    Liability,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Liability => write!(f, "liability"),
        }
    }
}

impl std::str::FromStr for AssetKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            _ => Err(DomainError::validation(format!(
                "unknown asset kind '{s}', expected asset or liability"
            ))),
        }
    }
}

/// Totals of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetWorth {
    /// Sum of asset lines.
    pub assets: Decimal,
    /// Sum of liability lines.
    pub liabilities: Decimal,
    /// `assets - liabilities`.
    pub net_worth: Decimal,
}

/// Sums `(kind, amount)` lines into a [`NetWorth`].
pub fn net_worth<I>(lines: I) -> NetWorth
where
    I: IntoIterator<Item = (AssetKind, Decimal)>,
{
    let (assets, liabilities) =
        lines
            .into_iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(a, l), (kind, amount)| match kind {
                AssetKind::Asset => (a + amount, l),
                AssetKind::Liability => (a, l + amount),
            });
    NetWorth {
        assets,
        liabilities,
        net_worth: assets - liabilities,
    }
}

/// One line of a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssetDetail {
    /// Line label, e.g. "Checking account".
    pub label: String,
    /// Asset or liability.
    pub kind: AssetKind,
    /// Value of the line.
    pub amount: Decimal,
}

/// A new snapshot with its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssetSnapshot {
    /// Snapshot label.
    pub name: String,
    /// Date the values were taken.
    pub snapshot_date: NaiveDate,
    /// Free-form note.
    pub note: Option<String>,
    /// Lines.
    pub details: Vec<NewAssetDetail>,
}

impl NewAssetSnapshot {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on a blank name or label, or a
    /// negative line amount.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("snapshot name must not be empty"));
        }
        for detail in &self.details {
            if detail.label.trim().is_empty() {
                return Err(DomainError::validation("asset label must not be empty"));
            }
            validate_amount(detail.amount)?;
        }
        Ok(())
    }

    /// Net worth of the lines in this snapshot.
    #[must_use]
    pub fn net_worth(&self) -> NetWorth {
        net_worth(self.details.iter().map(|d| (d.kind, d.amount)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(label: &str, kind: AssetKind, amount: Decimal) -> NewAssetDetail {
        NewAssetDetail {
            label: label.into(),
            kind,
            amount,
        }
    }

    #[test]
    fn test_net_worth() {
        let snapshot = NewAssetSnapshot {
            name: "Year end".into(),
            snapshot_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            note: None,
            details: vec![
                line("House", AssetKind::Asset, dec!(300000)),
                line("Savings", AssetKind::Asset, dec!(25000)),
                line("Mortgage", AssetKind::Liability, dec!(180000)),
            ],
        };

        let nw = snapshot.net_worth();
        assert_eq!(nw.assets, dec!(325000));
        assert_eq!(nw.liabilities, dec!(180000));
        assert_eq!(nw.net_worth, dec!(145000));
    }

    #[test]
    fn test_empty_snapshot_is_zero() {
        assert_eq!(net_worth(Vec::new()), NetWorth::default());
    }

    #[test]
    fn test_rejects_negative_line() {
        let snapshot = NewAssetSnapshot {
            name: "Bad".into(),
            snapshot_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            note: None,
            details: vec![line("Car", AssetKind::Asset, dec!(-1))],
        };
        assert!(snapshot.validate().is_err());
    }
}
