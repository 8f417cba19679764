//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `FundId` where a `BudgetYearId` is expected,
//! which matters most in the ledger where both appear side by side.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(BudgetYearId, "Unique identifier for a budget year.");
typed_id!(FundId, "Unique identifier for a fund.");
typed_id!(CategoryId, "Unique identifier for an expense category.");
typed_id!(ExpenseId, "Unique identifier for an expense.");
typed_id!(IncomeId, "Unique identifier for an income record.");
typed_id!(TitheGivenId, "Unique identifier for a recorded tithe payment.");
typed_id!(DebtId, "Unique identifier for a debt.");
typed_id!(TaskId, "Unique identifier for a household task.");
typed_id!(AssetSnapshotId, "Unique identifier for a net-worth snapshot.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(FundId::new(), FundId::new());
    }

    #[test]
    fn test_round_trip_through_string() {
        let id = BudgetYearId::new();
        let parsed = BudgetYearId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
        assert!(BudgetYearId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let uuid = Uuid::new_v4();
        let json = serde_json::to_string(&ExpenseId::from(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }
}
