//! Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `fund_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "fund_type")]
#[serde(rename_all = "lowercase")]
pub enum FundType {
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "annual")]
    Annual,
    #[sea_orm(string_value = "savings")]
    Savings,
}

impl From<FundType> for hearth_core::fund::FundType {
    fn from(value: FundType) -> Self {
        match value {
            FundType::Monthly => Self::Monthly,
            FundType::Annual => Self::Annual,
            FundType::Savings => Self::Savings,
        }
    }
}

impl From<hearth_core::fund::FundType> for FundType {
    fn from(value: hearth_core::fund::FundType) -> Self {
        match value {
            hearth_core::fund::FundType::Monthly => Self::Monthly,
            hearth_core::fund::FundType::Annual => Self::Annual,
            hearth_core::fund::FundType::Savings => Self::Savings,
        }
    }
}

/// `debt_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "debt_status")]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    #[sea_orm(string_value = "unpaid")]
    Unpaid,
    #[sea_orm(string_value = "paid")]
    Paid,
}

impl From<DebtStatus> for hearth_core::debt::DebtStatus {
    fn from(value: DebtStatus) -> Self {
        match value {
            DebtStatus::Unpaid => Self::Unpaid,
            DebtStatus::Paid => Self::Paid,
        }
    }
}

/// `asset_kind` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "asset_kind")]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    #[sea_orm(string_value = "asset")]
    Asset,
    #[sea_orm(string_value = "liability")]
    Liability,
}

impl From<AssetKind> for hearth_core::asset::AssetKind {
    fn from(value: AssetKind) -> Self {
        match value {
            AssetKind::Asset => Self::Asset,
            AssetKind::Liability => Self::Liability,
        }
    }
}

impl From<hearth_core::asset::AssetKind> for AssetKind {
    fn from(value: hearth_core::asset::AssetKind) -> Self {
        match value {
            hearth_core::asset::AssetKind::Asset => Self::Asset,
            hearth_core::asset::AssetKind::Liability => Self::Liability,
        }
    }
}
