//! `SeaORM` Entity for fund_budgets table.

use hearth_core::fund::FundBalance;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "fund_budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fund_id: Uuid,
    pub budget_year_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount_given: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub spent: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::funds::Entity",
        from = "Column::FundId",
        to = "super::funds::Column::Id",
        on_delete = "Cascade"
    )]
    Funds,
    #[sea_orm(
        belongs_to = "super::budget_years::Entity",
        from = "Column::BudgetYearId",
        to = "super::budget_years::Column::Id",
        on_delete = "Cascade"
    )]
    BudgetYears,
}

impl Related<super::funds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Funds.def()
    }
}

impl Related<super::budget_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetYears.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Allocation and running totals as a domain value.
    #[must_use]
    pub const fn balance(&self) -> FundBalance {
        FundBalance {
            amount: self.amount,
            amount_given: self.amount_given,
            spent: self.spent,
        }
    }
}
