//! Dashboard repository: year rollups recomputed on every read.

use std::collections::HashMap;

use hearth_core::{
    dashboard::{self, DashboardSummary, PeriodInfo},
    fund::FundType,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::ledger::{sum_or_zero, year_or_active};
use super::tithe::tithe_summary;
use crate::entities::{expenses, fund_budgets, funds};
use crate::error::RepoError;

/// Dashboard repository.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Balance, totals, total budget and tithe status for a year (the active
    /// one when none is given).
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Validation` when no year resolves, or a database
    /// error.
    pub async fn summary(
        &self,
        user_id: Uuid,
        budget_year_id: Option<Uuid>,
    ) -> Result<DashboardSummary, RepoError> {
        let year = year_or_active(&self.db, user_id, budget_year_id).await?;

        let tithe = tithe_summary(&self.db, user_id, year.id).await?;
        let expenses = sum_or_zero(
            &self.db,
            expenses::Entity::find()
                .filter(expenses::Column::UserId.eq(user_id))
                .filter(expenses::Column::BudgetYearId.eq(year.id)),
            expenses::Column::Amount,
        )
        .await?;

        let user_funds: HashMap<Uuid, funds::Model> = funds::Entity::find()
            .filter(funds::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|f| (f.id, f))
            .collect();
        let budgets = fund_budgets::Entity::find()
            .filter(fund_budgets::Column::BudgetYearId.eq(year.id))
            .filter(fund_budgets::Column::FundId.is_in(user_funds.keys().copied()))
            .all(&self.db)
            .await?;

        let period = PeriodInfo {
            id: year.id.into(),
            name: year.name,
            start_date: year.start_date,
            end_date: year.end_date,
        };
        let fund_amounts = budgets.iter().filter_map(|b| {
            user_funds
                .get(&b.fund_id)
                .map(|f| (FundType::from(f.fund_type), f.include_in_budget, b.amount))
        });

        Ok(dashboard::summarize(period, tithe, expenses, fund_amounts))
    }
}
