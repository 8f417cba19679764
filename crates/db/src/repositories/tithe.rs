//! Tithe repository: recorded payments and the derived summary.

use hearth_core::{
    DomainError,
    settings::{self, SettingKey},
    tithe::{NewTitheGiven, TitheSummary},
};
use hearth_shared::types::{PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::ledger::{resolve_budget_year, sum_or_zero, year_or_active};
use super::settings::get_setting;
use crate::entities::{budget_years, incomes, tithe_given};
use crate::error::RepoError;

/// Tithe summary for one budget year.
#[derive(Debug, Clone, Serialize)]
pub struct YearTithe {
    /// Year the summary covers.
    pub budget_year: budget_years::Model,
    /// The figures.
    #[serde(flatten)]
    pub summary: TitheSummary,
}

/// Tithe repository.
#[derive(Debug, Clone)]
pub struct TitheRepository {
    db: DatabaseConnection,
}

impl TitheRepository {
    /// Creates a new tithe repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Required, given and remaining tithe for a year (the active one when
    /// none is given).
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Validation` when no year resolves, or a database
    /// error.
    pub async fn summary(
        &self,
        user_id: Uuid,
        budget_year_id: Option<Uuid>,
    ) -> Result<YearTithe, RepoError> {
        let year = year_or_active(&self.db, user_id, budget_year_id).await?;
        let summary = tithe_summary(&self.db, user_id, year.id).await?;
        Ok(YearTithe {
            budget_year: year,
            summary,
        })
    }

    /// Lists recorded tithe payments, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_given(
        &self,
        user_id: Uuid,
        budget_year_id: Option<Uuid>,
        page: &PageRequest,
    ) -> Result<PageResponse<tithe_given::Model>, RepoError> {
        let page = page.clamped();
        let mut query =
            tithe_given::Entity::find().filter(tithe_given::Column::UserId.eq(user_id));
        if let Some(id) = budget_year_id {
            query = query.filter(tithe_given::Column::BudgetYearId.eq(id));
        }

        let total = query.clone().count(&self.db).await?;
        let data = query
            .order_by_desc(tithe_given::Column::Date)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(data, &page, total))
    }

    /// Records a tithe payment in the budget year enclosing its date.
    ///
    /// # Errors
    ///
    /// Returns `Validation`, `NoBudgetYearForDate`, or a database error.
    pub async fn create_given(
        &self,
        user_id: Uuid,
        input: NewTitheGiven,
    ) -> Result<tithe_given::Model, RepoError> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let budget_year_id = resolve_budget_year(&txn, user_id, input.date).await?;
        let now = chrono::Utc::now().into();

        let given = tithe_given::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            budget_year_id: Set(Some(budget_year_id)),
            amount: Set(input.amount),
            date: Set(input.date),
            recipient: Set(input.recipient),
            note: Set(input.note),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(user_id = %user_id, tithe_id = %given.id, amount = %given.amount, "Tithe recorded");
        Ok(given)
    }

    /// Deletes a recorded tithe payment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn delete_given(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let result = tithe_given::Entity::delete_many()
            .filter(tithe_given::Column::Id.eq(id))
            .filter(tithe_given::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("tithe payment", id).into());
        }
        Ok(())
    }
}

/// Computes the tithe summary for one year from stored incomes, payments
/// and the user's `tithe_percentage` setting.
pub(crate) async fn tithe_summary<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    budget_year_id: Uuid,
) -> Result<TitheSummary, RepoError> {
    let total_income = sum_or_zero(
        conn,
        incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(user_id))
            .filter(incomes::Column::BudgetYearId.eq(budget_year_id)),
        incomes::Column::Amount,
    )
    .await?;
    let given = sum_or_zero(
        conn,
        tithe_given::Entity::find()
            .filter(tithe_given::Column::UserId.eq(user_id))
            .filter(tithe_given::Column::BudgetYearId.eq(budget_year_id)),
        tithe_given::Column::Amount,
    )
    .await?;
    let stored = get_setting(conn, user_id, SettingKey::TithePercentage).await?;

    Ok(TitheSummary::compute(
        total_income,
        settings::tithe_percentage(stored.as_deref()),
        given,
    ))
}
