//! Income repository.
//!
//! Incomes are pinned to the budget year enclosing their date but never
//! touch fund budget totals.

use hearth_core::{
    DomainError,
    ledger::{IncomePatch, NewIncome, month_and_year},
};
use hearth_shared::types::{PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::ledger::resolve_budget_year;
use crate::entities::incomes;
use crate::error::RepoError;

/// Income repository.
#[derive(Debug, Clone)]
pub struct IncomeRepository {
    db: DatabaseConnection,
}

impl IncomeRepository {
    /// Creates a new income repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists incomes newest first, optionally for one budget year.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        budget_year_id: Option<Uuid>,
        page: &PageRequest,
    ) -> Result<PageResponse<incomes::Model>, RepoError> {
        let page = page.clamped();
        let mut query = incomes::Entity::find().filter(incomes::Column::UserId.eq(user_id));
        if let Some(id) = budget_year_id {
            query = query.filter(incomes::Column::BudgetYearId.eq(id));
        }

        let total = query.clone().count(&self.db).await?;
        let data = query
            .order_by_desc(incomes::Column::Date)
            .order_by_desc(incomes::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(data, &page, total))
    }

    /// Gets one income record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if missing or owned by someone else.
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<incomes::Model, RepoError> {
        find_owned_income(&self.db, user_id, id).await
    }

    /// Records an income in the budget year enclosing its date.
    ///
    /// # Errors
    ///
    /// Returns `Validation`, `NoBudgetYearForDate`, or a database error.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: NewIncome,
    ) -> Result<incomes::Model, RepoError> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let budget_year_id = resolve_budget_year(&txn, user_id, input.date).await?;
        let (month, year) = month_and_year(input.date);
        let now = chrono::Utc::now().into();

        let income = incomes::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            budget_year_id: Set(budget_year_id),
            amount: Set(input.amount),
            date: Set(input.date),
            month: Set(month),
            year: Set(year),
            source: Set(input.source.trim().to_string()),
            note: Set(input.note),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(user_id = %user_id, income_id = %income.id, amount = %income.amount, "Income created");
        Ok(income)
    }

    /// Applies a patch. A new date re-resolves the budget year and the
    /// derived month and year.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Validation`, `NoBudgetYearForDate`, or a
    /// database error.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: IncomePatch,
    ) -> Result<incomes::Model, RepoError> {
        patch.validate()?;

        let txn = self.db.begin().await?;
        let existing = find_owned_income(&txn, user_id, id).await?;
        let mut active: incomes::ActiveModel = existing.into();

        if let Some(date) = patch.date {
            let budget_year_id = resolve_budget_year(&txn, user_id, date).await?;
            let (month, year) = month_and_year(date);
            active.budget_year_id = Set(budget_year_id);
            active.date = Set(date);
            active.month = Set(month);
            active.year = Set(year);
        }
        if let Some(amount) = patch.amount {
            active.amount = Set(amount);
        }
        if let Some(source) = patch.source {
            active.source = Set(source.trim().to_string());
        }
        if let Some(note) = patch.note {
            active.note = Set(note);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Deletes an income record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let txn = self.db.begin().await?;
        find_owned_income(&txn, user_id, id).await?;
        incomes::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        info!(user_id = %user_id, income_id = %id, "Income deleted");
        Ok(())
    }
}

async fn find_owned_income<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
) -> Result<incomes::Model, RepoError> {
    incomes::Entity::find_by_id(id)
        .filter(incomes::Column::UserId.eq(user_id))
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found("income", id).into())
}
