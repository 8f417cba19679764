//! Expense repository: the ledger mutator.
//!
//! Every write runs in one transaction. The row change and the matching
//! `spent` adjustments commit together or not at all.

use hearth_core::{
    DomainError,
    ledger::{Contribution, ExpensePatch, NewExpense, plan_create, plan_delete, plan_update},
};
use hearth_shared::types::{PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::category::find_owned_category;
use super::ledger::{apply_adjustments, resolve_budget_year};
use crate::entities::expenses;
use crate::error::RepoError;

/// Filters for listing expenses.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Only expenses in this budget year.
    pub budget_year_id: Option<Uuid>,
    /// Only expenses charged to this fund.
    pub fund_id: Option<Uuid>,
    /// Only expenses in this category.
    pub category_id: Option<Uuid>,
}

/// Expense repository.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists expenses newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: ExpenseFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<expenses::Model>, RepoError> {
        let page = page.clamped();
        let mut query = expenses::Entity::find().filter(expenses::Column::UserId.eq(user_id));
        if let Some(id) = filter.budget_year_id {
            query = query.filter(expenses::Column::BudgetYearId.eq(id));
        }
        if let Some(id) = filter.fund_id {
            query = query.filter(expenses::Column::FundId.eq(id));
        }
        if let Some(id) = filter.category_id {
            query = query.filter(expenses::Column::CategoryId.eq(id));
        }

        let total = query.clone().count(&self.db).await?;
        let data = query
            .order_by_desc(expenses::Column::Date)
            .order_by_desc(expenses::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(data, &page, total))
    }

    /// Gets one expense.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if missing or owned by someone else.
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<expenses::Model, RepoError> {
        find_owned_expense(&self.db, user_id, id).await
    }

    /// Records an expense and adds it to its fund budget's `spent`.
    ///
    /// The fund comes from the category and the budget year from the date.
    ///
    /// # Errors
    ///
    /// Returns `Validation`, `NotFound` for a foreign category,
    /// `NoBudgetYearForDate`, or a database error.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: NewExpense,
    ) -> Result<expenses::Model, RepoError> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let category =
            find_owned_category(&txn, user_id, input.category_id.into_inner()).await?;
        let budget_year_id = resolve_budget_year(&txn, user_id, input.date).await?;
        let now = chrono::Utc::now().into();

        let expense = expenses::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            budget_year_id: Set(budget_year_id),
            category_id: Set(category.id),
            fund_id: Set(category.fund_id),
            amount: Set(input.amount),
            date: Set(input.date),
            name: Set(input.name.trim().to_string()),
            note: Set(input.note),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        apply_adjustments(&txn, &plan_create(&expense.contribution())).await?;
        txn.commit().await?;

        info!(
            user_id = %user_id,
            expense_id = %expense.id,
            fund_id = %expense.fund_id,
            amount = %expense.amount,
            "Expense created"
        );
        Ok(expense)
    }

    /// Applies a patch. When the amount, category or date changes, the old
    /// contribution is reverted and the new one applied.
    ///
    /// A new category re-derives the fund; a new date re-resolves the budget
    /// year. Fields absent from the patch keep the stored values.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Validation`, `NoBudgetYearForDate`, or a
    /// database error.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: ExpensePatch,
    ) -> Result<expenses::Model, RepoError> {
        patch.validate()?;

        let txn = self.db.begin().await?;
        let old = find_owned_expense(&txn, user_id, id).await?;
        let old_contribution = old.contribution();

        let (category_id, fund_id) = match patch.category_id {
            Some(category_id) => {
                let category =
                    find_owned_category(&txn, user_id, category_id.into_inner()).await?;
                (category.id, category.fund_id)
            }
            None => (old.category_id, old.fund_id),
        };
        let date = patch.date.unwrap_or(old.date);
        let budget_year_id = match patch.date {
            Some(date) => resolve_budget_year(&txn, user_id, date).await?,
            None => old.budget_year_id,
        };
        let amount = patch.amount.unwrap_or(old.amount);

        let touches_ledger = patch.touches_ledger();
        let mut active: expenses::ActiveModel = old.into();
        active.category_id = Set(category_id);
        active.fund_id = Set(fund_id);
        active.budget_year_id = Set(budget_year_id);
        active.amount = Set(amount);
        active.date = Set(date);
        if let Some(name) = patch.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(note) = patch.note {
            active.note = Set(note);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&txn).await?;

        if touches_ledger {
            let new_contribution = Contribution {
                fund_id: fund_id.into(),
                budget_year_id: budget_year_id.into(),
                amount,
            };
            apply_adjustments(&txn, &plan_update(&old_contribution, &new_contribution)).await?;
        }

        txn.commit().await?;

        info!(user_id = %user_id, expense_id = %id, "Expense updated");
        Ok(updated)
    }

    /// Deletes an expense and subtracts it from its fund budget's `spent`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let txn = self.db.begin().await?;
        let old = find_owned_expense(&txn, user_id, id).await?;

        expenses::Entity::delete_by_id(old.id).exec(&txn).await?;
        apply_adjustments(&txn, &plan_delete(&old.contribution())).await?;

        txn.commit().await?;

        info!(user_id = %user_id, expense_id = %id, "Expense deleted");
        Ok(())
    }
}

async fn find_owned_expense<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
) -> Result<expenses::Model, RepoError> {
    expenses::Entity::find_by_id(id)
        .filter(expenses::Column::UserId.eq(user_id))
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found("expense", id).into())
}
