//! Budget year repository.
//!
//! Carries out the overlap guard, exclusive activation and fund budget
//! provisioning rules from `hearth_core::budget_year` inside transactions.

use std::collections::HashMap;

use chrono::NaiveDate;
use hearth_core::{
    DomainError,
    budget_year::{self, BudgetYear, NewBudgetYear},
    fund::seed_amount,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::{Expr, LockType},
};
use tracing::{info, warn};
use uuid::Uuid;

use super::ledger::{active_budget_year, find_owned_year};
use crate::entities::{budget_years, expenses, fund_budgets, funds, incomes, users};
use crate::error::RepoError;

/// Partial update of a budget year.
#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetYearInput {
    /// New name.
    pub name: Option<String>,
    /// New first day.
    pub start_date: Option<NaiveDate>,
    /// New last day.
    pub end_date: Option<NaiveDate>,
}

/// Budget year repository.
#[derive(Debug, Clone)]
pub struct BudgetYearRepository {
    db: DatabaseConnection,
}

impl BudgetYearRepository {
    /// Creates a new budget year repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the user's budget years, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<budget_years::Model>, RepoError> {
        Ok(budget_years::Entity::find()
            .filter(budget_years::Column::UserId.eq(user_id))
            .order_by_desc(budget_years::Column::StartDate)
            .all(&self.db)
            .await?)
    }

    /// Gets one budget year.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if missing or owned by someone else.
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<budget_years::Model, RepoError> {
        find_owned_year(&self.db, user_id, id).await
    }

    /// The user's active budget year, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn active(&self, user_id: Uuid) -> Result<Option<budget_years::Model>, RepoError> {
        Ok(active_budget_year(&self.db, user_id).await?)
    }

    /// Returns true if `[start, end]` overlaps any of the user's years other
    /// than `exclude_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn has_overlap(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, RepoError> {
        let years = load_years(&self.db, user_id).await?;
        Ok(budget_year::find_overlap(&years, start, end, exclude_id.map(Into::into)).is_some())
    }

    /// Creates a budget year and gives every active fund a fund budget in it,
    /// seeded from that fund's amount in the currently active year.
    ///
    /// The new year becomes active only if the user has no active year.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an inverted range, `OverlappingBudgetYear` if
    /// the range collides with another year, or a database error.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: NewBudgetYear,
    ) -> Result<budget_years::Model, RepoError> {
        budget_year::validate_date_range(input.start_date, input.end_date)?;

        let txn = self.db.begin().await?;
        lock_user_years(&txn, user_id).await?;

        let years = load_years(&txn, user_id).await?;
        if let Some(existing) =
            budget_year::find_overlap(&years, input.start_date, input.end_date, None)
        {
            return Err(DomainError::OverlappingBudgetYear(existing.name.clone()).into());
        }

        let active = active_budget_year(&txn, user_id).await?;
        let now = chrono::Utc::now().into();

        let year = budget_years::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            name: Set(input.name),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            is_active: Set(active.is_none()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let provisioned =
            provision_fund_budgets(&txn, user_id, year.id, active.as_ref().map(|a| a.id)).await?;

        txn.commit().await?;

        info!(
            user_id = %user_id,
            budget_year_id = %year.id,
            fund_budgets = provisioned,
            "Budget year created"
        );
        Ok(year)
    }

    /// Updates a budget year, re-running the overlap guard with the row
    /// itself excluded. Existing incomes and expenses keep their year.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Validation`, `OverlappingBudgetYear`, or a
    /// database error.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateBudgetYearInput,
    ) -> Result<budget_years::Model, RepoError> {
        let txn = self.db.begin().await?;
        lock_user_years(&txn, user_id).await?;
        let existing = find_owned_year(&txn, user_id, id).await?;

        let start = input.start_date.unwrap_or(existing.start_date);
        let end = input.end_date.unwrap_or(existing.end_date);
        budget_year::validate_date_range(start, end)?;

        let years = load_years(&txn, user_id).await?;
        if let Some(other) = budget_year::find_overlap(&years, start, end, Some(id.into())) {
            return Err(DomainError::OverlappingBudgetYear(other.name.clone()).into());
        }

        let mut active: budget_years::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        active.start_date = Set(start);
        active.end_date = Set(end);
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(updated)
    }

    /// Makes `id` the user's only active year: deactivate all, then activate
    /// the target, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn activate(&self, user_id: Uuid, id: Uuid) -> Result<budget_years::Model, RepoError> {
        let txn = self.db.begin().await?;
        lock_user_years(&txn, user_id).await?;
        find_owned_year(&txn, user_id, id).await?;

        set_exclusive_active(&txn, user_id, id).await?;
        let year = find_owned_year(&txn, user_id, id).await?;

        txn.commit().await?;

        info!(user_id = %user_id, budget_year_id = %id, "Budget year activated");
        Ok(year)
    }

    /// Deletes a budget year that owns no incomes or expenses. Its fund
    /// budgets cascade. If it was active, the remaining year with the latest
    /// start date becomes active.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `HasDependentData`, or a database error.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let txn = self.db.begin().await?;
        lock_user_years(&txn, user_id).await?;
        let year = find_owned_year(&txn, user_id, id).await?;

        let income_count = incomes::Entity::find()
            .filter(incomes::Column::BudgetYearId.eq(id))
            .count(&txn)
            .await?;
        let expense_count = expenses::Entity::find()
            .filter(expenses::Column::BudgetYearId.eq(id))
            .count(&txn)
            .await?;
        if income_count + expense_count > 0 {
            return Err(DomainError::HasDependentData {
                entity: "budget year",
                dependents: "incomes or expenses",
            }
            .into());
        }

        budget_years::Entity::delete_by_id(id).exec(&txn).await?;

        if year.is_active {
            let remaining = load_years(&txn, user_id).await?;
            if let Some(successor) = budget_year::successor_after_delete(&remaining) {
                set_exclusive_active(&txn, user_id, successor.into_inner()).await?;
                info!(user_id = %user_id, budget_year_id = %successor, "Promoted budget year to active");
            }
        }

        txn.commit().await?;
        Ok(())
    }
}

/// Takes `FOR NO KEY UPDATE` on the owning user row. Every write to a
/// user's budget years goes through this first, so overlap and activation
/// checks see a settled set of years. Inserts referencing the user only take
/// `FOR KEY SHARE` and are not blocked.
async fn lock_user_years<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<(), RepoError> {
    users::Entity::find_by_id(user_id)
        .lock(LockType::NoKeyUpdate)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found("user", user_id))?;
    Ok(())
}

async fn load_years<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> Result<Vec<BudgetYear>, RepoError> {
    let years: Vec<BudgetYear> = budget_years::Entity::find()
        .filter(budget_years::Column::UserId.eq(user_id))
        .all(conn)
        .await?
        .iter()
        .map(BudgetYear::from)
        .collect();

    if let Err(e) = budget_year::active_count(&years) {
        warn!(user_id = %user_id, error = %e, "Single active budget year rule is broken");
    }
    Ok(years)
}

async fn set_exclusive_active<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
) -> Result<(), RepoError> {
    let now = chrono::Utc::now();

    budget_years::Entity::update_many()
        .col_expr(budget_years::Column::IsActive, Expr::value(false))
        .col_expr(budget_years::Column::UpdatedAt, Expr::value(now))
        .filter(budget_years::Column::UserId.eq(user_id))
        .filter(budget_years::Column::IsActive.eq(true))
        .exec(conn)
        .await?;

    budget_years::Entity::update_many()
        .col_expr(budget_years::Column::IsActive, Expr::value(true))
        .col_expr(budget_years::Column::UpdatedAt, Expr::value(now))
        .filter(budget_years::Column::Id.eq(id))
        .filter(budget_years::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;

    Ok(())
}

/// Inserts one fund budget per active fund for a new year.
async fn provision_fund_budgets<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    budget_year_id: Uuid,
    seed_year_id: Option<Uuid>,
) -> Result<usize, RepoError> {
    let active_funds = funds::Entity::find()
        .filter(funds::Column::UserId.eq(user_id))
        .filter(funds::Column::IsActive.eq(true))
        .all(conn)
        .await?;

    let seeds: HashMap<Uuid, Decimal> = match seed_year_id {
        Some(seed_year_id) => fund_budgets::Entity::find()
            .filter(fund_budgets::Column::BudgetYearId.eq(seed_year_id))
            .all(conn)
            .await?
            .into_iter()
            .map(|fb| (fb.fund_id, fb.amount))
            .collect(),
        None => HashMap::new(),
    };

    let now = chrono::Utc::now().into();
    for fund in &active_funds {
        fund_budgets::ActiveModel {
            id: Set(Uuid::now_v7()),
            fund_id: Set(fund.id),
            budget_year_id: Set(budget_year_id),
            amount: Set(seed_amount(seeds.get(&fund.id).copied())),
            amount_given: Set(Decimal::ZERO),
            spent: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(conn)
        .await?;
    }

    Ok(active_funds.len())
}
