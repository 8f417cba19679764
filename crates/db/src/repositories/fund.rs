//! Fund repository: funds, their per-year budgets and remaining balances.

use std::collections::HashMap;

use hearth_core::{
    DomainError,
    fund::{self, FundLevel, FundType},
    ledger::validate_amount,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::ledger::{active_budget_year, year_or_active};
use crate::entities::{budget_years, categories, expenses, fund_budgets, funds};
use crate::error::RepoError;

/// Input for creating a fund.
#[derive(Debug, Clone)]
pub struct CreateFundInput {
    /// Fund name, unique per user.
    pub name: String,
    /// Fund type.
    pub fund_type: FundType,
    /// Priority tier.
    pub level: FundLevel,
    /// Whether the fund counts toward the yearly budget.
    pub include_in_budget: bool,
    /// Sort key.
    pub display_order: i32,
    /// Amount for the active year's fund budget; zero when absent.
    pub amount: Option<Decimal>,
}

/// Partial update of a fund.
#[derive(Debug, Clone, Default)]
pub struct UpdateFundInput {
    /// New name.
    pub name: Option<String>,
    /// New type.
    pub fund_type: Option<FundType>,
    /// New level.
    pub level: Option<FundLevel>,
    /// New include-in-budget flag.
    pub include_in_budget: Option<bool>,
    /// New sort key.
    pub display_order: Option<i32>,
}

/// Input for setting a fund's budget in one year.
#[derive(Debug, Clone)]
pub struct SetFundBudgetInput {
    /// Year to set; the active year when absent.
    pub budget_year_id: Option<Uuid>,
    /// Allocated amount.
    pub amount: Decimal,
    /// Amount handed out so far; unchanged when absent.
    pub amount_given: Option<Decimal>,
}

/// A fund with its budget for one year.
#[derive(Debug, Clone, Serialize)]
pub struct FundWithBudget {
    /// The fund.
    #[serde(flatten)]
    pub fund: funds::Model,
    /// Its budget in the year, if provisioned.
    pub budget: Option<fund_budgets::Model>,
    /// Derived remaining balance, if a budget exists.
    pub remaining: Option<Decimal>,
}

/// All funds with budgets for one year.
#[derive(Debug, Clone, Serialize)]
pub struct FundSummary {
    /// Year the budgets belong to.
    pub budget_year: budget_years::Model,
    /// Funds in display order.
    pub funds: Vec<FundWithBudget>,
    /// Yearly total over funds included in the budget.
    pub total_budget: Decimal,
}

/// Fund repository.
#[derive(Debug, Clone)]
pub struct FundRepository {
    db: DatabaseConnection,
}

impl FundRepository {
    /// Creates a new fund repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists funds in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        include_inactive: bool,
    ) -> Result<Vec<funds::Model>, RepoError> {
        let mut query = funds::Entity::find().filter(funds::Column::UserId.eq(user_id));
        if !include_inactive {
            query = query.filter(funds::Column::IsActive.eq(true));
        }
        Ok(query
            .order_by_asc(funds::Column::DisplayOrder)
            .order_by_asc(funds::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Gets one fund.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if missing or owned by someone else.
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<funds::Model, RepoError> {
        find_owned_fund(&self.db, user_id, id).await
    }

    /// Creates a fund and its budget for the active year.
    ///
    /// # Errors
    ///
    /// Returns `Validation`, `DuplicateName`, or a database error.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateFundInput,
    ) -> Result<funds::Model, RepoError> {
        let name = fund::normalize_name(&input.name)?;
        let amount = input.amount.unwrap_or_default();
        validate_amount(amount)?;

        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();

        let created = funds::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            name: Set(name.clone()),
            fund_type: Set(input.fund_type.into()),
            level: Set(input.level.into()),
            include_in_budget: Set(input.include_in_budget),
            display_order: Set(input.display_order),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| RepoError::from(e).duplicate_as("fund", &name))?;

        if let Some(year) = active_budget_year(&txn, user_id).await? {
            fund_budgets::ActiveModel {
                id: Set(Uuid::now_v7()),
                fund_id: Set(created.id),
                budget_year_id: Set(year.id),
                amount: Set(amount),
                amount_given: Set(Decimal::ZERO),
                spent: Set(Decimal::ZERO),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        info!(user_id = %user_id, fund_id = %created.id, name = %created.name, "Fund created");
        Ok(created)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Validation`, `DuplicateName`, or a database error.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateFundInput,
    ) -> Result<funds::Model, RepoError> {
        let existing = find_owned_fund(&self.db, user_id, id).await?;
        let mut active: funds::ActiveModel = existing.into();

        let mut new_name = None;
        if let Some(name) = input.name {
            let name = fund::normalize_name(&name)?;
            active.name = Set(name.clone());
            new_name = Some(name);
        }
        if let Some(fund_type) = input.fund_type {
            active.fund_type = Set(fund_type.into());
        }
        if let Some(level) = input.level {
            active.level = Set(level.into());
        }
        if let Some(include) = input.include_in_budget {
            active.include_in_budget = Set(include);
        }
        if let Some(order) = input.display_order {
            active.display_order = Set(order);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(|e| {
            RepoError::from(e).duplicate_as("fund", new_name.as_deref().unwrap_or_default())
        })
    }

    /// Activates or deactivates a fund.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AlreadyInState`, or a database error.
    pub async fn set_active(
        &self,
        user_id: Uuid,
        id: Uuid,
        is_active: bool,
    ) -> Result<funds::Model, RepoError> {
        let txn = self.db.begin().await?;
        let existing = funds::Entity::find_by_id(id)
            .filter(funds::Column::UserId.eq(user_id))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("fund", id))?;
        if existing.is_active == is_active {
            let state = if is_active { "active" } else { "inactive" };
            return Err(DomainError::AlreadyInState(format!("fund is already {state}")).into());
        }

        let mut active: funds::ActiveModel = existing.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(chrono::Utc::now().into());
        let updated = active.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a fund that no category or expense references. Its fund
    /// budgets cascade.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `HasDependentData`, or a database error.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let txn = self.db.begin().await?;
        find_owned_fund(&txn, user_id, id).await?;

        let category_count = categories::Entity::find()
            .filter(categories::Column::FundId.eq(id))
            .count(&txn)
            .await?;
        let expense_count = expenses::Entity::find()
            .filter(expenses::Column::FundId.eq(id))
            .count(&txn)
            .await?;
        if category_count + expense_count > 0 {
            return Err(DomainError::HasDependentData {
                entity: "fund",
                dependents: "categories or expenses",
            }
            .into());
        }

        funds::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Sets the allocated amount (and optionally `amount_given`) of a fund
    /// in one year, creating the fund budget if the year has none.
    /// `spent` is never written here.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Validation`, or a database error.
    pub async fn set_budget(
        &self,
        user_id: Uuid,
        fund_id: Uuid,
        input: SetFundBudgetInput,
    ) -> Result<fund_budgets::Model, RepoError> {
        validate_amount(input.amount)?;
        if let Some(given) = input.amount_given {
            validate_amount(given)?;
        }

        let txn = self.db.begin().await?;
        find_owned_fund(&txn, user_id, fund_id).await?;
        let year = year_or_active(&txn, user_id, input.budget_year_id).await?;
        let now = chrono::Utc::now().into();

        let existing = fund_budgets::Entity::find()
            .filter(fund_budgets::Column::FundId.eq(fund_id))
            .filter(fund_budgets::Column::BudgetYearId.eq(year.id))
            .one(&txn)
            .await?;

        let saved = match existing {
            Some(budget) => {
                let mut active: fund_budgets::ActiveModel = budget.into();
                active.amount = Set(input.amount);
                if let Some(given) = input.amount_given {
                    active.amount_given = Set(given);
                }
                active.updated_at = Set(now);
                active.update(&txn).await?
            }
            None => {
                fund_budgets::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    fund_id: Set(fund_id),
                    budget_year_id: Set(year.id),
                    amount: Set(input.amount),
                    amount_given: Set(input.amount_given.unwrap_or_default()),
                    spent: Set(Decimal::ZERO),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;
        Ok(saved)
    }

    /// Funds with their budget and remaining balance for one year (the
    /// active year when none is given).
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Validation` when no year resolves, or a database
    /// error.
    pub async fn summary(
        &self,
        user_id: Uuid,
        budget_year_id: Option<Uuid>,
    ) -> Result<FundSummary, RepoError> {
        let year = year_or_active(&self.db, user_id, budget_year_id).await?;
        let all_funds = self.list(user_id, true).await?;

        let mut budgets: HashMap<Uuid, fund_budgets::Model> = fund_budgets::Entity::find()
            .filter(fund_budgets::Column::BudgetYearId.eq(year.id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|fb| (fb.fund_id, fb))
            .collect();

        let funds: Vec<FundWithBudget> = all_funds
            .into_iter()
            .map(|f| {
                let budget = budgets.remove(&f.id);
                let remaining = budget
                    .as_ref()
                    .map(|b| b.balance().remaining(f.fund_type.into()));
                FundWithBudget {
                    fund: f,
                    budget,
                    remaining,
                }
            })
            .collect();

        let total_budget = fund::total_budget(funds.iter().filter_map(|f| {
            f.budget
                .as_ref()
                .map(|b| (FundType::from(f.fund.fund_type), f.fund.include_in_budget, b.amount))
        }));

        Ok(FundSummary {
            budget_year: year,
            funds,
            total_budget,
        })
    }
}

/// Loads a fund owned by the user.
pub(crate) async fn find_owned_fund<C: sea_orm::ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
) -> Result<funds::Model, RepoError> {
    funds::Entity::find_by_id(id)
        .filter(funds::Column::UserId.eq(user_id))
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found("fund", id).into())
}

