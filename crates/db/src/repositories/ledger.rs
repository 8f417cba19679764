//! Ledger primitives shared by the repositories.
//!
//! Everything here takes a connection rather than owning one so callers can
//! run it inside their own transaction.

use chrono::NaiveDate;
use hearth_core::{
    DomainError,
    budget_year::{self, BudgetYear},
    ledger::Adjustment,
};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
    sea_query::Expr,
};
use tracing::warn;
use uuid::Uuid;

use crate::entities::{budget_years, fund_budgets};
use crate::error::RepoError;

/// Adds `delta` to `spent` on one fund budget with a single
/// `UPDATE ... SET spent = spent + $delta`.
///
/// Returns the number of rows touched. Zero means the (fund, year) pair has
/// no fund budget; that is logged and otherwise treated as a no-op.
///
/// # Errors
///
/// Returns an error if the update fails.
pub async fn adjust_fund_budget<C: ConnectionTrait>(
    conn: &C,
    fund_id: Uuid,
    budget_year_id: Uuid,
    delta: Decimal,
) -> Result<u64, DbErr> {
    let now = chrono::Utc::now();

    let result = fund_budgets::Entity::update_many()
        .col_expr(
            fund_budgets::Column::Spent,
            Expr::col(fund_budgets::Column::Spent).add(delta),
        )
        .col_expr(fund_budgets::Column::UpdatedAt, Expr::value(now))
        .filter(fund_budgets::Column::FundId.eq(fund_id))
        .filter(fund_budgets::Column::BudgetYearId.eq(budget_year_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        warn!(
            fund_id = %fund_id,
            budget_year_id = %budget_year_id,
            delta = %delta,
            "No fund budget for fund and year, spent adjustment skipped"
        );
    }

    Ok(result.rows_affected)
}

/// Applies a ledger plan step by step, in order.
///
/// # Errors
///
/// Returns an error if any update fails.
pub async fn apply_adjustments<C: ConnectionTrait>(
    conn: &C,
    adjustments: &[Adjustment],
) -> Result<(), DbErr> {
    for adj in adjustments {
        adjust_fund_budget(
            conn,
            adj.fund_id.into_inner(),
            adj.budget_year_id.into_inner(),
            adj.delta,
        )
        .await?;
    }
    Ok(())
}

/// Finds the user's budget year enclosing `date`.
///
/// # Errors
///
/// Returns `NoBudgetYearForDate` if nothing encloses the date.
pub async fn resolve_budget_year<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    date: NaiveDate,
) -> Result<Uuid, RepoError> {
    let enclosing: Vec<BudgetYear> = budget_years::Entity::find()
        .filter(budget_years::Column::UserId.eq(user_id))
        .filter(budget_years::Column::StartDate.lte(date))
        .filter(budget_years::Column::EndDate.gte(date))
        .all(conn)
        .await?
        .iter()
        .map(BudgetYear::from)
        .collect();

    let resolution = budget_year::resolve(&enclosing, date)?;
    if resolution.is_ambiguous() {
        warn!(
            user_id = %user_id,
            date = %date,
            matches = resolution.matches,
            chosen = %resolution.budget_year_id,
            "Date falls inside overlapping budget years, using the earliest"
        );
    }

    Ok(resolution.budget_year_id.into_inner())
}

/// The user's active budget year, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn active_budget_year<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
) -> Result<Option<budget_years::Model>, DbErr> {
    budget_years::Entity::find()
        .filter(budget_years::Column::UserId.eq(user_id))
        .filter(budget_years::Column::IsActive.eq(true))
        .one(conn)
        .await
}

/// The requested budget year, or the active one when none is given.
///
/// # Errors
///
/// Returns `NotFound` for a foreign or missing year and `Validation` when no
/// year is given and none is active.
pub async fn year_or_active<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    budget_year_id: Option<Uuid>,
) -> Result<budget_years::Model, RepoError> {
    match budget_year_id {
        Some(id) => find_owned_year(conn, user_id, id).await,
        None => active_budget_year(conn, user_id).await?.ok_or_else(|| {
            DomainError::validation("no active budget year, pass budget_year_id").into()
        }),
    }
}

/// Loads a budget year owned by the user.
///
/// # Errors
///
/// Returns `NotFound` if missing or owned by someone else.
pub async fn find_owned_year<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
) -> Result<budget_years::Model, RepoError> {
    budget_years::Entity::find_by_id(id)
        .filter(budget_years::Column::UserId.eq(user_id))
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found("budget year", id).into())
}

/// `SUM(amount)` helper: runs a one-column aggregate and treats NULL as zero.
pub(crate) async fn sum_or_zero<E, C>(
    conn: &C,
    select: sea_orm::Select<E>,
    column: E::Column,
) -> Result<Decimal, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let total: Option<Option<Decimal>> = select
        .select_only()
        .column_as(Expr::col(column).sum(), "total")
        .into_tuple()
        .one(conn)
        .await?;
    Ok(total.flatten().unwrap_or_default())
}
