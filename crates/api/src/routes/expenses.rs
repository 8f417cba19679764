//! Expense routes. Every write adjusts the charged fund's `spent` in the
//! same transaction.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::double_option;
use crate::{ApiResult, AppState, extractors::ValidatedJson, middleware::AuthUser};
use hearth_core::ledger::{ExpensePatch, NewExpense};
use hearth_db::{ExpenseRepository, entities::expenses, repositories::ExpenseFilter};
use hearth_shared::types::{PageRequest, PageResponse};

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route(
            "/expenses/{id}",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

/// Query parameters for listing expenses.
#[derive(Debug, Default, Deserialize)]
pub struct ListExpensesQuery {
    /// Only this budget year.
    pub budget_year_id: Option<Uuid>,
    /// Only this fund.
    pub fund_id: Option<Uuid>,
    /// Only this category.
    pub category_id: Option<Uuid>,
}

/// Request body for recording an expense.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    /// Category; fixes the fund charged.
    pub category_id: Uuid,
    /// Amount spent.
    pub amount: Decimal,
    /// Date spent.
    pub date: NaiveDate,
    /// Short description.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Free-form note.
    pub note: Option<String>,
}

/// Request body for updating an expense. `note: null` clears the note.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateExpenseRequest {
    /// New category; moves the amount to its fund.
    pub category_id: Option<Uuid>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New date; re-resolves the budget year.
    pub date: Option<NaiveDate>,
    /// New description.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// New note.
    #[serde(default, deserialize_with = "double_option")]
    pub note: Option<Option<String>>,
}

/// GET `/expenses` - Paginated, filterable by year, fund and category.
async fn list_expenses(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
    Query(query): Query<ListExpensesQuery>,
) -> ApiResult<Json<PageResponse<expenses::Model>>> {
    let repo = ExpenseRepository::new(state.conn());
    let filter = ExpenseFilter {
        budget_year_id: query.budget_year_id,
        fund_id: query.fund_id,
        category_id: query.category_id,
    };
    Ok(Json(repo.list(auth.user_id(), filter, &page).await?))
}

/// POST `/expenses`
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateExpenseRequest>,
) -> ApiResult<(StatusCode, Json<expenses::Model>)> {
    let repo = ExpenseRepository::new(state.conn());
    let expense = repo
        .create(
            auth.user_id(),
            NewExpense {
                category_id: payload.category_id.into(),
                amount: payload.amount,
                date: payload.date,
                name: payload.name,
                note: payload.note,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET `/expenses/{id}`
async fn get_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<expenses::Model>> {
    let repo = ExpenseRepository::new(state.conn());
    Ok(Json(repo.get(auth.user_id(), id).await?))
}

/// PUT `/expenses/{id}`
async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateExpenseRequest>,
) -> ApiResult<Json<expenses::Model>> {
    let repo = ExpenseRepository::new(state.conn());
    let expense = repo
        .update(
            auth.user_id(),
            id,
            ExpensePatch {
                category_id: payload.category_id.map(Into::into),
                amount: payload.amount,
                date: payload.date,
                name: payload.name,
                note: payload.note,
            },
        )
        .await?;
    Ok(Json(expense))
}

/// DELETE `/expenses/{id}`
async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = ExpenseRepository::new(state.conn());
    repo.delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
