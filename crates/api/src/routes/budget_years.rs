//! Budget year routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{ApiResult, AppState, extractors::ValidatedJson, middleware::AuthUser};
use hearth_core::budget_year::NewBudgetYear;
use hearth_db::{BudgetYearRepository, entities::budget_years, repositories::UpdateBudgetYearInput};
use hearth_shared::AppError;

/// Creates the budget year routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget-years", get(list_years).post(create_year))
        .route("/budget-years/active", get(active_year))
        .route(
            "/budget-years/{id}",
            get(get_year).put(update_year).delete(delete_year),
        )
        .route("/budget-years/{id}/activate", post(activate_year))
}

/// Request body for creating a budget year.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBudgetYearRequest {
    /// Display name (e.g. "2025").
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// First day, inclusive.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
}

/// Request body for updating a budget year.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBudgetYearRequest {
    /// New name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New first day.
    pub start_date: Option<NaiveDate>,
    /// New last day.
    pub end_date: Option<NaiveDate>,
}

/// GET `/budget-years` - All of the caller's years, newest first.
async fn list_years(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<budget_years::Model>>> {
    let repo = BudgetYearRepository::new(state.conn());
    Ok(Json(repo.list(auth.user_id()).await?))
}

/// POST `/budget-years` - Create a year and provision its fund budgets.
async fn create_year(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateBudgetYearRequest>,
) -> ApiResult<(StatusCode, Json<budget_years::Model>)> {
    let repo = BudgetYearRepository::new(state.conn());
    let year = repo
        .create(
            auth.user_id(),
            NewBudgetYear {
                name: payload.name,
                start_date: payload.start_date,
                end_date: payload.end_date,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(year)))
}

/// GET `/budget-years/active` - The caller's active year.
async fn active_year(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<budget_years::Model>> {
    let repo = BudgetYearRepository::new(state.conn());
    repo.active(auth.user_id())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("no active budget year".to_string()).into())
}

/// GET `/budget-years/{id}`
async fn get_year(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<budget_years::Model>> {
    let repo = BudgetYearRepository::new(state.conn());
    Ok(Json(repo.get(auth.user_id(), id).await?))
}

/// PUT `/budget-years/{id}` - Rename or move a year; overlap is re-checked.
async fn update_year(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBudgetYearRequest>,
) -> ApiResult<Json<budget_years::Model>> {
    let repo = BudgetYearRepository::new(state.conn());
    let year = repo
        .update(
            auth.user_id(),
            id,
            UpdateBudgetYearInput {
                name: payload.name,
                start_date: payload.start_date,
                end_date: payload.end_date,
            },
        )
        .await?;
    Ok(Json(year))
}

/// POST `/budget-years/{id}/activate` - Make this the only active year.
async fn activate_year(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<budget_years::Model>> {
    let repo = BudgetYearRepository::new(state.conn());
    Ok(Json(repo.activate(auth.user_id(), id).await?))
}

/// DELETE `/budget-years/{id}` - Refused while incomes or expenses remain.
async fn delete_year(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = BudgetYearRepository::new(state.conn());
    repo.delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
