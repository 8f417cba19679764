//! Fund routes: buckets, their yearly budgets and the remaining-balance summary.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::YearQuery;
use crate::{ApiResult, AppState, extractors::ValidatedJson, middleware::AuthUser};
use hearth_core::fund::{FundLevel, FundType};
use hearth_db::{
    FundRepository,
    entities::{fund_budgets, funds},
    repositories::{CreateFundInput, FundSummary, SetFundBudgetInput, UpdateFundInput},
};

/// Creates the fund routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/funds", get(list_funds).post(create_fund))
        .route("/funds/summary", get(fund_summary))
        .route(
            "/funds/{id}",
            get(get_fund).put(update_fund).delete(delete_fund),
        )
        .route("/funds/{id}/activate", post(activate_fund))
        .route("/funds/{id}/deactivate", post(deactivate_fund))
        .route("/funds/{id}/budget", put(set_fund_budget))
}

/// Query parameters for listing funds.
#[derive(Debug, Default, Deserialize)]
pub struct ListFundsQuery {
    /// Include deactivated funds.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Request body for creating a fund.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFundRequest {
    /// Fund name, unique per user.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// monthly, annual or savings.
    pub fund_type: FundType,
    /// Priority tier, 1 to 3.
    #[serde(default)]
    pub level: FundLevel,
    /// Whether the fund counts toward the yearly budget.
    #[serde(default = "default_true")]
    pub include_in_budget: bool,
    /// Sort key.
    #[serde(default)]
    pub display_order: i32,
    /// Budget for the active year.
    pub amount: Option<Decimal>,
}

const fn default_true() -> bool {
    true
}

/// Request body for updating a fund.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFundRequest {
    /// New name.
    #[validate(length(min = 1, max = 100))]
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

/// Request body for setting a fund's budget in one year.
#[derive(Debug, Deserialize, Validate)]
pub struct SetFundBudgetRequest {
    /// Year to set; the active year when absent.
    pub budget_year_id: Option<Uuid>,
    /// Allocated amount.
    pub amount: Decimal,
    /// Amount handed out so far.
    pub amount_given: Option<Decimal>,
}

/// GET `/funds`
async fn list_funds(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListFundsQuery>,
) -> ApiResult<Json<Vec<funds::Model>>> {
    let repo = FundRepository::new(state.conn());
    Ok(Json(repo.list(auth.user_id(), query.include_inactive).await?))
}

/// POST `/funds` - Create a fund with a budget in the active year.
async fn create_fund(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateFundRequest>,
) -> ApiResult<(StatusCode, Json<funds::Model>)> {
    let repo = FundRepository::new(state.conn());
    let fund = repo
        .create(
            auth.user_id(),
            CreateFundInput {
                name: payload.name,
                fund_type: payload.fund_type,
                level: payload.level,
                include_in_budget: payload.include_in_budget,
                display_order: payload.display_order,
                amount: payload.amount,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(fund)))
}

/// GET `/funds/summary` - Funds with budgets and remaining balances for a year.
async fn fund_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<YearQuery>,
) -> ApiResult<Json<FundSummary>> {
    let repo = FundRepository::new(state.conn());
    Ok(Json(repo.summary(auth.user_id(), query.budget_year_id).await?))
}

/// GET `/funds/{id}`
async fn get_fund(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<funds::Model>> {
    let repo = FundRepository::new(state.conn());
    Ok(Json(repo.get(auth.user_id(), id).await?))
}

/// PUT `/funds/{id}`
async fn update_fund(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateFundRequest>,
) -> ApiResult<Json<funds::Model>> {
    let repo = FundRepository::new(state.conn());
    let fund = repo
        .update(
            auth.user_id(),
            id,
            UpdateFundInput {
                name: payload.name,
                fund_type: payload.fund_type,
                level: payload.level,
                include_in_budget: payload.include_in_budget,
                display_order: payload.display_order,
            },
        )
        .await?;
    Ok(Json(fund))
}

/// POST `/funds/{id}/activate`
async fn activate_fund(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<funds::Model>> {
    let repo = FundRepository::new(state.conn());
    Ok(Json(repo.set_active(auth.user_id(), id, true).await?))
}

/// POST `/funds/{id}/deactivate`
async fn deactivate_fund(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<funds::Model>> {
    let repo = FundRepository::new(state.conn());
    Ok(Json(repo.set_active(auth.user_id(), id, false).await?))
}

/// PUT `/funds/{id}/budget` - Set the allocation for one year.
async fn set_fund_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<SetFundBudgetRequest>,
) -> ApiResult<Json<fund_budgets::Model>> {
    let repo = FundRepository::new(state.conn());
    let budget = repo
        .set_budget(
            auth.user_id(),
            id,
            SetFundBudgetInput {
                budget_year_id: payload.budget_year_id,
                amount: payload.amount,
                amount_given: payload.amount_given,
            },
        )
        .await?;
    Ok(Json(budget))
}

/// DELETE `/funds/{id}` - Refused while categories or expenses reference it.
async fn delete_fund(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = FundRepository::new(state.conn());
    repo.delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
