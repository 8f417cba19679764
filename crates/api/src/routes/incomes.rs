//! Income routes. Incomes land in the budget year enclosing their date.

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

use super::{YearQuery, double_option};
use crate::{ApiResult, AppState, extractors::ValidatedJson, middleware::AuthUser};
use hearth_core::ledger::{IncomePatch, NewIncome};
use hearth_db::{IncomeRepository, entities::incomes};
use hearth_shared::types::{PageRequest, PageResponse};

/// Creates the income routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/incomes", get(list_incomes).post(create_income))
        .route(
            "/incomes/{id}",
            get(get_income).put(update_income).delete(delete_income),
        )
}

/// Request body for recording an income.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateIncomeRequest {
    /// Amount received.
    pub amount: Decimal,
    /// Date received.
    pub date: NaiveDate,
    /// Where it came from.
    #[validate(length(min = 1, max = 200))]
    pub source: String,
    /// Free-form note.
    pub note: Option<String>,
}

/// Request body for updating an income. `note: null` clears the note.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateIncomeRequest {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New date; re-resolves the budget year.
    pub date: Option<NaiveDate>,
    /// New source.
    #[validate(length(min = 1, max = 200))]
    pub source: Option<String>,
    /// New note.
    #[serde(default, deserialize_with = "double_option")]
    pub note: Option<Option<String>>,
}

/// GET `/incomes` - Paginated, optionally for one budget year.
async fn list_incomes(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
    Query(filter): Query<YearQuery>,
) -> ApiResult<Json<PageResponse<incomes::Model>>> {
    let repo = IncomeRepository::new(state.conn());
    Ok(Json(
        repo.list(auth.user_id(), filter.budget_year_id, &page)
            .await?,
    ))
}

/// POST `/incomes`
async fn create_income(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateIncomeRequest>,
) -> ApiResult<(StatusCode, Json<incomes::Model>)> {
    let repo = IncomeRepository::new(state.conn());
    let income = repo
        .create(
            auth.user_id(),
            NewIncome {
                amount: payload.amount,
                date: payload.date,
                source: payload.source,
                note: payload.note,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(income)))
}

/// GET `/incomes/{id}`
async fn get_income(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<incomes::Model>> {
    let repo = IncomeRepository::new(state.conn());
    Ok(Json(repo.get(auth.user_id(), id).await?))
}

/// PUT `/incomes/{id}`
async fn update_income(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateIncomeRequest>,
) -> ApiResult<Json<incomes::Model>> {
    let repo = IncomeRepository::new(state.conn());
    let income = repo
        .update(
            auth.user_id(),
            id,
            IncomePatch {
                amount: payload.amount,
                date: payload.date,
                source: payload.source,
                note: payload.note,
            },
        )
        .await?;
    Ok(Json(income))
}

/// DELETE `/incomes/{id}`
async fn delete_income(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = IncomeRepository::new(state.conn());
    repo.delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
