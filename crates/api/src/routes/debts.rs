//! Debt routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::double_option;
use crate::{ApiResult, AppState, extractors::ValidatedJson, middleware::AuthUser};
use hearth_core::debt::{DebtPatch, NewDebt};
use hearth_db::{
    DebtRepository,
    entities::{debts, sea_orm_active_enums::DebtStatus},
};

/// Creates the debt routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/debts", get(list_debts).post(create_debt))
        .route(
            "/debts/{id}",
            get(get_debt).put(update_debt).delete(delete_debt),
        )
        .route("/debts/{id}/pay", post(pay_debt))
}

/// Query parameters for listing debts.
#[derive(Debug, Default, Deserialize)]
pub struct ListDebtsQuery {
    /// unpaid or paid.
    pub status: Option<DebtStatus>,
}

/// Request body for recording a debt.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDebtRequest {
    /// What the debt is for.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Who is owed.
    #[validate(length(max = 200))]
    pub creditor: Option<String>,
    /// Amount owed.
    pub amount: Decimal,
    /// When it is due.
    pub due_date: Option<NaiveDate>,
    /// Free-form note.
    pub note: Option<String>,
}

/// Request body for updating a debt. Explicit nulls clear optional fields.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDebtRequest {
    /// New name.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// New creditor.
    #[serde(default, deserialize_with = "double_option")]
    pub creditor: Option<Option<String>>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New due date.
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,
    /// New note.
    #[serde(default, deserialize_with = "double_option")]
    pub note: Option<Option<String>>,
}

/// GET `/debts`
async fn list_debts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListDebtsQuery>,
) -> ApiResult<Json<Vec<debts::Model>>> {
    let repo = DebtRepository::new(state.conn());
    Ok(Json(repo.list(auth.user_id(), query.status).await?))
}

/// POST `/debts`
async fn create_debt(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateDebtRequest>,
) -> ApiResult<(StatusCode, Json<debts::Model>)> {
    let repo = DebtRepository::new(state.conn());
    let debt = repo
        .create(
            auth.user_id(),
            NewDebt {
                name: payload.name,
                creditor: payload.creditor,
                amount: payload.amount,
                due_date: payload.due_date,
                note: payload.note,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(debt)))
}

/// GET `/debts/{id}`
async fn get_debt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<debts::Model>> {
    let repo = DebtRepository::new(state.conn());
    Ok(Json(repo.get(auth.user_id(), id).await?))
}

/// PUT `/debts/{id}`
async fn update_debt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateDebtRequest>,
) -> ApiResult<Json<debts::Model>> {
    let repo = DebtRepository::new(state.conn());
    let debt = repo
        .update(
            auth.user_id(),
            id,
            DebtPatch {
                name: payload.name,
                creditor: payload.creditor,
                amount: payload.amount,
                due_date: payload.due_date,
                note: payload.note,
            },
        )
        .await?;
    Ok(Json(debt))
}

/// POST `/debts/{id}/pay` - One-way; paying twice is `already_in_state`.
async fn pay_debt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<debts::Model>> {
    let repo = DebtRepository::new(state.conn());
    Ok(Json(repo.mark_paid(auth.user_id(), id).await?))
}

/// DELETE `/debts/{id}`
async fn delete_debt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = DebtRepository::new(state.conn());
    repo.delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
