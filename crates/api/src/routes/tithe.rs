//! Tithe routes: the yearly summary and recorded payments.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::YearQuery;
use crate::{ApiResult, AppState, extractors::ValidatedJson, middleware::AuthUser};
use hearth_core::tithe::NewTitheGiven;
use hearth_db::{TitheRepository, entities::tithe_given, repositories::YearTithe};
use hearth_shared::types::{PageRequest, PageResponse};

/// Creates the tithe routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tithe", get(tithe_summary))
        .route("/tithe/given", get(list_given).post(create_given))
        .route("/tithe/given/{id}", delete(delete_given))
}

/// Request body for recording a tithe payment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTitheGivenRequest {
    /// Amount given.
    pub amount: Decimal,
    /// Date given.
    pub date: NaiveDate,
    /// Who received it.
    #[validate(length(max = 200))]
    pub recipient: Option<String>,
    /// Free-form note.
    pub note: Option<String>,
}

/// GET `/tithe` - Required, given and remaining for a year.
async fn tithe_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<YearQuery>,
) -> ApiResult<Json<YearTithe>> {
    let repo = TitheRepository::new(state.conn());
    Ok(Json(repo.summary(auth.user_id(), query.budget_year_id).await?))
}

/// GET `/tithe/given`
async fn list_given(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
    Query(filter): Query<YearQuery>,
) -> ApiResult<Json<PageResponse<tithe_given::Model>>> {
    let repo = TitheRepository::new(state.conn());
    Ok(Json(
        repo.list_given(auth.user_id(), filter.budget_year_id, &page)
            .await?,
    ))
}

/// POST `/tithe/given`
async fn create_given(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateTitheGivenRequest>,
) -> ApiResult<(StatusCode, Json<tithe_given::Model>)> {
    let repo = TitheRepository::new(state.conn());
    let given = repo
        .create_given(
            auth.user_id(),
            NewTitheGiven {
                amount: payload.amount,
                date: payload.date,
                recipient: payload.recipient,
                note: payload.note,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(given)))
}

/// DELETE `/tithe/given/{id}`
async fn delete_given(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = TitheRepository::new(state.conn());
    repo.delete_given(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
