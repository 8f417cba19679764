//! Net-worth snapshot routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{ApiResult, AppState, extractors::ValidatedJson, middleware::AuthUser};
use hearth_core::asset::{AssetKind, NewAssetDetail, NewAssetSnapshot};
use hearth_db::{AssetRepository, repositories::SnapshotWithDetails};

/// Creates the asset routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/assets", get(list_snapshots).post(create_snapshot))
        .route("/assets/{id}", get(get_snapshot).delete(delete_snapshot))
}

/// One line of a snapshot.
#[derive(Debug, Deserialize, Validate)]
pub struct AssetDetailRequest {
    /// What the line is (e.g. "Savings account").
    #[validate(length(min = 1, max = 200))]
    pub label: String,
    /// asset or liability.
    pub kind: AssetKind,
    /// Value on the snapshot date.
    pub amount: Decimal,
}

/// Request body for recording a snapshot.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSnapshotRequest {
    /// Snapshot name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Date the values were taken.
    pub snapshot_date: NaiveDate,
    /// Free-form note.
    pub note: Option<String>,
    /// Lines.
    #[validate(nested)]
    #[serde(default)]
    pub details: Vec<AssetDetailRequest>,
}

/// GET `/assets` - Snapshots newest first with net worth.
async fn list_snapshots(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<SnapshotWithDetails>>> {
    let repo = AssetRepository::new(state.conn());
    Ok(Json(repo.list(auth.user_id()).await?))
}

/// POST `/assets`
async fn create_snapshot(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateSnapshotRequest>,
) -> ApiResult<(StatusCode, Json<SnapshotWithDetails>)> {
    let repo = AssetRepository::new(state.conn());
    let snapshot = repo
        .create(
            auth.user_id(),
            NewAssetSnapshot {
                name: payload.name,
                snapshot_date: payload.snapshot_date,
                note: payload.note,
                details: payload
                    .details
                    .into_iter()
                    .map(|d| NewAssetDetail {
                        label: d.label,
                        kind: d.kind,
                        amount: d.amount,
                    })
                    .collect(),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET `/assets/{id}`
async fn get_snapshot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SnapshotWithDetails>> {
    let repo = AssetRepository::new(state.conn());
    Ok(Json(repo.get(auth.user_id(), id).await?))
}

/// DELETE `/assets/{id}`
async fn delete_snapshot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = AssetRepository::new(state.conn());
    repo.delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
