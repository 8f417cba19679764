//! Per-user settings routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::Deserialize;
use validator::Validate;

use crate::{ApiResult, AppState, extractors::ValidatedJson, middleware::AuthUser};
use hearth_core::settings::SettingKey;
use hearth_db::{SettingsRepository, entities::system_settings};

/// Creates the settings routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(list_settings))
        .route("/settings/{key}", put(put_setting))
}

/// Request body for storing a setting.
#[derive(Debug, Deserialize, Validate)]
pub struct PutSettingRequest {
    /// Raw value; checked against the key's rules.
    #[validate(length(min = 1, max = 64))]
    pub value: String,
}

/// GET `/settings`
async fn list_settings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<system_settings::Model>>> {
    let repo = SettingsRepository::new(state.conn());
    Ok(Json(repo.list(auth.user_id()).await?))
}

/// PUT `/settings/{key}` - e.g. `tithe_percentage`.
async fn put_setting(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
    ValidatedJson(payload): ValidatedJson<PutSettingRequest>,
) -> ApiResult<Json<system_settings::Model>> {
    let key: SettingKey = key.parse()?;
    let repo = SettingsRepository::new(state.conn());
    Ok(Json(repo.put(auth.user_id(), key, &payload.value).await?))
}
