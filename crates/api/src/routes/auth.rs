//! Authentication routes for login, register, and token refresh.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use chrono::Utc;
use tracing::info;

use crate::{AppState, ApiResult, extractors::ValidatedJson};
use hearth_core::auth::{hash_password, normalize_email, validate_password, verify_password};
use hearth_db::{RepoError, UserRepository, entities::users};
use hearth_shared::{
    AppError,
    auth::{LoginRequest, LoginResponse, RefreshRequest, RegisterRequest, TokenKind, UserInfo},
};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/refresh", post(refresh))
}

/// Issues a fresh token pair for a user.
fn issue_tokens(state: &AppState, user: users::Model) -> ApiResult<LoginResponse> {
    let access_token = state.jwt_service.generate_access_token(user.id)?;
    let refresh_token = state.jwt_service.generate_refresh_token(user.id)?;

    Ok(LoginResponse {
        user: UserInfo {
            id: user.id,
            email: user.email,
            name: user.name,
        },
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    })
}

/// POST /auth/login - Authenticate user and return tokens.
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user_repo = UserRepository::new(state.conn());
    let email = normalize_email(&payload.email);

    let user = user_repo
        .find_by_email(&email)
        .await
        .map_err(RepoError::from)?;
    let Some(user) = user else {
        info!(email = %email, "Login attempt for non-existent user");
        return Err(AppError::InvalidCredentials.into());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(AppError::InvalidCredentials.into());
    }

    info!(user_id = %user.id, "User logged in successfully");
    Ok(Json(issue_tokens(&state, user)?))
}

/// POST /auth/register - Register a user with a default budget year.
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<LoginResponse>)> {
    validate_password(&payload.password)?;
    let password_hash = hash_password(&payload.password)?;

    let (user, _year) = UserRepository::new(state.conn())
        .register(
            &normalize_email(&payload.email),
            &password_hash,
            payload.name.trim(),
            Utc::now().date_naive(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(issue_tokens(&state, user)?)))
}

/// POST /auth/refresh - Exchange a refresh token for a new pair.
async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let claims = state
        .jwt_service
        .validate_token(&payload.refresh_token, TokenKind::Refresh)?;

    let user = UserRepository::new(state.conn())
        .find_by_id(claims.user_id())
        .await
        .map_err(RepoError::from)?
        .ok_or_else(|| AppError::Unauthenticated("user no longer exists".to_string()))?;

    Ok(Json(issue_tokens(&state, user)?))
}
