//! Expense category routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{ApiResult, AppState, extractors::ValidatedJson, middleware::AuthUser};
use hearth_db::{
    CategoryRepository,
    entities::categories,
    repositories::{CreateCategoryInput, UpdateCategoryInput},
};

/// Creates the category routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}

/// Query parameters for listing categories.
#[derive(Debug, Default, Deserialize)]
pub struct ListCategoriesQuery {
    /// Only categories charged to this fund.
    pub fund_id: Option<Uuid>,
}

/// Request body for creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Name, unique per user.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Fund expenses in this category are charged to.
    pub fund_id: Uuid,
}

/// Request body for updating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    /// New name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New fund; existing expenses stay with their old fund.
    pub fund_id: Option<Uuid>,
}

/// GET `/categories`
async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListCategoriesQuery>,
) -> ApiResult<Json<Vec<categories::Model>>> {
    let repo = CategoryRepository::new(state.conn());
    Ok(Json(repo.list(auth.user_id(), query.fund_id).await?))
}

/// POST `/categories`
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<categories::Model>)> {
    let repo = CategoryRepository::new(state.conn());
    let category = repo
        .create(
            auth.user_id(),
            CreateCategoryInput {
                name: payload.name,
                fund_id: payload.fund_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET `/categories/{id}`
async fn get_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<categories::Model>> {
    let repo = CategoryRepository::new(state.conn());
    Ok(Json(repo.get(auth.user_id(), id).await?))
}

/// PUT `/categories/{id}`
async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateCategoryRequest>,
) -> ApiResult<Json<categories::Model>> {
    let repo = CategoryRepository::new(state.conn());
    let category = repo
        .update(
            auth.user_id(),
            id,
            UpdateCategoryInput {
                name: payload.name,
                fund_id: payload.fund_id,
            },
        )
        .await?;
    Ok(Json(category))
}

/// DELETE `/categories/{id}` - Refused while expenses reference it.
async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = CategoryRepository::new(state.conn());
    repo.delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
