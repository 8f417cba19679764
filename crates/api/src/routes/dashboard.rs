//! Dashboard routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use super::YearQuery;
use crate::{ApiResult, AppState, middleware::AuthUser};
use hearth_core::dashboard::DashboardSummary;
use hearth_db::DashboardRepository;

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard/summary", get(summary))
}

/// GET `/dashboard/summary` - Balance, totals, total budget and tithe for a year.
async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<YearQuery>,
) -> ApiResult<Json<DashboardSummary>> {
    let repo = DashboardRepository::new(state.conn());
    Ok(Json(repo.summary(auth.user_id(), query.budget_year_id).await?))
}
