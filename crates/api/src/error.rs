//! JSON error envelope for handlers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hearth_shared::AppError;
use serde_json::json;
use tracing::error;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An `AppError` on its way to the client as `{"error", "message"}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_server_error() {
            error!(error = %self.0, "Request failed");
            "An internal error occurred".to_string()
        } else {
            self.0.to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[case(AppError::NotFound("expense".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::OverlappingBudgetYear("2024".into()), StatusCode::CONFLICT)]
    #[case(AppError::NoBudgetYearForDate("2025-01-01".into()), StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(AppError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::TokenExpired, StatusCode::UNAUTHORIZED)]
    #[tokio::test]
    async fn test_status_mapping(#[case] err: AppError, #[case] status: StatusCode) {
        assert_eq!(ApiError(err).into_response().status(), status);
    }

    #[tokio::test]
    async fn test_client_error_body() {
        let response = ApiError(AppError::AlreadyInState("debt is already paid".into()))
            .into_response();
        let body = body_json(response).await;

        assert_eq!(body["error"], "already_in_state");
        assert_eq!(body["message"], "Already in requested state: debt is already paid");
    }

    #[tokio::test]
    async fn test_server_error_message_hidden() {
        let response = ApiError(AppError::Database("connection refused".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "database_error");
        assert_eq!(body["message"], "An internal error occurred");
    }
}
