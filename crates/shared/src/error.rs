//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types surfaced to API clients.
#[derive(Debug, Error)]
pub enum AppError {
    /// No valid credentials were presented.
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    /// Email or password did not match.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Bearer token has expired.
    #[error("Token has expired")]
    TokenExpired,

    /// Resource not found or not owned by the caller.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A per-user unique name is already taken.
    #[error("Name already in use: {0}")]
    DuplicateName(String),

    /// Budget year date range collides with an existing one.
    #[error("Budget year overlaps with existing year: {0}")]
    OverlappingBudgetYear(String),

    /// No budget year encloses the given date.
    #[error("No budget year covers date {0}")]
    NoBudgetYearForDate(String),

    /// Deletion refused because other rows depend on this one.
    #[error("Cannot delete: {0}")]
    HasDependentData(String),

    /// The requested state transition has already happened.
    #[error("Already in requested state: {0}")]
    AlreadyInState(String),

    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A store constraint rejected the write.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated(_) | Self::InvalidCredentials | Self::TokenExpired => 401,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::DuplicateName(_)
            | Self::OverlappingBudgetYear(_)
            | Self::HasDependentData(_)
            | Self::AlreadyInState(_)
            | Self::ConstraintViolation(_) => 409,
            Self::NoBudgetYearForDate(_) => 422,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "unauthenticated",
            Self::InvalidCredentials => "invalid_credentials",
            Self::TokenExpired => "token_expired",
            Self::NotFound(_) => "not_found",
            Self::DuplicateName(_) => "duplicate_name",
            Self::OverlappingBudgetYear(_) => "overlapping_budget_year",
            Self::NoBudgetYearForDate(_) => "no_budget_year_for_date",
            Self::HasDependentData(_) => "has_dependent_data",
            Self::AlreadyInState(_) => "already_in_state",
            Self::Validation(_) => "validation_error",
            Self::ConstraintViolation(_) => "constraint_violation",
            Self::Database(_) => "database_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Returns true for errors whose message must not reach the client.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}
