//! Repository error type.

use hearth_core::DomainError;
use hearth_shared::AppError;
use sea_orm::{DbErr, SqlErr};

/// Error returned by every repository method.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A budgeting rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The store failed for reasons outside the rules.
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for RepoError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                Self::Domain(DomainError::DuplicateName {
                    entity: "record",
                    name: detail,
                })
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                Self::Domain(DomainError::ConstraintViolation(detail))
            }
            _ => Self::Database(err),
        }
    }
}

impl RepoError {
    /// Rewrites a unique violation into a `DuplicateName` naming the entity
    /// and the name that collided.
    #[must_use]
    pub fn duplicate_as(self, entity: &'static str, name: &str) -> Self {
        match self {
            Self::Domain(DomainError::DuplicateName { .. }) => {
                Self::Domain(DomainError::DuplicateName {
                    entity,
                    name: name.to_string(),
                })
            }
            other => other,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_db_error_stays_opaque() {
        let err: RepoError = DbErr::Custom("connection reset".into()).into();
        assert!(matches!(err, RepoError::Database(_)));
        let app: AppError = err.into();
        assert_eq!(app.status_code(), 500);
    }

    #[test]
    fn test_duplicate_as_renames() {
        let err = RepoError::Domain(DomainError::DuplicateName {
            entity: "record",
            name: "funds_user_id_name_key".into(),
        })
        .duplicate_as("fund", "Groceries");

        assert_eq!(err.to_string(), "fund name already exists: Groceries");
    }

    #[test]
    fn test_domain_error_passes_through() {
        let app: AppError = RepoError::from(DomainError::validation("bad")).into();
        assert_eq!(app.status_code(), 400);
    }
}
