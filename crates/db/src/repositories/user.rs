//! User repository for database operations.

use chrono::NaiveDate;
use hearth_core::{DomainError, budget_year::default_for_date};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{budget_years, users};
use crate::error::RepoError;

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a user together with an active budget year covering the
    /// calendar year of `today`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the email is taken, or a database error.
    pub async fn register(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
        today: NaiveDate,
    ) -> Result<(users::Model, budget_years::Model), RepoError> {
        if self.email_exists(email).await? {
            return Err(DomainError::DuplicateName {
                entity: "user",
                name: email.to_string(),
            }
            .into());
        }

        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();
        let user_id = Uuid::now_v7();

        let user = users::ActiveModel {
            id: Set(user_id),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(|e| RepoError::from(e).duplicate_as("user", email))?;

        let default_year = default_for_date(today);
        let year = budget_years::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            name: Set(default_year.name),
            start_date: Set(default_year.start_date),
            end_date: Set(default_year.end_date),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(user_id = %user.id, budget_year = %year.name, "User registered");
        Ok((user, year))
    }
}
