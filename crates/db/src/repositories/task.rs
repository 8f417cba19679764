//! Household task repository.

use hearth_core::{
    DomainError,
    task::{NewTask, TaskPatch, ensure_can_complete},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::tasks;
use crate::error::RepoError;

/// Task repository.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    db: DatabaseConnection,
}

impl TaskRepository {
    /// Creates a new task repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists tasks, open ones first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        include_completed: bool,
    ) -> Result<Vec<tasks::Model>, RepoError> {
        let mut query = tasks::Entity::find().filter(tasks::Column::UserId.eq(user_id));
        if !include_completed {
            query = query.filter(tasks::Column::IsCompleted.eq(false));
        }
        Ok(query
            .order_by_asc(tasks::Column::IsCompleted)
            .order_by_asc(tasks::Column::DueDate)
            .order_by_asc(tasks::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<tasks::Model, RepoError> {
        tasks::Entity::find_by_id(id)
            .filter(tasks::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("task", id).into())
    }

    /// Creates an open task.
    ///
    /// # Errors
    ///
    /// Returns `Validation` or a database error.
    pub async fn create(&self, user_id: Uuid, input: NewTask) -> Result<tasks::Model, RepoError> {
        input.validate()?;
        let now = chrono::Utc::now().into();

        Ok(tasks::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            title: Set(input.title.trim().to_string()),
            description: Set(input.description),
            due_date: Set(input.due_date),
            is_completed: Set(false),
            completed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?)
    }

    /// Applies a patch.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Validation`, or a database error.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: TaskPatch,
    ) -> Result<tasks::Model, RepoError> {
        patch.validate()?;
        let existing = self.get(user_id, id).await?;
        let mut active: tasks::ActiveModel = existing.into();

        if let Some(title) = patch.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(due_date) = patch.due_date {
            active.due_date = Set(due_date);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Marks a task complete. One-way.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AlreadyInState`, or a database error.
    pub async fn complete(&self, user_id: Uuid, id: Uuid) -> Result<tasks::Model, RepoError> {
        let txn = self.db.begin().await?;
        let existing = tasks::Entity::find_by_id(id)
            .filter(tasks::Column::UserId.eq(user_id))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("task", id))?;
        ensure_can_complete(existing.is_completed)?;

        let now = chrono::Utc::now().into();
        let mut active: tasks::ActiveModel = existing.into();
        active.is_completed = Set(true);
        active.completed_at = Set(Some(now));
        active.updated_at = Set(now);

        let completed = active.update(&txn).await?;
        txn.commit().await?;
        Ok(completed)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let result = tasks::Entity::delete_many()
            .filter(tasks::Column::Id.eq(id))
            .filter(tasks::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("task", id).into());
        }
        Ok(())
    }
}
