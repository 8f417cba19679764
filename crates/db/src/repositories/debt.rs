//! Debt repository.

use hearth_core::{
    DomainError,
    debt::{DebtPatch, NewDebt, ensure_can_mark_paid},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{debts, sea_orm_active_enums::DebtStatus};
use crate::error::RepoError;

/// Debt repository.
#[derive(Debug, Clone)]
pub struct DebtRepository {
    db: DatabaseConnection,
}

impl DebtRepository {
    /// Creates a new debt repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists debts, unpaid first, then by due date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        status: Option<DebtStatus>,
    ) -> Result<Vec<debts::Model>, RepoError> {
        let mut query = debts::Entity::find().filter(debts::Column::UserId.eq(user_id));
        if let Some(status) = status {
            query = query.filter(debts::Column::Status.eq(status));
        }
        Ok(query
            .order_by_asc(debts::Column::Status)
            .order_by_asc(debts::Column::DueDate)
            .all(&self.db)
            .await?)
    }

    /// Gets one debt.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if missing or owned by someone else.
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<debts::Model, RepoError> {
        debts::Entity::find_by_id(id)
            .filter(debts::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("debt", id).into())
    }

    /// Records an unpaid debt.
    ///
    /// # Errors
    ///
    /// Returns `Validation` or a database error.
    pub async fn create(&self, user_id: Uuid, input: NewDebt) -> Result<debts::Model, RepoError> {
        input.validate()?;
        let now = chrono::Utc::now().into();

        let debt = debts::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            name: Set(input.name.trim().to_string()),
            creditor: Set(input.creditor),
            amount: Set(input.amount),
            due_date: Set(input.due_date),
            status: Set(DebtStatus::Unpaid),
            paid_at: Set(None),
            note: Set(input.note),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(debt)
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
        patch: DebtPatch,
    ) -> Result<debts::Model, RepoError> {
        patch.validate()?;
        let existing = self.get(user_id, id).await?;
        let mut active: debts::ActiveModel = existing.into();

        if let Some(name) = patch.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(creditor) = patch.creditor {
            active.creditor = Set(creditor);
        }
        if let Some(amount) = patch.amount {
            active.amount = Set(amount);
        }
        if let Some(due_date) = patch.due_date {
            active.due_date = Set(due_date);
        }
        if let Some(note) = patch.note {
            active.note = Set(note);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Marks a debt paid. One-way.
    ///
    /// The row is locked for the check, so of two concurrent calls the
    /// second sees `Paid` and fails.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `AlreadyInState`, or a database error.
    pub async fn mark_paid(&self, user_id: Uuid, id: Uuid) -> Result<debts::Model, RepoError> {
        let txn = self.db.begin().await?;
        let existing = debts::Entity::find_by_id(id)
            .filter(debts::Column::UserId.eq(user_id))
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("debt", id))?;
        ensure_can_mark_paid(existing.status.into())?;

        let now = chrono::Utc::now().into();
        let mut active: debts::ActiveModel = existing.into();
        active.status = Set(DebtStatus::Paid);
        active.paid_at = Set(Some(now));
        active.updated_at = Set(now);

        let paid = active.update(&txn).await?;
        txn.commit().await?;
        info!(user_id = %user_id, debt_id = %id, "Debt marked paid");
        Ok(paid)
    }

    /// Deletes a debt.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let result = debts::Entity::delete_many()
            .filter(debts::Column::Id.eq(id))
            .filter(debts::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("debt", id).into());
        }
        Ok(())
    }
}
