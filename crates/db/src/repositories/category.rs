//! Category repository.

use hearth_core::{DomainError, fund::normalize_name};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::fund::find_owned_fund;
use crate::entities::{categories, expenses};
use crate::error::RepoError;

/// Input for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    /// Name, unique per user.
    pub name: String,
    /// Fund expenses in this category are charged to.
    pub fund_id: Uuid,
}

/// Partial update of a category. Moving a category to another fund does not
/// move its existing expenses.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    /// New name.
    pub name: Option<String>,
    /// New fund.
    pub fund_id: Option<Uuid>,
}

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists categories, optionally for one fund.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        fund_id: Option<Uuid>,
    ) -> Result<Vec<categories::Model>, RepoError> {
        let mut query =
            categories::Entity::find().filter(categories::Column::UserId.eq(user_id));
        if let Some(fund_id) = fund_id {
            query = query.filter(categories::Column::FundId.eq(fund_id));
        }
        Ok(query
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Gets one category.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if missing or owned by someone else.
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<categories::Model, RepoError> {
        find_owned_category(&self.db, user_id, id).await
    }

    /// Creates a category under one of the user's funds.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a foreign fund, `DuplicateName`, `Validation`,
    /// or a database error.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateCategoryInput,
    ) -> Result<categories::Model, RepoError> {
        let name = normalize_name(&input.name)?;
        find_owned_fund(&self.db, user_id, input.fund_id).await?;

        let now = chrono::Utc::now().into();
        categories::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            fund_id: Set(input.fund_id),
            name: Set(name.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| RepoError::from(e).duplicate_as("category", &name))
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `DuplicateName`, `Validation`, or a database error.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateCategoryInput,
    ) -> Result<categories::Model, RepoError> {
        let existing = find_owned_category(&self.db, user_id, id).await?;
        let mut active: categories::ActiveModel = existing.into();

        let mut new_name = None;
        if let Some(name) = input.name {
            let name = normalize_name(&name)?;
            active.name = Set(name.clone());
            new_name = Some(name);
        }
        if let Some(fund_id) = input.fund_id {
            find_owned_fund(&self.db, user_id, fund_id).await?;
            active.fund_id = Set(fund_id);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(|e| {
            RepoError::from(e).duplicate_as("category", new_name.as_deref().unwrap_or_default())
        })
    }

    /// Deletes a category no expense references.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `HasDependentData`, or a database error.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        find_owned_category(&self.db, user_id, id).await?;

        let expense_count = expenses::Entity::find()
            .filter(expenses::Column::CategoryId.eq(id))
            .count(&self.db)
            .await?;
        if expense_count > 0 {
            return Err(DomainError::HasDependentData {
                entity: "category",
                dependents: "expenses",
            }
            .into());
        }

        categories::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

/// Loads a category owned by the user.
pub(crate) async fn find_owned_category<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    id: Uuid,
) -> Result<categories::Model, RepoError> {
    categories::Entity::find_by_id(id)
        .filter(categories::Column::UserId.eq(user_id))
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found("category", id).into())
}
