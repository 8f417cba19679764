//! Per-user settings repository.

use hearth_core::settings::SettingKey;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::system_settings;
use crate::error::RepoError;

/// Settings repository.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    db: DatabaseConnection,
}

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the user's stored settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<system_settings::Model>, RepoError> {
        Ok(system_settings::Entity::find()
            .filter(system_settings::Column::UserId.eq(user_id))
            .order_by_asc(system_settings::Column::Key)
            .all(&self.db)
            .await?)
    }

    /// Stores a validated value for `key`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a malformed value, or a database error.
    pub async fn put(
        &self,
        user_id: Uuid,
        key: SettingKey,
        value: &str,
    ) -> Result<system_settings::Model, RepoError> {
        let value = key.normalize_value(value)?;
        let now = chrono::Utc::now().into();

        let existing = system_settings::Entity::find()
            .filter(system_settings::Column::UserId.eq(user_id))
            .filter(system_settings::Column::Key.eq(key.as_str()))
            .one(&self.db)
            .await?;

        let saved = match existing {
            Some(setting) => {
                let mut active: system_settings::ActiveModel = setting.into();
                active.value = Set(value);
                active.updated_at = Set(now);
                active.update(&self.db).await?
            }
            None => {
                system_settings::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    user_id: Set(user_id),
                    key: Set(key.as_str().to_string()),
                    value: Set(value),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await?
            }
        };

        Ok(saved)
    }
}

/// Reads one raw setting value.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn get_setting<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    key: SettingKey,
) -> Result<Option<String>, DbErr> {
    Ok(system_settings::Entity::find()
        .filter(system_settings::Column::UserId.eq(user_id))
        .filter(system_settings::Column::Key.eq(key.as_str()))
        .one(conn)
        .await?
        .map(|s| s.value))
}
