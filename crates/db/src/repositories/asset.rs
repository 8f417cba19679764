//! Net-worth snapshot repository.

use hearth_core::{
    DomainError,
    asset::{self, AssetKind, NetWorth, NewAssetSnapshot},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::entities::{asset_details, asset_snapshots};
use crate::error::RepoError;

/// A snapshot with its lines and derived totals.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotWithDetails {
    /// The snapshot.
    #[serde(flatten)]
    pub snapshot: asset_snapshots::Model,
    /// Its lines.
    pub details: Vec<asset_details::Model>,
    /// Totals over the lines.
    #[serde(flatten)]
    pub totals: NetWorth,
}

impl SnapshotWithDetails {
    fn new(snapshot: asset_snapshots::Model, details: Vec<asset_details::Model>) -> Self {
        let totals = asset::net_worth(
            details
                .iter()
                .map(|d| (AssetKind::from(d.kind), d.amount)),
        );
        Self {
            snapshot,
            details,
            totals,
        }
    }
}

/// Asset snapshot repository.
#[derive(Debug, Clone)]
pub struct AssetRepository {
    db: DatabaseConnection,
}

impl AssetRepository {
    /// Creates a new asset repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists snapshots newest first, each with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<SnapshotWithDetails>, RepoError> {
        let snapshots = asset_snapshots::Entity::find()
            .filter(asset_snapshots::Column::UserId.eq(user_id))
            .order_by_desc(asset_snapshots::Column::SnapshotDate)
            .all(&self.db)
            .await?;
        let details = snapshots.load_many(asset_details::Entity, &self.db).await?;

        Ok(snapshots
            .into_iter()
            .zip(details)
            .map(|(s, d)| SnapshotWithDetails::new(s, d))
            .collect())
    }

    /// Gets one snapshot with its lines.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if missing or owned by someone else.
    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<SnapshotWithDetails, RepoError> {
        let snapshot = asset_snapshots::Entity::find_by_id(id)
            .filter(asset_snapshots::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("asset snapshot", id))?;
        let details = asset_details::Entity::find()
            .filter(asset_details::Column::SnapshotId.eq(id))
            .order_by_asc(asset_details::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(SnapshotWithDetails::new(snapshot, details))
    }

    /// Creates a snapshot and its lines in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `Validation` or a database error.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: NewAssetSnapshot,
    ) -> Result<SnapshotWithDetails, RepoError> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();

        let snapshot = asset_snapshots::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id),
            name: Set(input.name.trim().to_string()),
            snapshot_date: Set(input.snapshot_date),
            note: Set(input.note),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut details = Vec::with_capacity(input.details.len());
        for line in input.details {
            let detail = asset_details::ActiveModel {
                id: Set(Uuid::now_v7()),
                snapshot_id: Set(snapshot.id),
                label: Set(line.label.trim().to_string()),
                kind: Set(line.kind.into()),
                amount: Set(line.amount),
                created_at: Set(now),
            }
            .insert(&txn)
            .await?;
            details.push(detail);
        }

        txn.commit().await?;

        let created = SnapshotWithDetails::new(snapshot, details);
        info!(
            user_id = %user_id,
            snapshot_id = %created.snapshot.id,
            net_worth = %created.totals.net_worth,
            "Asset snapshot created"
        );
        Ok(created)
    }

    /// Deletes a snapshot; its lines cascade.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or a database error.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let result = asset_snapshots::Entity::delete_many()
            .filter(asset_snapshots::Column::Id.eq(id))
            .filter(asset_snapshots::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("asset snapshot", id).into());
        }
        Ok(())
    }
}
