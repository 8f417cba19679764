//! `SeaORM` Entity for asset_details table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AssetKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "asset_details")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub snapshot_id: Uuid,
    pub label: String,
    pub kind: AssetKind,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::asset_snapshots::Entity",
        from = "Column::SnapshotId",
        to = "super::asset_snapshots::Column::Id",
        on_delete = "Cascade"
    )]
    AssetSnapshots,
}

impl Related<super::asset_snapshots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssetSnapshots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
