//! SeaORM entity for the notifications table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub read: bool,
    pub data: Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Notification {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            kind: crate::domain::NotificationKind::from(m.kind.as_str()),
            title: m.title,
            message: m.message,
            read: m.read,
            data: serde_json::from_value(m.data).unwrap_or_default(),
            created_at: m.created_at,
        }
    }
}
