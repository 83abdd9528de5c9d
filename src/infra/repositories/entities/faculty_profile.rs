//! SeaORM entity for the faculty_profiles table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "faculty_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub designation: String,
    pub capacity: String,
    pub skills: Json,
    pub interests: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::FacultyProfile {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            designation: m.designation,
            capacity: crate::domain::Capacity::from(m.capacity.as_str()),
            skills: super::string_list(m.skills),
            interests: super::string_list(m.interests),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
