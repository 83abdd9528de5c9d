//! SeaORM entity for the student_profiles table.
//!
//! Skill and interest lists are stored as JSON columns; they are opaque to
//! SQL and filtered in application code.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub registration_no: String,
    pub year: i16,
    pub section: String,
    pub cgpa: f64,
    pub skills: Json,
    pub interests: Json,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::StudentProfile {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            registration_no: m.registration_no,
            year: m.year,
            section: m.section,
            cgpa: m.cgpa,
            skills: super::string_list(m.skills),
            interests: super::string_list(m.interests),
            github: m.github,
            linkedin: m.linkedin,
            portfolio: m.portfolio,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
