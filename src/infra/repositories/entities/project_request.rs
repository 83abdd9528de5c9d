//! SeaORM entity for the project_requests table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "project_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_id: Uuid,
    pub mentor_id: Uuid,
    pub project_title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub team_size: i16,
    #[sea_orm(column_type = "Text")]
    pub methodology: String,
    pub tech_stack: Json,
    #[sea_orm(column_type = "Text")]
    pub objectives: String,
    #[sea_orm(column_type = "Text")]
    pub expected_outcome: String,
    pub duration: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub additional_notes: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub mentor_feedback: Option<String>,
    pub responded_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::ProjectRequest {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            mentor_id: m.mentor_id,
            project_title: m.project_title,
            description: m.description,
            team_size: m.team_size,
            methodology: m.methodology,
            tech_stack: super::string_list(m.tech_stack),
            objectives: m.objectives,
            expected_outcome: m.expected_outcome,
            duration: crate::domain::Duration::from(m.duration.as_str()),
            additional_notes: m.additional_notes,
            status: crate::domain::RequestStatus::from(m.status.as_str()),
            mentor_feedback: m.mentor_feedback,
            responded_at: m.responded_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
