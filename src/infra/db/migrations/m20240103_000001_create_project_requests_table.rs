//! Migration: Create the project_requests table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProjectRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectRequests::StudentId).uuid().not_null())
                    .col(ColumnDef::new(ProjectRequests::MentorId).uuid().not_null())
                    .col(ColumnDef::new(ProjectRequests::ProjectTitle).string().not_null())
                    .col(ColumnDef::new(ProjectRequests::Description).text().not_null())
                    .col(
                        ColumnDef::new(ProjectRequests::TeamSize)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectRequests::Methodology).text().not_null())
                    .col(ColumnDef::new(ProjectRequests::TechStack).json_binary().not_null())
                    .col(ColumnDef::new(ProjectRequests::Objectives).text().not_null())
                    .col(
                        ColumnDef::new(ProjectRequests::ExpectedOutcome)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectRequests::Duration).string().not_null())
                    .col(ColumnDef::new(ProjectRequests::AdditionalNotes).text().null())
                    .col(ColumnDef::new(ProjectRequests::Status).string().not_null())
                    .col(ColumnDef::new(ProjectRequests::MentorFeedback).text().null())
                    .col(
                        ColumnDef::new(ProjectRequests::RespondedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ProjectRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProjectRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Student dashboard reads
        manager
            .create_index(
                Index::create()
                    .name("idx_project_requests_student_id")
                    .table(ProjectRequests::Table)
                    .col(ProjectRequests::StudentId)
                    .to_owned(),
            )
            .await?;

        // Mentor inbox reads and the pending-duplicate check
        manager
            .create_index(
                Index::create()
                    .name("idx_project_requests_mentor_id")
                    .table(ProjectRequests::Table)
                    .col(ProjectRequests::MentorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ProjectRequests {
    Table,
    Id,
    StudentId,
    MentorId,
    ProjectTitle,
    Description,
    TeamSize,
    Methodology,
    TechStack,
    Objectives,
    ExpectedOutcome,
    Duration,
    AdditionalNotes,
    Status,
    MentorFeedback,
    RespondedAt,
    CreatedAt,
    UpdatedAt,
}
