//! Migration: Create the student and faculty profile tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StudentProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::RegistrationNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(StudentProfiles::Year).small_integer().not_null())
                    .col(ColumnDef::new(StudentProfiles::Section).string().not_null())
                    .col(ColumnDef::new(StudentProfiles::Cgpa).double().not_null())
                    .col(ColumnDef::new(StudentProfiles::Skills).json_binary().not_null())
                    .col(ColumnDef::new(StudentProfiles::Interests).json_binary().not_null())
                    .col(ColumnDef::new(StudentProfiles::Github).string().null())
                    .col(ColumnDef::new(StudentProfiles::Linkedin).string().null())
                    .col(ColumnDef::new(StudentProfiles::Portfolio).string().null())
                    .col(
                        ColumnDef::new(StudentProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FacultyProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FacultyProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FacultyProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FacultyProfiles::Designation).string().not_null())
                    .col(ColumnDef::new(FacultyProfiles::Capacity).string().not_null())
                    .col(ColumnDef::new(FacultyProfiles::Skills).json_binary().not_null())
                    .col(ColumnDef::new(FacultyProfiles::Interests).json_binary().not_null())
                    .col(
                        ColumnDef::new(FacultyProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FacultyProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Mentor directory filters by capacity tier
        manager
            .create_index(
                Index::create()
                    .name("idx_faculty_profiles_capacity")
                    .table(FacultyProfiles::Table)
                    .col(FacultyProfiles::Capacity)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FacultyProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentProfiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum StudentProfiles {
    Table,
    Id,
    UserId,
    RegistrationNo,
    Year,
    Section,
    Cgpa,
    Skills,
    Interests,
    Github,
    Linkedin,
    Portfolio,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum FacultyProfiles {
    Table,
    Id,
    UserId,
    Designation,
    Capacity,
    Skills,
    Interests,
    CreatedAt,
    UpdatedAt,
}
