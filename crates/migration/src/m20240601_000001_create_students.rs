//! Create `students` table.
//!
//! One row per student; `id` is a database identity and never reused.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string_len(128).not_null())
                    .col(ColumnDef::new(Students::LastName).string_len(128).not_null())
                    .col(ColumnDef::new(Students::Email).string_len(255).not_null())
                    .col(ColumnDef::new(Students::StudentId).string_len(64).not_null())
                    .col(ColumnDef::new(Students::DateOfBirth).date().null())
                    .col(ColumnDef::new(Students::PhoneNumber).string_len(32).null())
                    .col(ColumnDef::new(Students::Address).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Students::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    StudentId,
    DateOfBirth,
    PhoneNumber,
    Address,
}
