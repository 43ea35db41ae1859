use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Students: email is a candidate key
        manager
            .create_index(
                Index::create()
                    .name("uniq_students_email")
                    .table(Students::Table)
                    .col(Students::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Students: student_id is a candidate key
        manager
            .create_index(
                Index::create()
                    .name("uniq_students_student_id")
                    .table(Students::Table)
                    .col(Students::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_students_email").table(Students::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_students_student_id").table(Students::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Students { Table, Email, StudentId }
