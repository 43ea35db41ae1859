use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr,
};

use models::student::{self, Entity as StudentEntity};

use crate::errors::ServiceError;
use crate::student::repository::StudentRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// Translate store failures into service errors; unique index names identify the clashing key.
pub(crate) fn map_db_err(e: DbErr) -> ServiceError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = e.sql_err() {
        return if detail.contains("student_id") {
            ServiceError::student_id_taken()
        } else if detail.contains("email") {
            ServiceError::email_taken()
        } else {
            ServiceError::Conflict(detail)
        };
    }
    match e {
        DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => ServiceError::not_found("student"),
        other => ServiceError::Db(other.to_string()),
    }
}

#[async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn find_all(&self) -> Result<Vec<student::Model>, ServiceError> {
        StudentEntity::find()
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<student::Model>, ServiceError> {
        StudentEntity::find_by_id(id).one(&self.db).await.map_err(map_db_err)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<student::Model>, ServiceError> {
        StudentEntity::find()
            .filter(student::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn find_by_student_id(&self, student_id: &str) -> Result<Option<student::Model>, ServiceError> {
        StudentEntity::find()
            .filter(student::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let n = StudentEntity::find()
            .filter(student::Column::Id.eq(id))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(n > 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        let n = StudentEntity::find()
            .filter(student::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(n > 0)
    }

    async fn exists_by_student_id(&self, student_id: &str) -> Result<bool, ServiceError> {
        let n = StudentEntity::find()
            .filter(student::Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(n > 0)
    }

    async fn save(&self, student: student::ActiveModel) -> Result<student::Model, ServiceError> {
        let saved = if matches!(student.id, ActiveValue::NotSet) {
            student.insert(&self.db).await
        } else {
            student.update(&self.db).await
        };
        saved.map_err(map_db_err)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let res = StudentEntity::delete_by_id(id).exec(&self.db).await.map_err(map_db_err)?;
        Ok(res.rows_affected > 0)
    }
}
