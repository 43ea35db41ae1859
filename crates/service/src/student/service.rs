use std::sync::Arc;

use models::student::{self, normalize_optional, validate_name, validate_phone, NewStudent};
use sea_orm::{IntoActiveModel, Set};
use tracing::{debug, info, instrument};

use super::domain::{CreateStudentInput, StudentDto, UpdateStudentInput};
use super::repository::StudentRepository;
use crate::errors::ServiceError;

/// Student business service independent of web framework.
///
/// Email and student id are unique and fixed once a record exists; every
/// other field may be rewritten.
pub struct StudentService<R: StudentRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<StudentDto>, ServiceError> {
        let rows = self.repo.find_all().await?;
        Ok(rows.into_iter().map(StudentDto::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<StudentDto, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(StudentDto::from)
            .ok_or_else(|| ServiceError::not_found("student"))
    }

    /// Register a new student after the uniqueness checks.
    ///
    /// # Examples
    /// ```
    /// use service::student::{repository::mock::MockStudentRepository, domain::CreateStudentInput, StudentService};
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(MockStudentRepository::default()));
    /// let input = CreateStudentInput {
    ///     first_name: "Ana".into(),
    ///     last_name: "Silva".into(),
    ///     email: "ana@x.com".into(),
    ///     student_id: "S1".into(),
    ///     ..Default::default()
    /// };
    /// let created = tokio_test::block_on(svc.create(input.clone())).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert!(tokio_test::block_on(svc.create(input)).is_err());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email, student_id = %input.student_id))]
    pub async fn create(&self, input: CreateStudentInput) -> Result<StudentDto, ServiceError> {
        let new = NewStudent::from(input).normalized()?;
        if self.repo.exists_by_email(&new.email).await? {
            return Err(ServiceError::email_taken());
        }
        if self.repo.exists_by_student_id(&new.student_id).await? {
            return Err(ServiceError::student_id_taken());
        }
        let saved = self.repo.save(new.into_active_model()).await?;
        info!(id = saved.id, "student_created");
        Ok(saved.into())
    }

    /// Rewrite the mutable fields of an existing student.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: UpdateStudentInput) -> Result<StudentDto, ServiceError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("student"))?;
        if input.touches_immutable(&existing) {
            debug!(id, "ignoring email/studentId in update payload");
        }
        let am = apply_update(existing, input)?;
        let saved = self.repo.save(am).await?;
        info!(id = saved.id, "student_updated");
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::not_found("student"));
        }
        // Removed concurrently between the check and the delete
        if !self.repo.delete_by_id(id).await? {
            return Err(ServiceError::not_found("student"));
        }
        info!(id, "student_deleted");
        Ok(())
    }
}

/// Whitelist of mutable columns; `email` and `student_id` are never touched.
fn apply_update(existing: student::Model, input: UpdateStudentInput) -> Result<student::ActiveModel, ServiceError> {
    let mut am: student::ActiveModel = existing.into();
    if let Some(v) = input.first_name {
        am.first_name = Set(validate_name("firstName", &v)?);
    }
    if let Some(v) = input.last_name {
        am.last_name = Set(validate_name("lastName", &v)?);
    }
    if let Some(v) = input.date_of_birth {
        am.date_of_birth = Set(v);
    }
    if let Some(v) = input.phone_number {
        am.phone_number = Set(validate_phone(v)?);
    }
    if let Some(v) = input.address {
        am.address = Set(normalize_optional(v));
    }
    Ok(am)
}
