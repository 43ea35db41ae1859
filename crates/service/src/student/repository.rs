use async_trait::async_trait;
use models::student;

use crate::errors::ServiceError;

/// Query interface over the `students` table.
///
/// Lookups report absence as `None`; only store failures are errors.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<student::Model>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<student::Model>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<student::Model>, ServiceError>;
    async fn find_by_student_id(&self, student_id: &str) -> Result<Option<student::Model>, ServiceError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn exists_by_student_id(&self, student_id: &str) -> Result<bool, ServiceError> {
        Ok(self.find_by_student_id(student_id).await?.is_some())
    }

    /// Insert when the primary key is unset, otherwise update the row in place.
    /// Unique-key clashes surface as `Conflict`; a vanished row as `NotFound`.
    async fn save(&self, student: student::ActiveModel) -> Result<student::Model, ServiceError>;

    /// Returns `false` when no row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;

    async fn delete(&self, student: student::Model) -> Result<bool, ServiceError> {
        self.delete_by_id(student.id).await
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use sea_orm::ActiveValue;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Table {
        rows: BTreeMap<i64, student::Model>,
        last_id: i64,
    }

    /// Mirrors the store: monotonically increasing ids and unique email / student id.
    #[derive(Default)]
    pub struct MockStudentRepository {
        table: Mutex<Table>,
    }

    impl MockStudentRepository {
        fn table(&self) -> Result<MutexGuard<'_, Table>, ServiceError> {
            self.table.lock().map_err(|_| ServiceError::Db("mock table poisoned".into()))
        }

        pub fn len(&self) -> usize {
            self.table.lock().map(|t| t.rows.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    fn value<T: Into<sea_orm::Value>>(v: ActiveValue<T>, column: &str) -> Result<T, ServiceError> {
        match v {
            ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Ok(v),
            ActiveValue::NotSet => Err(ServiceError::Db(format!("column {column} not set"))),
        }
    }

    fn check_unique(table: &Table, candidate: &student::Model) -> Result<(), ServiceError> {
        let others = table.rows.values().filter(|r| r.id != candidate.id);
        for row in others {
            if row.email == candidate.email {
                return Err(ServiceError::email_taken());
            }
            if row.student_id == candidate.student_id {
                return Err(ServiceError::student_id_taken());
            }
        }
        Ok(())
    }

    #[async_trait]
    impl StudentRepository for MockStudentRepository {
        async fn find_all(&self) -> Result<Vec<student::Model>, ServiceError> {
            Ok(self.table()?.rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<student::Model>, ServiceError> {
            Ok(self.table()?.rows.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<student::Model>, ServiceError> {
            Ok(self.table()?.rows.values().find(|r| r.email == email).cloned())
        }

        async fn find_by_student_id(&self, student_id: &str) -> Result<Option<student::Model>, ServiceError> {
            Ok(self.table()?.rows.values().find(|r| r.student_id == student_id).cloned())
        }

        async fn save(&self, am: student::ActiveModel) -> Result<student::Model, ServiceError> {
            let mut table = self.table()?;
            let id = match am.id {
                ActiveValue::NotSet => None,
                ActiveValue::Set(id) | ActiveValue::Unchanged(id) => Some(id),
            };
            let mut row = student::Model {
                id: id.unwrap_or_default(),
                first_name: value(am.first_name, "first_name")?,
                last_name: value(am.last_name, "last_name")?,
                email: value(am.email, "email")?,
                student_id: value(am.student_id, "student_id")?,
                date_of_birth: value(am.date_of_birth, "date_of_birth")?,
                phone_number: value(am.phone_number, "phone_number")?,
                address: value(am.address, "address")?,
            };
            match id {
                None => {
                    check_unique(&table, &row)?;
                    table.last_id += 1;
                    row.id = table.last_id;
                }
                Some(id) => {
                    if !table.rows.contains_key(&id) {
                        return Err(ServiceError::not_found("student"));
                    }
                    check_unique(&table, &row)?;
                }
            }
            table.rows.insert(row.id, row.clone());
            Ok(row)
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.table()?.rows.remove(&id).is_some())
        }
    }
}
