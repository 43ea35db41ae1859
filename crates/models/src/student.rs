use sea_orm::{entity::prelude::*, IntoActiveModel, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub student_id: String,
    pub date_of_birth: Option<Date>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column widths of the `students` table, in characters.
pub const NAME_MAX_LEN: usize = 128;
pub const EMAIL_MAX_LEN: usize = 255;
pub const STUDENT_ID_MAX_LEN: usize = 64;
pub const PHONE_MAX_LEN: usize = 32;

/// Fields accepted when inserting a student; `id` is assigned by the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: String,
    pub date_of_birth: Option<Date>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl NewStudent {
    /// Trim every field and check the required ones.
    pub fn normalized(self) -> Result<Self, ModelError> {
        Ok(Self {
            first_name: validate_name("firstName", &self.first_name)?,
            last_name: validate_name("lastName", &self.last_name)?,
            email: validate_email(&self.email)?,
            student_id: validate_max_len(
                "studentId",
                validate_required("studentId", &self.student_id)?,
                STUDENT_ID_MAX_LEN,
            )?,
            date_of_birth: self.date_of_birth,
            phone_number: validate_phone(self.phone_number)?,
            address: normalize_optional(self.address),
        })
    }
}

impl IntoActiveModel<ActiveModel> for NewStudent {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            email: Set(self.email),
            student_id: Set(self.student_id),
            date_of_birth: Set(self.date_of_birth),
            phone_number: Set(self.phone_number),
            address: Set(self.address),
        }
    }
}

/// Returns the trimmed value, or a validation error naming `field` when blank.
pub fn validate_required(field: &str, value: &str) -> Result<String, ModelError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    Ok(v.to_string())
}

pub fn validate_max_len(field: &str, value: String, max: usize) -> Result<String, ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(value)
}

/// Required, trimmed, and no wider than [`NAME_MAX_LEN`].
pub fn validate_name(field: &str, value: &str) -> Result<String, ModelError> {
    validate_max_len(field, validate_required(field, value)?, NAME_MAX_LEN)
}

pub fn validate_email(email: &str) -> Result<String, ModelError> {
    let email = validate_max_len("email", validate_required("email", email)?, EMAIL_MAX_LEN)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(ModelError::Validation("invalid email".into())),
    }
}

pub fn validate_phone(value: Option<String>) -> Result<Option<String>, ModelError> {
    normalize_optional(value)
        .map(|v| validate_max_len("phoneNumber", v, PHONE_MAX_LEN))
        .transpose()
}

/// Blank optional text is stored as NULL.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
