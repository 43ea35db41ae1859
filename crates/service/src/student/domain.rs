use chrono::NaiveDate;
use models::student::{self, NewStudent};
use serde::{Deserialize, Deserializer, Serialize};

/// Transfer representation returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl From<student::Model> for StudentDto {
    fn from(m: student::Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            student_id: m.student_id,
            date_of_birth: m.date_of_birth,
            phone_number: m.phone_number,
            address: m.address,
        }
    }
}

/// Create payload. Missing strings default to empty so they surface as
/// validation errors rather than deserialization failures; a client `id` is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateStudentInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl From<CreateStudentInput> for NewStudent {
    fn from(i: CreateStudentInput) -> Self {
        Self {
            first_name: i.first_name,
            last_name: i.last_name,
            email: i.email,
            student_id: i.student_id,
            date_of_birth: i.date_of_birth,
            phone_number: i.phone_number,
            address: i.address,
        }
    }
}

/// Update payload.
///
/// Absent fields keep their stored value. For the nullable columns an explicit
/// `null` clears the value. `email` and `studentId` are accepted so clients can
/// send a whole record back, but they are never applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateStudentInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(deserialize_with = "present")]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(deserialize_with = "present")]
    pub phone_number: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub address: Option<Option<String>>,
    pub email: Option<String>,
    pub student_id: Option<String>,
}

impl UpdateStudentInput {
    /// True when the payload tries to change one of the immutable keys.
    pub fn touches_immutable(&self, current: &student::Model) -> bool {
        self.email.as_deref().is_some_and(|e| e != current.email)
            || self.student_id.as_deref().is_some_and(|s| s != current.student_id)
    }
}

// A present key (even `null`) becomes `Some(..)`; a missing key falls back to `default`.
fn present<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}
