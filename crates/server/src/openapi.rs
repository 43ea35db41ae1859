use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: Option<String> }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDoc {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: String,
    #[schema(example = "2001-04-12")]
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDoc {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: String,
    #[schema(example = "2001-04-12")]
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Absent fields are left unchanged; `email` and `studentId` are ignored.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDoc {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[schema(example = "2001-04-12")]
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list,
        crate::routes::students::create,
        crate::routes::students::get,
        crate::routes::students::update,
        crate::routes::students::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            StudentDoc,
            CreateStudentDoc,
            UpdateStudentDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
