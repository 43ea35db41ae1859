use axum::{extract::State, http::StatusCode, Json};
use service::student::domain::{CreateStudentInput, StudentDto, UpdateStudentInput};
use tracing::info;

use crate::{
    errors::JsonApiError,
    extract::{ApiJson, ApiPath},
    routes::ServerState,
};

#[utoipa::path(
    get, path = "/api/students", tag = "students",
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::StudentDoc]),
        (status = 500, description = "List Failed", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<StudentDto>>, JsonApiError> {
    let list = state.students.list().await?;
    info!(count = list.len(), "list students");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::StudentDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i64>) -> Result<Json<StudentDto>, JsonApiError> {
    Ok(Json(state.students.get(id).await?))
}

#[utoipa::path(
    post, path = "/api/students", tag = "students",
    request_body = crate::openapi::CreateStudentDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::StudentDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 409, description = "Email or student ID already exists", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<CreateStudentInput>,
) -> Result<Json<StudentDto>, JsonApiError> {
    Ok(Json(state.students.create(input).await?))
}

#[utoipa::path(
    put, path = "/api/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    request_body = crate::openapi::UpdateStudentDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::StudentDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(input): ApiJson<UpdateStudentInput>,
) -> Result<Json<StudentDto>, JsonApiError> {
    Ok(Json(state.students.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/api/students/{id}", tag = "students",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i64>) -> Result<StatusCode, JsonApiError> {
    state.students.delete(id).await?;
    Ok(StatusCode::OK)
}
