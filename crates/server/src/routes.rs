use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;
use service::student::{repository::StudentRepository, StudentService};

use crate::openapi::ApiDoc;

pub mod students;

/// Student service as shared by the handlers, independent of the backing store.
pub type SharedStudentService = Arc<StudentService<dyn StudentRepository>>;

#[derive(Clone)]
pub struct ServerState {
    pub students: SharedStudentService,
}

impl ServerState {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { students: Arc::new(StudentService::new(repo)) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: health, student CRUD and API docs
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/students", get(students::list).post(students::create))
        .route(
            "/api/students/:id",
            get(students::get).put(students::update).delete(students::delete),
        );

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
