use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use configs::CorsConfig;
use serde_json::{json, Value};
use service::student::repository::mock::MockStudentRepository;
use tower::Service;

use server::{routes::ServerState, startup::build_app};

const ORIGIN: &str = "http://localhost:3000";

fn app() -> Router {
    let state = ServerState::new(Arc::new(MockStudentRepository::default()));
    build_app(state, &CorsConfig { allowed_origin: ORIGIN.into() }).unwrap()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().call(req).await.unwrap()
}

async fn json_body(res: Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn ana() -> Value {
    json!({
        "firstName": "Ana",
        "lastName": "Silva",
        "email": "ana@x.com",
        "studentId": "S1",
        "dateOfBirth": "2001-04-12",
        "phoneNumber": "555-0100",
        "address": "1 Main St"
    })
}

#[tokio::test]
async fn student_lifecycle() {
    let app = app();

    let res = send(&app, Method::POST, "/api/students", Some(ana())).await;
    assert_eq!(res.status(), StatusCode::OK);
    let created = json_body(res).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["firstName"], "Ana");

    let mut dup = ana();
    dup["studentId"] = json!("S2");
    let res = send(&app, Method::POST, "/api/students", Some(dup)).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(res).await["message"], "email already exists");

    let res = send(&app, Method::GET, "/api/students/1", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await["email"], "ana@x.com");

    let patch = json!({"firstName": "Anna", "email": "changed@x.com"});
    let res = send(&app, Method::PUT, "/api/students/1", Some(patch)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = json_body(res).await;
    assert_eq!(updated["firstName"], "Anna");
    assert_eq!(updated["email"], "ana@x.com");
    assert_eq!(updated["lastName"], "Silva");

    let res = send(&app, Method::DELETE, "/api/students/1", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());

    let res = send(&app, Method::GET, "/api/students/1", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_reflects_creates_and_deletes() {
    let app = app();
    for i in 0..3 {
        let body = json!({"firstName": "S", "lastName": "T", "email": format!("s{i}@x.com"), "studentId": format!("S{i}")});
        let res = send(&app, Method::POST, "/api/students", Some(body)).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
    send(&app, Method::DELETE, "/api/students/2", None).await;

    let res = send(&app, Method::GET, "/api/students", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let list = json_body(res).await;
    let ids: Vec<i64> = list.as_array().unwrap().iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn validation_errors_are_bad_request() {
    let app = app();
    let mut blank = ana();
    blank["lastName"] = json!("  ");
    let res = send(&app, Method::POST, "/api/students", Some(blank)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["error"], "Validation Error");
    assert_eq!(body["message"], "lastName is required");

    let mut bad_email = ana();
    bad_email["email"] = json!("nope");
    let res = send(&app, Method::POST, "/api/students", Some(bad_email)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_rejects_blank_first_name() {
    let app = app();
    send(&app, Method::POST, "/api/students", Some(ana())).await;

    let res = send(&app, Method::PUT, "/api/students/1", Some(json!({"firstName": "   "}))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["message"], "firstName is required");

    let res = send(&app, Method::GET, "/api/students/1", None).await;
    assert_eq!(json_body(res).await["firstName"], "Ana");
}

#[tokio::test]
async fn overlong_phone_is_bad_request() {
    let app = app();
    let mut body = ana();
    body["phoneNumber"] = json!("+1 (555) 010-0000 ext. 12345678901");
    let res = send(&app, Method::POST, "/api/students", Some(body)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["message"], "phoneNumber must be at most 32 characters");
}

#[tokio::test]
async fn non_numeric_id_is_bad_request_with_json_body() {
    let app = app();
    let res = send(&app, Method::GET, "/api/students/abc", None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn malformed_payloads_use_the_json_error_body() {
    let app = app();
    let mut body = ana();
    body["dateOfBirth"] = json!("12/04/2001");
    let res = send(&app, Method::POST, "/api/students", Some(body)).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(res).await;
    assert_eq!(body["error"], "Unprocessable Entity");
    assert!(body["message"].as_str().unwrap().contains("dateOfBirth"));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/students")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = app.clone().call(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["error"], "Bad Request");
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let app = app();
    let res = send(&app, Method::PUT, "/api/students/42", Some(json!({"firstName": "X"}))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = send(&app, Method::DELETE, "/api/students/42", None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res).await["error"], "Not Found");
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let res = send(&app, Method::GET, "/health", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await["status"], "ok");
}

#[tokio::test]
async fn cors_allows_only_the_configured_origin() {
    let app = app();
    let preflight = |origin: &'static str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/students")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap()
    };

    let res = app.clone().call(preflight(ORIGIN)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], ORIGIN);

    let res = app.clone().call(preflight("http://evil.example")).await.unwrap();
    assert!(res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
