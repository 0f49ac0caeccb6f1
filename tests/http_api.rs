use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use metrics_exporter_prometheus::PrometheusBuilder;
use sci_archive::http::{app, AppState};
use sci_archive::registration::RegistrationResolver;
use serde_json::{json, Value};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tower::ServiceExt;

fn state() -> AppState {
    AppState {
        readiness: Arc::new(AtomicBool::new(true)),
        metrics: PrometheusBuilder::new().build_recorder().handle(),
        resolver: Arc::new(RegistrationResolver::default()),
    }
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let response = app(state())
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request handled");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn registration_check_returns_assessment_payload() {
    let request = post_json(
        "/api/v1/registration/check",
        json!({ "registration_number": "BCS/B/12-34567/2024", "year": 2026 }),
    );

    let response = app(state()).oneshot(request).await.expect("request handled");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["year"], 2026);
    assert_eq!(body["is_valid"], true);
    assert_eq!(body["year_of_study"], 3);
    assert_eq!(body["can_submit"], true);
    assert_eq!(body["course_name"], "Degree in Computer Science");
}

#[tokio::test]
async fn invalid_registration_still_answers_200_with_reason() {
    let request = post_json(
        "/api/v1/registration/check",
        json!({ "registration_number": "", "year": 2026 }),
    );

    let response = app(state()).oneshot(request).await.expect("request handled");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["is_valid"], false);
    assert_eq!(body["message"], "Registration number is required");
    assert!(body["year_of_study"].is_null());
}

#[tokio::test]
async fn staff_check_round_trips() {
    let request = post_json("/api/v1/staff/check", json!({ "staff_id": "12345" }));

    let response = app(state()).oneshot(request).await.expect("request handled");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["is_valid"], true);
}

#[tokio::test]
async fn roster_audit_flags_bad_rows() {
    let roster = "Registration Number,Full Name\n\
                  ITE/D/01-06605/2023,Jane Student\n\
                  nope,Pat Unknown\n";
    let request = post_json(
        "/api/v1/registration/audit",
        json!({ "roster_csv": roster, "year": 2026 }),
    );

    let response = app(state()).oneshot(request).await.expect("request handled");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["summary"]["total"], 2);
    assert_eq!(body["summary"]["flagged"], 1);
    assert_eq!(body["flagged"][0]["registration_number"], "nope");
    assert!(body["rows"].is_null());
}

#[tokio::test]
async fn roster_audit_rejects_malformed_csv_with_400() {
    let request = post_json(
        "/api/v1/registration/audit",
        json!({ "roster_csv": "Registration Number,Full Name\nonly-one\n,x,y\n" }),
    );

    let response = app(state()).oneshot(request).await.expect("request handled");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message present")
        .contains("roster audit error"));
}
