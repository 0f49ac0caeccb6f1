//! HTTP surface for the registration service.
//!
//! The check endpoints mirror the live form behavior: they always answer 200
//! with an assessment payload, leaving the caller to branch on `is_valid`.
//! Only unreadable roster CSV turns into an error response.

use crate::error::AppError;
use crate::registration::roster::{RosterAudit, RosterEntry, RosterSummary};
use crate::registration::{
    validate_staff_id, RegistrationAssessment, RegistrationResolver, StaffAssessment,
};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Datelike, Local};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub readiness: Arc<AtomicBool>,
    pub metrics: PrometheusHandle,
    pub resolver: Arc<RegistrationResolver>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/registration/check",
            post(registration_check_endpoint),
        )
        .route(
            "/api/v1/registration/audit",
            post(roster_audit_endpoint),
        )
        .route("/api/v1/staff/check", post(staff_check_endpoint))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct RegistrationCheckRequest {
    pub registration_number: String,
    /// Calendar year override; defaults to the wall clock.
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct RegistrationCheckResponse {
    pub year: i32,
    #[serde(flatten)]
    pub assessment: RegistrationAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StaffCheckRequest {
    pub staff_id: String,
}

#[derive(Debug, Serialize)]
pub struct StaffCheckResponse {
    #[serde(flatten)]
    pub assessment: StaffAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct RosterAuditRequest {
    pub roster_csv: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub include_rows: bool,
}

#[derive(Debug, Serialize)]
pub struct RosterAuditResponse {
    pub year: i32,
    pub summary: RosterSummary,
    pub flagged: Vec<FlaggedRosterRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<RosterEntry>>,
}

#[derive(Debug, Serialize)]
pub struct FlaggedRosterRow {
    pub record: u64,
    pub registration_number: String,
    pub message: String,
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn registration_check_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<RegistrationCheckRequest>,
) -> Json<RegistrationCheckResponse> {
    let year = payload.year.unwrap_or_else(|| Local::now().year());
    let assessment = state.resolver.assess(&payload.registration_number, year);
    let message = assessment.message();

    Json(RegistrationCheckResponse {
        year,
        assessment,
        message,
    })
}

async fn staff_check_endpoint(
    Json(payload): Json<StaffCheckRequest>,
) -> Json<StaffCheckResponse> {
    let assessment = validate_staff_id(&payload.staff_id);
    let message = assessment.issue.map(|issue| issue.summary());

    Json(StaffCheckResponse {
        assessment,
        message,
    })
}

async fn roster_audit_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<RosterAuditRequest>,
) -> Result<Json<RosterAuditResponse>, AppError> {
    let year = payload.year.unwrap_or_else(|| Local::now().year());
    let reader = Cursor::new(payload.roster_csv.into_bytes());
    let audit = RosterAudit::from_reader(reader, &state.resolver, year)?;

    let summary = audit.summary();
    let flagged = audit
        .flagged()
        .map(|entry| FlaggedRosterRow {
            record: entry.record,
            registration_number: entry.registration_number.clone(),
            message: entry
                .assessment
                .message()
                .unwrap_or_else(|| "registration number rejected".to_string()),
        })
        .collect();
    let rows = if payload.include_rows {
        Some(audit.entries().to_vec())
    } else {
        None
    };

    Ok(Json(RosterAuditResponse {
        year,
        summary,
        flagged,
        rows,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    fn test_state() -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: PrometheusBuilder::new().build_recorder().handle(),
            resolver: Arc::new(RegistrationResolver::default()),
        }
    }

    #[tokio::test]
    async fn check_endpoint_assesses_against_requested_year() {
        let request = RegistrationCheckRequest {
            registration_number: "BCS/B/12-34567/2024".to_string(),
            year: Some(2026),
        };

        let Json(body) = registration_check_endpoint(State(test_state()), Json(request)).await;

        assert_eq!(body.year, 2026);
        assert!(body.assessment.is_valid);
        assert!(body.assessment.can_submit);
        assert!(body.message.is_none());
    }

    #[tokio::test]
    async fn check_endpoint_reports_issues_as_data() {
        let request = RegistrationCheckRequest {
            registration_number: "ITE/D/01-06605/1999".to_string(),
            year: Some(2026),
        };

        let Json(body) = registration_check_endpoint(State(test_state()), Json(request)).await;

        assert!(!body.assessment.is_valid);
        assert_eq!(
            body.message.as_deref(),
            Some("Invalid intake year in registration number")
        );
    }

    #[tokio::test]
    async fn staff_endpoint_round_trips_both_outcomes() {
        let Json(ok) = staff_check_endpoint(Json(StaffCheckRequest {
            staff_id: "12345".to_string(),
        }))
        .await;
        assert!(ok.assessment.is_valid);
        assert!(ok.message.is_none());

        let Json(short) = staff_check_endpoint(Json(StaffCheckRequest {
            staff_id: "12".to_string(),
        }))
        .await;
        assert!(!short.assessment.is_valid);
        assert_eq!(
            short.message,
            Some("Staff ID must be 4-10 digits only (e.g., 123456)")
        );
    }

    #[tokio::test]
    async fn audit_endpoint_summarizes_and_flags() {
        let request = RosterAuditRequest {
            roster_csv: "Registration Number,Full Name\n\
                         ITE/D/01-06605/2023,Jane Student\n\
                         bad-number,Pat Unknown\n"
                .to_string(),
            year: Some(2026),
            include_rows: true,
        };

        let Json(body) = roster_audit_endpoint(State(test_state()), Json(request))
            .await
            .expect("audit runs");

        assert_eq!(body.summary.total, 2);
        assert_eq!(body.summary.valid, 1);
        assert_eq!(body.flagged.len(), 1);
        assert_eq!(body.flagged[0].registration_number, "bad-number");
        let rows = body.rows.expect("rows included");
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn audit_endpoint_rejects_malformed_csv() {
        let request = RosterAuditRequest {
            roster_csv: "Registration Number,Full Name\nonly-one-field\n,too,many\n".to_string(),
            year: Some(2026),
            include_rows: false,
        };

        let result = roster_audit_endpoint(State(test_state()), Json(request)).await;
        assert!(matches!(result, Err(AppError::Roster(_))));
    }
}
