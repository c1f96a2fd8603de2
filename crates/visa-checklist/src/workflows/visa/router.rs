use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use super::backend::{BackendError, ChecklistBackend};
use super::checklist::{DocumentChecklist, IncompleteProfileError};
use super::domain::{ApplicantProfile, ProfileField};
use super::eligibility::{Diagnostic, FinalizationError};
use super::risk::risk_checklist;
use super::service::{ChecklistRequest, ChecklistService, ChecklistServiceError};

/// Envelope returned by the checklist submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionResponse {
    Success {
        document_list: DocumentChecklist,
    },
    Error {
        error: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        diagnostics: Vec<Diagnostic>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        missing_fields: Vec<ProfileField>,
    },
}

impl SubmissionResponse {
    fn error(error: &ChecklistServiceError) -> Self {
        let (diagnostics, missing_fields) = match error {
            ChecklistServiceError::Finalization(FinalizationError::Blocked { diagnostics }) => {
                (diagnostics.clone(), Vec::new())
            }
            ChecklistServiceError::Finalization(FinalizationError::Incomplete { missing })
            | ChecklistServiceError::Backend(BackendError::Incomplete(IncompleteProfileError {
                missing,
            })) => (Vec::new(), missing.clone()),
            _ => (Vec::new(), Vec::new()),
        };

        SubmissionResponse::Error {
            error: error.to_string(),
            diagnostics,
            missing_fields,
        }
    }
}

/// Router builder exposing the resolver, submission, and disclosure endpoints.
pub fn checklist_router<B>(service: Arc<ChecklistService<B>>) -> Router
where
    B: ChecklistBackend + 'static,
{
    Router::new()
        .route("/api/v1/visa/resolve", post(resolve_handler::<B>))
        .route("/api/v1/visa/checklist", post(checklist_handler::<B>))
        .route("/api/v1/visa/risk-factors", get(risk_factors_handler))
        .with_state(service)
}

pub(crate) async fn resolve_handler<B>(
    State(service): State<Arc<ChecklistService<B>>>,
    axum::Json(profile): axum::Json<ApplicantProfile>,
) -> Response
where
    B: ChecklistBackend + 'static,
{
    let resolution = service.resolve(&profile);
    (StatusCode::OK, axum::Json(resolution)).into_response()
}

pub(crate) async fn checklist_handler<B>(
    State(service): State<Arc<ChecklistService<B>>>,
    axum::Json(request): axum::Json<ChecklistRequest>,
) -> Response
where
    B: ChecklistBackend + 'static,
{
    match service.submit(request) {
        Ok(document_list) => {
            let payload = SubmissionResponse::Success { document_list };
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let status = match &error {
                ChecklistServiceError::SubmissionInFlight { .. } => StatusCode::CONFLICT,
                ChecklistServiceError::Backend(BackendError::Transport(_)) => {
                    StatusCode::BAD_GATEWAY
                }
                ChecklistServiceError::Finalization(_)
                | ChecklistServiceError::Backend(BackendError::Incomplete(_)) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            };
            (status, axum::Json(SubmissionResponse::error(&error))).into_response()
        }
    }
}

pub(crate) async fn risk_factors_handler() -> Response {
    (StatusCode::OK, axum::Json(risk_checklist())).into_response()
}
