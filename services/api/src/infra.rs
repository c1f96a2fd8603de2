use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use visa_checklist::error::AppError;
use visa_checklist::workflows::visa::ChecklistRequest;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reads a submission file: the profile fields plus an optional `riskDecision`.
pub(crate) fn load_request(path: &Path) -> Result<ChecklistRequest, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
