use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::backend::{BackendError, ChecklistBackend};
use super::checklist::DocumentChecklist;
use super::domain::ApplicantProfile;
use super::eligibility::{
    EligibilityPolicy, EligibilityResolver, FinalizationError, ResolutionResult,
};
use super::risk::RiskDecision;

/// Submission payload: the profile fields plus per-submission metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_decision: Option<RiskDecision>,
    #[serde(flatten)]
    pub profile: ApplicantProfile,
}

impl ChecklistRequest {
    pub fn new(profile: ApplicantProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_risk_decision(mut self, decision: RiskDecision) -> Self {
        self.risk_decision = Some(decision);
        self
    }
}

/// Sessions with a submission currently being compiled.
#[derive(Debug, Default)]
pub struct SubmissionRegistry {
    sessions: Mutex<HashSet<String>>,
}

impl SubmissionRegistry {
    /// Reserves the session until the returned slot is dropped.
    pub fn claim(
        self: &Arc<Self>,
        session_id: &str,
    ) -> Result<SubmissionSlot, ChecklistServiceError> {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        if !sessions.insert(session_id.to_string()) {
            return Err(ChecklistServiceError::SubmissionInFlight {
                session_id: session_id.to_string(),
            });
        }

        Ok(SubmissionSlot {
            registry: Arc::clone(self),
            session_id: session_id.to_string(),
        })
    }

    pub fn is_in_flight(&self, session_id: &str) -> bool {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(session_id)
    }
}

/// Releases its session when dropped, including when the submission is abandoned.
#[derive(Debug)]
pub struct SubmissionSlot {
    registry: Arc<SubmissionRegistry>,
    session_id: String,
}

impl Drop for SubmissionSlot {
    fn drop(&mut self) {
        self.registry
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.session_id);
    }
}

/// Service composing the eligibility resolver, the submission gate, and a checklist backend.
pub struct ChecklistService<B> {
    resolver: Arc<EligibilityResolver>,
    backend: Arc<B>,
    submissions: Arc<SubmissionRegistry>,
}

impl<B> ChecklistService<B>
where
    B: ChecklistBackend + 'static,
{
    pub fn new(backend: Arc<B>, policy: EligibilityPolicy) -> Self {
        Self {
            resolver: Arc::new(EligibilityResolver::new(policy)),
            backend,
            submissions: Arc::new(SubmissionRegistry::default()),
        }
    }

    pub fn resolver(&self) -> &EligibilityResolver {
        &self.resolver
    }

    pub fn submissions(&self) -> &Arc<SubmissionRegistry> {
        &self.submissions
    }

    pub fn resolve(&self, profile: &ApplicantProfile) -> ResolutionResult {
        self.resolver.resolve(profile)
    }

    /// Finalize the profile and compile its checklist.
    ///
    /// Nothing is written back to the caller's profile when compilation fails.
    pub fn submit(
        &self,
        request: ChecklistRequest,
    ) -> Result<DocumentChecklist, ChecklistServiceError> {
        let _slot = request
            .session_id
            .as_deref()
            .map(|session_id| self.submissions.claim(session_id))
            .transpose()?;

        let profile = self
            .resolver
            .finalize(request.profile, request.risk_decision.as_ref())
            .map_err(|error| {
                warn!(session = ?request.session_id, %error, "submission rejected");
                error
            })?;

        let checklist = self.backend.compile(&profile)?;
        info!(
            session = ?request.session_id,
            categories = checklist.categories().count(),
            "checklist submission completed"
        );
        Ok(checklist)
    }
}

/// Error raised by the checklist service.
#[derive(Debug, thiserror::Error)]
pub enum ChecklistServiceError {
    #[error(transparent)]
    Finalization(#[from] FinalizationError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("a submission for session `{session_id}` is already in flight")]
    SubmissionInFlight { session_id: String },
}
