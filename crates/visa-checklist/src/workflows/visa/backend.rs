use super::checklist::{ChecklistCompiler, DocumentChecklist, IncompleteProfileError};
use super::domain::ApplicantProfile;

/// Compiler endpoint abstraction so the service can run against a local or remote compiler.
pub trait ChecklistBackend: Send + Sync {
    fn compile(&self, profile: &ApplicantProfile) -> Result<DocumentChecklist, BackendError>;
}

/// Error enumeration for checklist backends.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error(transparent)]
    Incomplete(#[from] IncompleteProfileError),
    /// Remote failure; the message is passed through untouched.
    #[error("{0}")]
    Transport(String),
}

/// In-process backend calling the compiler directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalChecklistBackend {
    compiler: ChecklistCompiler,
}

impl LocalChecklistBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChecklistBackend for LocalChecklistBackend {
    fn compile(&self, profile: &ApplicantProfile) -> Result<DocumentChecklist, BackendError> {
        Ok(self.compiler.compile(profile)?)
    }
}
