//! Visa application workflow.
//!
//! Answers flow through the [`EligibilityResolver`] after every change; once
//! finalized they are compiled into a [`DocumentChecklist`] by a
//! [`ChecklistBackend`].

pub mod backend;
pub mod checklist;
pub mod domain;
pub mod eligibility;
pub mod risk;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use backend::{BackendError, ChecklistBackend, LocalChecklistBackend};
pub use checklist::{
    ChecklistCategory, ChecklistCompiler, DocumentChecklist, IncompleteProfileError,
};
pub use domain::{
    ApplicantProfile, ApplicationType, Consulate, EconomicMaterial, EconomicProofType,
    FamilyMember, FamilyRelation, GraduateStatus, HukouType, IdentityType, ProcessType,
    ProfileField, VisaType,
};
pub use eligibility::{
    Correction, Diagnostic, EligibilityPolicy, EligibilityResolver, FieldOptions,
    FinalizationError, ForcedCorrection, LegalOptions, OptionState, ReasonKey, ResolutionResult,
    RuleId,
};
pub use risk::{risk_checklist, RiskChecklist, RiskDecision, RiskFactor, RISK_PROMPT};
pub use router::{checklist_router, SubmissionResponse};
pub use service::{
    ChecklistRequest, ChecklistService, ChecklistServiceError, SubmissionRegistry, SubmissionSlot,
};
