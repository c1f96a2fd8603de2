mod diagnostics;
mod options;
mod policy;
mod questions;
pub(crate) mod rules;

pub use diagnostics::{Correction, Diagnostic, ForcedCorrection, ReasonKey};
pub use options::{FieldOptions, LegalOptions, OptionState};
pub use policy::EligibilityPolicy;
pub use questions::{is_answered, missing_fields, presented_fields, required_fields};
pub use rules::RuleId;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{join_fields, ApplicantProfile, ProfileField, VisaType};
use super::risk::{self, RiskDecision};
use rules::RuleContext;

/// Failure to turn a profile into a compilable answer set.
#[derive(Debug, thiserror::Error)]
pub enum FinalizationError {
    #[error("profile is blocked by {} eligibility diagnostic(s)", .diagnostics.len())]
    Blocked { diagnostics: Vec<Diagnostic> },
    #[error("profile is missing required answers: {}", join_fields(.missing))]
    Incomplete { missing: Vec<ProfileField> },
    #[error("multiple-entry request without a prior visit needs a risk acknowledgement or a downgrade to a single-entry visa")]
    RiskAcknowledgementRequired,
}

/// Declarative outcome of one resolver pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub legal_options: LegalOptions,
    pub forced_corrections: Vec<ForcedCorrection>,
    pub diagnostics: Vec<Diagnostic>,
    pub presented_fields: Vec<ProfileField>,
    pub missing_fields: Vec<ProfileField>,
    pub risk_acknowledgement_required: bool,
}

impl ResolutionResult {
    /// Copies `profile` with every forced correction applied in order.
    pub fn apply_corrections(&self, profile: &ApplicantProfile) -> ApplicantProfile {
        let mut corrected = profile.clone();
        for forced in &self.forced_corrections {
            forced.correction.apply(&mut corrected);
        }
        corrected
    }

    pub fn is_blocked(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }
}

/// Stateless resolver applying the ordered eligibility rules.
#[derive(Debug, Clone, Default)]
pub struct EligibilityResolver {
    policy: EligibilityPolicy,
}

impl EligibilityResolver {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    pub fn resolve(&self, profile: &ApplicantProfile) -> ResolutionResult {
        let mut context = RuleContext::new(profile.clone(), &self.policy);
        rules::apply_all(&mut context);

        let corrected = &context.profile;
        let result = ResolutionResult {
            legal_options: options::legal_options(corrected, &self.policy),
            presented_fields: questions::presented_fields(corrected),
            missing_fields: questions::missing_fields(corrected),
            risk_acknowledgement_required: risk::requires_acknowledgement(corrected),
            forced_corrections: context.corrections,
            diagnostics: context.diagnostics,
        };

        debug!(
            corrections = result.forced_corrections.len(),
            diagnostics = result.diagnostics.len(),
            missing = result.missing_fields.len(),
            "profile resolved"
        );
        result
    }

    /// Produces the answer set handed to the checklist compiler.
    ///
    /// A downgrade is applied before the second pass so that rules depending on
    /// the visa tier see the single-entry value.
    pub fn finalize(
        &self,
        profile: ApplicantProfile,
        decision: Option<&RiskDecision>,
    ) -> Result<ApplicantProfile, FinalizationError> {
        let mut profile = self.resolve(&profile).apply_corrections(&profile);

        if matches!(decision, Some(RiskDecision::DowngradeToSingle))
            && risk::requires_acknowledgement(&profile)
        {
            profile.visa_type = Some(VisaType::Single);
        }

        let resolution = self.resolve(&profile);
        let profile = resolution.apply_corrections(&profile);

        if resolution.is_blocked() {
            return Err(FinalizationError::Blocked {
                diagnostics: resolution.diagnostics,
            });
        }
        if !resolution.is_complete() {
            return Err(FinalizationError::Incomplete {
                missing: resolution.missing_fields,
            });
        }
        if resolution.risk_acknowledgement_required
            && !decision.is_some_and(RiskDecision::acknowledges)
        {
            return Err(FinalizationError::RiskAcknowledgementRequired);
        }

        Ok(profile)
    }
}
