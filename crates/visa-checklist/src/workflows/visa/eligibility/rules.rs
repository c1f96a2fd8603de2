use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::domain::{
    ApplicantProfile, ApplicationType, Consulate, EconomicMaterial, EconomicProofType,
    FamilyRelation, GraduateStatus, IdentityType, ProcessType, ProfileField, VisaType,
};
use super::diagnostics::{Correction, Diagnostic, ForcedCorrection, ReasonKey};
use super::policy::EligibilityPolicy;
use super::questions;

/// Eligibility rules in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    FamilyConsulateMatch,
    FamilyApplicantIdentity,
    ChildApplicationType,
    StudentTrackIdentity,
    TaxTrackIdentity,
    FamilyProcessTrack,
    DependentProcessTrack,
    SimplifiedPriorVisit,
    GraduateStatus,
    EconomicMaterialDomain,
    FamilyCreditCard,
    BindingHolderDetails,
    TrackVisaTier,
    EconomicSponsor,
    SupportedConsulate,
}

impl RuleId {
    pub const ORDERED: [RuleId; 15] = [
        RuleId::FamilyConsulateMatch,
        RuleId::FamilyApplicantIdentity,
        RuleId::ChildApplicationType,
        RuleId::StudentTrackIdentity,
        RuleId::TaxTrackIdentity,
        RuleId::FamilyProcessTrack,
        RuleId::DependentProcessTrack,
        RuleId::SimplifiedPriorVisit,
        RuleId::GraduateStatus,
        RuleId::EconomicMaterialDomain,
        RuleId::FamilyCreditCard,
        RuleId::BindingHolderDetails,
        RuleId::TrackVisaTier,
        RuleId::EconomicSponsor,
        RuleId::SupportedConsulate,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            RuleId::FamilyConsulateMatch => "family_consulate_match",
            RuleId::FamilyApplicantIdentity => "family_applicant_identity",
            RuleId::ChildApplicationType => "child_application_type",
            RuleId::StudentTrackIdentity => "student_track_identity",
            RuleId::TaxTrackIdentity => "tax_track_identity",
            RuleId::FamilyProcessTrack => "family_process_track",
            RuleId::DependentProcessTrack => "dependent_process_track",
            RuleId::SimplifiedPriorVisit => "simplified_prior_visit",
            RuleId::GraduateStatus => "graduate_status",
            RuleId::EconomicMaterialDomain => "economic_material_domain",
            RuleId::FamilyCreditCard => "family_credit_card",
            RuleId::BindingHolderDetails => "binding_holder_details",
            RuleId::TrackVisaTier => "track_visa_tier",
            RuleId::EconomicSponsor => "economic_sponsor",
            RuleId::SupportedConsulate => "supported_consulate",
        }
    }
}

/// Working state threaded through the ordered rules.
///
/// Rules read the already-corrected working copy, so a correction made by an
/// earlier rule is visible to every later one.
pub(crate) struct RuleContext<'a> {
    pub profile: ApplicantProfile,
    pub policy: &'a EligibilityPolicy,
    pub corrections: Vec<ForcedCorrection>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    pub fn new(profile: ApplicantProfile, policy: &'a EligibilityPolicy) -> Self {
        Self {
            profile,
            policy,
            corrections: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn correct(&mut self, rule: RuleId, reason: ReasonKey, correction: Correction) {
        debug!(
            rule = rule.as_str(),
            field = %correction.field(),
            ?correction,
            "eligibility correction"
        );
        correction.apply(&mut self.profile);

        // Only the last value forced onto a field is reported.
        let field = correction.field();
        self.corrections.retain(|existing| existing.correction.field() != field);
        self.corrections.push(ForcedCorrection {
            rule,
            reason,
            correction,
        });
    }

    fn block(
        &mut self,
        rule: RuleId,
        reason: ReasonKey,
        fields: Vec<ProfileField>,
        member: Option<usize>,
    ) {
        debug!(rule = rule.as_str(), ?reason, ?member, "eligibility diagnostic");
        self.diagnostics.push(Diagnostic {
            rule,
            reason,
            fields,
            member,
        });
    }
}

/// Runs every rule once, in `RuleId::ORDERED` order.
pub(crate) fn apply_all(context: &mut RuleContext<'_>) {
    for rule in RuleId::ORDERED {
        evaluate(rule, context);
    }
}

pub(crate) fn evaluate(rule: RuleId, context: &mut RuleContext<'_>) {
    match rule {
        RuleId::FamilyConsulateMatch => family_consulate_match(context),
        RuleId::FamilyApplicantIdentity => family_applicant_identity(context),
        RuleId::ChildApplicationType => child_application_type(context),
        RuleId::StudentTrackIdentity => student_track_identity(context),
        RuleId::TaxTrackIdentity => tax_track_identity(context),
        RuleId::FamilyProcessTrack => family_process_track(context),
        RuleId::DependentProcessTrack => dependent_process_track(context),
        RuleId::SimplifiedPriorVisit => simplified_prior_visit(context),
        RuleId::GraduateStatus => graduate_status(context),
        RuleId::EconomicMaterialDomain => economic_material_domain(context),
        RuleId::FamilyCreditCard => family_credit_card(context),
        RuleId::BindingHolderDetails => binding_holder_details(context),
        RuleId::TrackVisaTier => track_visa_tier(context),
        RuleId::EconomicSponsor => economic_sponsor(context),
        RuleId::SupportedConsulate => supported_consulate(context),
    }
}

fn family_consulate_match(context: &mut RuleContext<'_>) {
    if !context.profile.is_application(ApplicationType::Family) {
        return;
    }
    let Some(residence) = context.profile.residence_consulate else {
        return;
    };

    let mismatched: Vec<usize> = context
        .profile
        .family_members
        .iter()
        .enumerate()
        .filter(|(_, member)| member.residence_consulate != residence)
        .map(|(index, _)| index + 1)
        .collect();

    for member in mismatched {
        context.block(
            RuleId::FamilyConsulateMatch,
            ReasonKey::FamilyMemberConsulateMismatch,
            vec![ProfileField::FamilyMembers, ProfileField::ResidenceConsulate],
            Some(member),
        );
    }
}

fn family_applicant_identity(context: &mut RuleContext<'_>) {
    let restricted = matches!(
        context.profile.identity_type,
        Some(IdentityType::Student) | Some(IdentityType::Child)
    );
    if restricted && context.profile.is_application(ApplicationType::Family) {
        context.correct(
            RuleId::FamilyApplicantIdentity,
            ReasonKey::FamilyApplicationNotAllowedForIdentity,
            Correction::ApplicationType(ApplicationType::Single),
        );
    }
}

fn child_application_type(context: &mut RuleContext<'_>) {
    if context.profile.is_identity(IdentityType::Child)
        && context.profile.is_application(ApplicationType::Single)
    {
        context.correct(
            RuleId::ChildApplicationType,
            ReasonKey::SingleApplicationNotAllowedForChild,
            Correction::ApplicationType(ApplicationType::Binding),
        );
    }
}

fn student_track_identity(context: &mut RuleContext<'_>) {
    let restricted = matches!(
        context.profile.identity_type,
        Some(IdentityType::Retired) | Some(IdentityType::Child)
    );
    if restricted && context.profile.is_process(ProcessType::Student) {
        context.correct(
            RuleId::StudentTrackIdentity,
            ReasonKey::StudentTrackNotAllowedForIdentity,
            Correction::ProcessType(ProcessType::Normal),
        );
    }
}

fn tax_track_identity(context: &mut RuleContext<'_>) {
    if !context.profile.is_process(ProcessType::Tax) {
        return;
    }

    let replacement = match context.profile.identity_type {
        Some(IdentityType::Student) => ProcessType::Student,
        Some(IdentityType::Child) => ProcessType::Normal,
        _ => return,
    };
    context.correct(
        RuleId::TaxTrackIdentity,
        ReasonKey::TaxTrackNotAllowedForIdentity,
        Correction::ProcessType(replacement),
    );
}

fn family_process_track(context: &mut RuleContext<'_>) {
    let restricted = matches!(
        context.profile.process_type,
        Some(ProcessType::Student) | Some(ProcessType::Simplified)
    );
    if restricted && context.profile.is_application(ApplicationType::Family) {
        context.correct(
            RuleId::FamilyProcessTrack,
            ReasonKey::FamilyApplicationTrackUnsupported,
            Correction::ProcessType(ProcessType::Normal),
        );
    }
}

fn dependent_process_track(context: &mut RuleContext<'_>) {
    let Some(application) = context.profile.application_type else {
        return;
    };
    if !application.is_dependent() {
        return;
    }

    if !context.profile.is_process(ProcessType::Normal) {
        context.correct(
            RuleId::DependentProcessTrack,
            ReasonKey::DependentApplicationRequiresNormalTrack,
            Correction::ProcessType(ProcessType::Normal),
        );
    }

    match application {
        ApplicationType::Economic if context.profile.visa_type != Some(VisaType::Single) => {
            context.correct(
                RuleId::DependentProcessTrack,
                ReasonKey::EconomicApplicationSingleEntryOnly,
                Correction::VisaType(Some(VisaType::Single)),
            );
        }
        ApplicationType::Binding if context.profile.visa_type.is_some() => {
            context.correct(
                RuleId::DependentProcessTrack,
                ReasonKey::BindingVisaFollowsHolder,
                Correction::VisaType(None),
            );
        }
        _ => {}
    }
}

fn simplified_prior_visit(context: &mut RuleContext<'_>) {
    if context.profile.is_process(ProcessType::Simplified)
        && context.profile.previous_visit == Some(false)
    {
        context.block(
            RuleId::SimplifiedPriorVisit,
            ReasonKey::SimplifiedRequiresPreviousVisit,
            vec![ProfileField::ProcessType, ProfileField::PreviousVisit],
            None,
        );
    }
}

fn graduate_status(context: &mut RuleContext<'_>) {
    let Some(status) = context.profile.graduate_status else {
        return;
    };

    if !context.profile.is_process(ProcessType::Student) {
        context.correct(
            RuleId::GraduateStatus,
            ReasonKey::GraduateStatusOnlyForStudentTrack,
            Correction::GraduateStatus(None),
        );
        return;
    }

    let Some(identity) = context.profile.identity_type else {
        return;
    };
    match (identity, status) {
        (IdentityType::Student, GraduateStatus::Recent) => context.correct(
            RuleId::GraduateStatus,
            ReasonKey::RecentGraduateStatusNotForStudent,
            Correction::GraduateStatus(Some(GraduateStatus::Current)),
        ),
        (other, GraduateStatus::Current) if other != IdentityType::Student => context.correct(
            RuleId::GraduateStatus,
            ReasonKey::CurrentStatusRequiresStudent,
            Correction::GraduateStatus(Some(GraduateStatus::Recent)),
        ),
        _ => {}
    }
}

fn economic_material_domain(context: &mut RuleContext<'_>) {
    let Some(material) = context.profile.economic_material else {
        return;
    };

    let reason = match questions::economic_material_domain(&context.profile) {
        None => ReasonKey::EconomicMaterialNotApplicable,
        Some(domain) if !domain.contains(&material) => ReasonKey::EconomicMaterialOutsideDomain,
        Some(_) => return,
    };
    context.correct(
        RuleId::EconomicMaterialDomain,
        reason,
        Correction::EconomicMaterial(None),
    );
}

fn family_credit_card(context: &mut RuleContext<'_>) {
    let profile = &context.profile;
    if profile.is_application(ApplicationType::Family)
        && profile.visa_type == Some(VisaType::Single)
        && profile.economic_material == Some(EconomicMaterial::CreditCard)
    {
        context.correct(
            RuleId::FamilyCreditCard,
            ReasonKey::CreditCardNotAllowedForFamilySingle,
            Correction::EconomicMaterial(None),
        );
    }
}

fn binding_holder_details(context: &mut RuleContext<'_>) {
    let binding = context.profile.is_application(ApplicationType::Binding);
    let shanghai = context.profile.residence_consulate == Some(Consulate::Shanghai);

    if !(binding && shanghai) && context.profile.family_holder_identity.is_some() {
        context.correct(
            RuleId::BindingHolderDetails,
            ReasonKey::HolderIdentityOnlyForShanghaiBinding,
            Correction::FamilyHolderIdentity(None),
        );
    }

    if !binding {
        return;
    }

    if context.profile.family_visa_type == Some(VisaType::Single) {
        context.block(
            RuleId::BindingHolderDetails,
            ReasonKey::BindingHolderVisaMustBeMultipleEntry,
            vec![ProfileField::FamilyVisaType],
            None,
        );
    }

    if matches!(
        context.profile.family_holder_identity,
        Some(IdentityType::Student) | Some(IdentityType::Child)
    ) {
        context.block(
            RuleId::BindingHolderDetails,
            ReasonKey::HolderIdentityNotAccepted,
            vec![ProfileField::FamilyHolderIdentity],
            None,
        );
    }
}

fn track_visa_tier(context: &mut RuleContext<'_>) {
    let implied = match context.profile.process_type {
        Some(ProcessType::Student) => VisaType::Single,
        Some(ProcessType::Simplified) => VisaType::Three,
        _ => return,
    };
    if context.profile.visa_type != Some(implied) {
        context.correct(
            RuleId::TrackVisaTier,
            ReasonKey::TrackImpliesVisaTier,
            Correction::VisaType(Some(implied)),
        );
    }
}

fn economic_sponsor(context: &mut RuleContext<'_>) {
    if !context.policy.economic_sponsor_defaults
        || !context.profile.is_application(ApplicationType::Economic)
    {
        return;
    }

    if context.profile.economic_relation.is_none() {
        context.correct(
            RuleId::EconomicSponsor,
            ReasonKey::EconomicSponsorDefaulted,
            Correction::EconomicRelation(FamilyRelation::Parent),
        );
    }
    if context.profile.economic_proof_type.is_none() {
        context.correct(
            RuleId::EconomicSponsor,
            ReasonKey::EconomicSponsorDefaulted,
            Correction::EconomicProofType(EconomicProofType::EmploymentIncome),
        );
    }
}

fn supported_consulate(context: &mut RuleContext<'_>) {
    if context.profile.residence_consulate == Some(Consulate::Other)
        && !context.policy.accept_other_consulate
    {
        context.block(
            RuleId::SupportedConsulate,
            ReasonKey::UnsupportedConsulate,
            vec![ProfileField::ResidenceConsulate],
            None,
        );
    }
}
