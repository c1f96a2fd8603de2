use serde::{Deserialize, Serialize};

use super::super::domain::{
    ApplicantProfile, ApplicationType, Consulate, EconomicMaterial, EconomicProofType,
    FamilyRelation, GraduateStatus, IdentityType, ProcessType, ProfileField, VisaType,
};
use super::diagnostics::ReasonKey;
use super::policy::EligibilityPolicy;
use super::questions;

/// One selectable value and whether the current answers allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionState<T> {
    pub value: T,
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ReasonKey>,
}

/// Ordered option list for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldOptions<T>(Vec<OptionState<T>>);

impl<T: Copy + PartialEq> FieldOptions<T> {
    /// Builds the list from `values`, disallowing any value `deny` returns a reason for.
    fn evaluate(values: &[T], deny: impl Fn(T) -> Option<ReasonKey>) -> Self {
        Self(
            values
                .iter()
                .map(|&value| {
                    let reason = deny(value);
                    OptionState {
                        value,
                        allowed: reason.is_none(),
                        reason,
                    }
                })
                .collect(),
        )
    }

    fn open(values: &[T]) -> Self {
        Self::evaluate(values, |_| None)
    }

    pub fn states(&self) -> &[OptionState<T>] {
        &self.0
    }

    pub fn state(&self, value: T) -> Option<&OptionState<T>> {
        self.0.iter().find(|state| state.value == value)
    }

    pub fn is_allowed(&self, value: T) -> bool {
        self.state(value).is_some_and(|state| state.allowed)
    }

    pub fn allowed(&self) -> impl Iterator<Item = T> + '_ {
        self.0
            .iter()
            .filter(|state| state.allowed)
            .map(|state| state.value)
    }
}

/// Legal options per presented question; absent entries are not shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalOptions {
    pub residence_consulate: FieldOptions<Consulate>,
    pub hukou_consulate: FieldOptions<Consulate>,
    pub identity_type: FieldOptions<IdentityType>,
    pub application_type: FieldOptions<ApplicationType>,
    pub previous_visit: FieldOptions<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_type: Option<FieldOptions<ProcessType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visa_type: Option<FieldOptions<VisaType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduate_status: Option<FieldOptions<GraduateStatus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economic_material: Option<FieldOptions<EconomicMaterial>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_residence_consulate: Option<FieldOptions<Consulate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_relation: Option<FieldOptions<FamilyRelation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_visa_type: Option<FieldOptions<VisaType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_holder_identity: Option<FieldOptions<IdentityType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economic_relation: Option<FieldOptions<FamilyRelation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economic_proof_type: Option<FieldOptions<EconomicProofType>>,
}

/// Computes option legality from an already-corrected profile.
pub(crate) fn legal_options(
    profile: &ApplicantProfile,
    policy: &EligibilityPolicy,
) -> LegalOptions {
    let presented = questions::presented_fields(profile);
    let shows = |field: ProfileField| presented.contains(&field);
    let identity = profile.identity_type;
    let application = profile.application_type;

    let residence_consulate = FieldOptions::evaluate(&Consulate::ALL, |consulate| {
        (consulate == Consulate::Other && !policy.accept_other_consulate)
            .then_some(ReasonKey::UnsupportedConsulate)
    });

    let application_type = FieldOptions::evaluate(&ApplicationType::ALL, |candidate| {
        match (identity, candidate) {
            (Some(IdentityType::Student | IdentityType::Child), ApplicationType::Family) => {
                Some(ReasonKey::FamilyApplicationNotAllowedForIdentity)
            }
            (Some(IdentityType::Child), ApplicationType::Single) => {
                Some(ReasonKey::SingleApplicationNotAllowedForChild)
            }
            _ => None,
        }
    });

    let previous_visit = FieldOptions::evaluate(&[true, false], |visited| {
        (!visited && profile.is_process(ProcessType::Simplified))
            .then_some(ReasonKey::SimplifiedRequiresPreviousVisit)
    });

    let process_type = shows(ProfileField::ProcessType).then(|| {
        FieldOptions::evaluate(&ProcessType::ALL, |track| match track {
            ProcessType::Student
                if matches!(identity, Some(IdentityType::Retired | IdentityType::Child)) =>
            {
                Some(ReasonKey::StudentTrackNotAllowedForIdentity)
            }
            ProcessType::Tax
                if matches!(identity, Some(IdentityType::Student | IdentityType::Child)) =>
            {
                Some(ReasonKey::TaxTrackNotAllowedForIdentity)
            }
            ProcessType::Student | ProcessType::Simplified
                if application == Some(ApplicationType::Family) =>
            {
                Some(ReasonKey::FamilyApplicationTrackUnsupported)
            }
            _ => None,
        })
    });

    let visa_type = shows(ProfileField::VisaType).then(|| {
        FieldOptions::evaluate(&VisaType::ALL, |tier| {
            (application == Some(ApplicationType::Economic) && tier != VisaType::Single)
                .then_some(ReasonKey::EconomicApplicationSingleEntryOnly)
        })
    });

    let graduate_status = shows(ProfileField::GraduateStatus).then(|| {
        FieldOptions::evaluate(&GraduateStatus::ALL, |status| match (identity, status) {
            (Some(IdentityType::Student), GraduateStatus::Recent) => {
                Some(ReasonKey::RecentGraduateStatusNotForStudent)
            }
            (Some(other), GraduateStatus::Current) if other != IdentityType::Student => {
                Some(ReasonKey::CurrentStatusRequiresStudent)
            }
            _ => None,
        })
    });

    let economic_material = questions::economic_material_domain(profile).map(|domain| {
        let family_single = application == Some(ApplicationType::Family)
            && profile.visa_type == Some(VisaType::Single);
        FieldOptions::evaluate(domain, |material| {
            (family_single && material == EconomicMaterial::CreditCard)
                .then_some(ReasonKey::CreditCardNotAllowedForFamilySingle)
        })
    });

    let member_residence_consulate = shows(ProfileField::FamilyMembers).then(|| {
        match profile.residence_consulate {
            Some(residence) => FieldOptions::evaluate(&Consulate::ALL, |consulate| {
                (consulate != residence).then_some(ReasonKey::FamilyMemberConsulateMismatch)
            }),
            None => FieldOptions::open(&Consulate::ALL),
        }
    });

    let family_relation =
        shows(ProfileField::FamilyRelation).then(|| FieldOptions::open(&FamilyRelation::ALL));

    let family_visa_type = shows(ProfileField::FamilyVisaType).then(|| {
        FieldOptions::evaluate(&VisaType::ALL, |tier| {
            (!tier.is_multiple_entry()).then_some(ReasonKey::BindingHolderVisaMustBeMultipleEntry)
        })
    });

    let family_holder_identity = shows(ProfileField::FamilyHolderIdentity).then(|| {
        FieldOptions::evaluate(&IdentityType::ALL, |holder| {
            matches!(holder, IdentityType::Student | IdentityType::Child)
                .then_some(ReasonKey::HolderIdentityNotAccepted)
        })
    });

    let economic_relation =
        shows(ProfileField::EconomicRelation).then(|| FieldOptions::open(&FamilyRelation::ALL));
    let economic_proof_type = shows(ProfileField::EconomicProofType)
        .then(|| FieldOptions::open(&EconomicProofType::ALL));

    LegalOptions {
        residence_consulate,
        hukou_consulate: FieldOptions::open(&Consulate::ALL),
        identity_type: FieldOptions::open(&IdentityType::ALL),
        application_type,
        previous_visit,
        process_type,
        visa_type,
        graduate_status,
        economic_material,
        member_residence_consulate,
        family_relation,
        family_visa_type,
        family_holder_identity,
        economic_relation,
        economic_proof_type,
    }
}
