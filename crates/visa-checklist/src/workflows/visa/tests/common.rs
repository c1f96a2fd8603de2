use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::visa::backend::{BackendError, ChecklistBackend, LocalChecklistBackend};
use crate::workflows::visa::checklist::{ChecklistCategory, DocumentChecklist};
use crate::workflows::visa::domain::{
    ApplicantProfile, ApplicationType, Consulate, EconomicMaterial, FamilyMember, FamilyRelation,
    IdentityType, ProcessType, VisaType,
};
use crate::workflows::visa::eligibility::{EligibilityPolicy, EligibilityResolver};
use crate::workflows::visa::service::ChecklistService;

pub(super) fn resolver() -> EligibilityResolver {
    EligibilityResolver::new(EligibilityPolicy::default())
}

/// Employed Beijing resident filing a single-entry visa with a deposit certificate.
pub(super) fn employed_profile() -> ApplicantProfile {
    ApplicantProfile {
        identity_type: Some(IdentityType::Employed),
        residence_consulate: Some(Consulate::Beijing),
        hukou_consulate: Some(Consulate::Beijing),
        application_type: Some(ApplicationType::Single),
        process_type: Some(ProcessType::Normal),
        visa_type: Some(VisaType::Single),
        previous_visit: Some(true),
        economic_material: Some(EconomicMaterial::DepositSingle),
        ..ApplicantProfile::default()
    }
}

pub(super) fn family_profile(members: Vec<FamilyMember>) -> ApplicantProfile {
    ApplicantProfile {
        application_type: Some(ApplicationType::Family),
        visa_type: Some(VisaType::Three),
        economic_material: Some(EconomicMaterial::DepositThree),
        family_members: members,
        ..employed_profile()
    }
}

pub(super) fn member(
    relation: FamilyRelation,
    identity: IdentityType,
    residence: Consulate,
    hukou: Consulate,
) -> FamilyMember {
    FamilyMember {
        relation,
        identity_type: identity,
        residence_consulate: residence,
        hukou_consulate: hukou,
    }
}

pub(super) fn items(checklist: &DocumentChecklist, category: ChecklistCategory) -> Vec<&str> {
    checklist
        .get(category)
        .unwrap_or_else(|| panic!("{category:?} missing from checklist"))
        .iter()
        .map(String::as_str)
        .collect()
}

pub(super) fn local_service() -> ChecklistService<LocalChecklistBackend> {
    ChecklistService::new(
        Arc::new(LocalChecklistBackend::new()),
        EligibilityPolicy::default(),
    )
}

/// Backend standing in for an unreachable remote compiler.
pub(super) struct OfflineBackend;

pub(super) const OFFLINE_MESSAGE: &str = "checklist compiler unreachable: connection refused";

impl ChecklistBackend for OfflineBackend {
    fn compile(&self, _profile: &ApplicantProfile) -> Result<DocumentChecklist, BackendError> {
        Err(BackendError::Transport(OFFLINE_MESSAGE.to_string()))
    }
}

pub(super) fn offline_service() -> ChecklistService<OfflineBackend> {
    ChecklistService::new(Arc::new(OfflineBackend), EligibilityPolicy::default())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
