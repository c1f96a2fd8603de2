use super::super::domain::{
    ApplicantProfile, ApplicationType, Consulate, EconomicMaterial, ProcessType, ProfileField,
};

/// Questions the form should show for the answers given so far, in form order.
pub fn presented_fields(profile: &ApplicantProfile) -> Vec<ProfileField> {
    let mut fields = vec![
        ProfileField::ResidenceConsulate,
        ProfileField::HukouConsulate,
        ProfileField::IdentityType,
        ProfileField::ApplicationType,
    ];

    match profile.application_type {
        Some(ApplicationType::Family) => fields.push(ProfileField::FamilyMembers),
        Some(ApplicationType::Binding) => {
            fields.push(ProfileField::FamilyRelation);
            fields.push(ProfileField::FamilyVisaType);
            if profile.residence_consulate == Some(Consulate::Shanghai) {
                fields.push(ProfileField::FamilyHolderIdentity);
            }
        }
        Some(ApplicationType::Economic) => {
            fields.push(ProfileField::EconomicRelation);
            fields.push(ProfileField::EconomicProofType);
        }
        Some(ApplicationType::Single) | None => {}
    }

    if !profile.application_type.is_some_and(ApplicationType::is_dependent) {
        fields.push(ProfileField::ProcessType);
    }

    if profile.is_process(ProcessType::Student) {
        fields.push(ProfileField::GraduateStatus);
    }

    if presents_visa_type(profile) {
        fields.push(ProfileField::VisaType);
    }

    if economic_material_domain(profile).is_some() {
        fields.push(ProfileField::EconomicMaterial);
    }

    fields.push(ProfileField::PreviousVisit);
    fields
}

/// Fields that must hold a value before a checklist can be compiled.
///
/// The process track is always required even when dependent applications hide
/// the question, since the resolver pins it to the normal track.
pub fn required_fields(profile: &ApplicantProfile) -> Vec<ProfileField> {
    let mut fields: Vec<ProfileField> = presented_fields(profile)
        .into_iter()
        .filter(|field| *field != ProfileField::FamilyMembers)
        .collect();

    if !fields.contains(&ProfileField::ProcessType) {
        fields.push(ProfileField::ProcessType);
    }

    fields
}

/// Required fields that are still unanswered.
pub fn missing_fields(profile: &ApplicantProfile) -> Vec<ProfileField> {
    required_fields(profile)
        .into_iter()
        .filter(|field| !is_answered(profile, *field))
        .collect()
}

pub fn is_answered(profile: &ApplicantProfile, field: ProfileField) -> bool {
    match field {
        ProfileField::ResidenceConsulate => profile.residence_consulate.is_some(),
        ProfileField::HukouConsulate => profile.hukou_consulate.is_some(),
        ProfileField::HukouType => profile.hukou_type.is_some(),
        ProfileField::IdentityType => profile.identity_type.is_some(),
        ProfileField::ApplicationType => profile.application_type.is_some(),
        ProfileField::ProcessType => profile.process_type.is_some(),
        ProfileField::VisaType => profile.visa_type.is_some(),
        ProfileField::PreviousVisit => profile.previous_visit.is_some(),
        ProfileField::GraduateStatus => profile.graduate_status.is_some(),
        ProfileField::EconomicMaterial => profile.economic_material.is_some(),
        ProfileField::FamilyMembers => !profile.family_members.is_empty(),
        ProfileField::FamilyRelation => profile.family_relation.is_some(),
        ProfileField::FamilyVisaType => profile.family_visa_type.is_some(),
        ProfileField::FamilyHolderIdentity => profile.family_holder_identity.is_some(),
        ProfileField::EconomicRelation => profile.economic_relation.is_some(),
        ProfileField::EconomicProofType => profile.economic_proof_type.is_some(),
    }
}

/// Visa tier is chosen on the tax and normal tracks; binding visas follow the holder.
pub(crate) fn presents_visa_type(profile: &ApplicantProfile) -> bool {
    matches!(
        profile.process_type,
        Some(ProcessType::Tax) | Some(ProcessType::Normal)
    ) && !profile.is_application(ApplicationType::Binding)
}

/// Legal economic materials, or `None` when the question is not active.
pub(crate) fn economic_material_domain(
    profile: &ApplicantProfile,
) -> Option<&'static [EconomicMaterial]> {
    let consulate = profile.residence_consulate?;
    let visa = profile.visa_type?;

    let applies = matches!(consulate, Consulate::Beijing | Consulate::Shanghai)
        && profile.is_process(ProcessType::Normal)
        && matches!(
            profile.application_type,
            Some(ApplicationType::Single) | Some(ApplicationType::Family)
        );

    applies.then(|| EconomicMaterial::domain(consulate, visa))
}
