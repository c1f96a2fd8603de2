use super::common::*;
use crate::workflows::visa::domain::{
    ApplicantProfile, ApplicationType, Consulate, EconomicMaterial, EconomicProofType,
    FamilyRelation, GraduateStatus, IdentityType, ProcessType, ProfileField, VisaType,
};
use crate::workflows::visa::eligibility::rules::{evaluate, RuleContext};
use crate::workflows::visa::eligibility::{
    Correction, EligibilityPolicy, EligibilityResolver, FinalizationError, ReasonKey,
    ResolutionResult, RuleId,
};
use crate::workflows::visa::risk::{RiskDecision, RiskFactor};

fn correction_for(result: &ResolutionResult, field: ProfileField) -> Option<Correction> {
    result
        .forced_corrections
        .iter()
        .find(|forced| forced.correction.field() == field)
        .map(|forced| forced.correction)
}

#[test]
fn child_single_application_becomes_binding() {
    let profile = ApplicantProfile {
        identity_type: Some(IdentityType::Child),
        ..employed_profile()
    };

    let result = resolver().resolve(&profile);

    assert_eq!(
        correction_for(&result, ProfileField::ApplicationType),
        Some(Correction::ApplicationType(ApplicationType::Binding))
    );
    assert_eq!(
        correction_for(&result, ProfileField::VisaType),
        Some(Correction::VisaType(None))
    );
    let options = &result.legal_options.application_type;
    assert!(!options.is_allowed(ApplicationType::Single));
    assert!(!options.is_allowed(ApplicationType::Family));
    assert!(options.is_allowed(ApplicationType::Binding));
    assert!(result.presented_fields.contains(&ProfileField::FamilyRelation));
}

#[test]
fn child_family_application_reports_only_final_correction() {
    let profile = ApplicantProfile {
        identity_type: Some(IdentityType::Child),
        application_type: Some(ApplicationType::Family),
        ..employed_profile()
    };

    let result = resolver().resolve(&profile);

    let application: Vec<_> = result
        .forced_corrections
        .iter()
        .filter(|forced| forced.correction.field() == ProfileField::ApplicationType)
        .collect();
    assert_eq!(application.len(), 1);
    assert_eq!(application[0].rule, RuleId::ChildApplicationType);
    assert_eq!(
        application[0].correction,
        Correction::ApplicationType(ApplicationType::Binding)
    );
}

#[test]
fn dependent_applications_force_normal_track() {
    let economic = ApplicantProfile {
        application_type: Some(ApplicationType::Economic),
        process_type: Some(ProcessType::Tax),
        visa_type: Some(VisaType::Five),
        economic_material: None,
        ..employed_profile()
    };
    let result = resolver().resolve(&economic);
    assert_eq!(
        correction_for(&result, ProfileField::ProcessType),
        Some(Correction::ProcessType(ProcessType::Normal))
    );
    assert_eq!(
        correction_for(&result, ProfileField::VisaType),
        Some(Correction::VisaType(Some(VisaType::Single)))
    );
    assert!(!result.presented_fields.contains(&ProfileField::ProcessType));

    let binding = ApplicantProfile {
        application_type: Some(ApplicationType::Binding),
        process_type: Some(ProcessType::Simplified),
        visa_type: Some(VisaType::Three),
        economic_material: None,
        ..employed_profile()
    };
    let result = resolver().resolve(&binding);
    assert_eq!(
        correction_for(&result, ProfileField::ProcessType),
        Some(Correction::ProcessType(ProcessType::Normal))
    );
    assert_eq!(
        correction_for(&result, ProfileField::VisaType),
        Some(Correction::VisaType(None))
    );
}

#[test]
fn retired_applicant_cannot_use_student_track() {
    let profile = ApplicantProfile {
        identity_type: Some(IdentityType::Retired),
        process_type: Some(ProcessType::Student),
        ..employed_profile()
    };

    let result = resolver().resolve(&profile);

    assert_eq!(result.forced_corrections.len(), 1);
    let forced = &result.forced_corrections[0];
    assert_eq!(forced.rule, RuleId::StudentTrackIdentity);
    assert_eq!(forced.reason, ReasonKey::StudentTrackNotAllowedForIdentity);
    assert_eq!(forced.correction, Correction::ProcessType(ProcessType::Normal));

    let tracks = result
        .legal_options
        .process_type
        .as_ref()
        .expect("process question presented");
    let student = tracks.state(ProcessType::Student).expect("student track listed");
    assert!(!student.allowed);
    assert_eq!(student.reason, Some(ReasonKey::StudentTrackNotAllowedForIdentity));
    assert!(tracks.is_allowed(ProcessType::Tax));
}

#[test]
fn family_application_returns_to_normal_track() {
    for track in [ProcessType::Student, ProcessType::Simplified] {
        let profile = ApplicantProfile {
            process_type: Some(track),
            ..family_profile(vec![])
        };

        let result = resolver().resolve(&profile);

        assert_eq!(result.forced_corrections.len(), 1, "{track:?}");
        let forced = &result.forced_corrections[0];
        assert_eq!(forced.rule, RuleId::FamilyProcessTrack);
        assert_eq!(forced.reason, ReasonKey::FamilyApplicationTrackUnsupported);
        assert_eq!(forced.correction, Correction::ProcessType(ProcessType::Normal));

        let tracks = result
            .legal_options
            .process_type
            .as_ref()
            .expect("process question presented");
        for blocked in [ProcessType::Student, ProcessType::Simplified] {
            let state = tracks.state(blocked).expect("track listed");
            assert!(!state.allowed);
            assert_eq!(state.reason, Some(ReasonKey::FamilyApplicationTrackUnsupported));
        }
        assert!(tracks.is_allowed(ProcessType::Normal));
        assert!(tracks.is_allowed(ProcessType::Tax));
    }
}

#[test]
fn credit_card_is_legal_for_single_but_not_family_single_entry() {
    let single = resolver().resolve(&employed_profile());
    let materials = single
        .legal_options
        .economic_material
        .as_ref()
        .expect("economic material presented");
    assert!(materials.is_allowed(EconomicMaterial::CreditCard));

    let family = ApplicantProfile {
        application_type: Some(ApplicationType::Family),
        ..employed_profile()
    };
    let result = resolver().resolve(&family);
    let materials = result
        .legal_options
        .economic_material
        .as_ref()
        .expect("economic material presented");
    let credit_card = materials
        .state(EconomicMaterial::CreditCard)
        .expect("credit card listed");
    assert!(!credit_card.allowed);
    assert_eq!(
        credit_card.reason,
        Some(ReasonKey::CreditCardNotAllowedForFamilySingle)
    );
}

#[test]
fn family_single_entry_credit_card_is_cleared() {
    let profile = ApplicantProfile {
        application_type: Some(ApplicationType::Family),
        economic_material: Some(EconomicMaterial::CreditCard),
        ..employed_profile()
    };

    let result = resolver().resolve(&profile);

    let forced = result
        .forced_corrections
        .iter()
        .find(|forced| forced.rule == RuleId::FamilyCreditCard)
        .expect("credit card cleared");
    assert_eq!(forced.correction, Correction::EconomicMaterial(None));
    assert!(result.missing_fields.contains(&ProfileField::EconomicMaterial));
}

#[test]
fn economic_material_domain_depends_on_consulate_and_tier() {
    let beijing_five = ApplicantProfile {
        visa_type: Some(VisaType::Five),
        economic_material: None,
        ..employed_profile()
    };
    let result = resolver().resolve(&beijing_five);
    let allowed: Vec<_> = result
        .legal_options
        .economic_material
        .as_ref()
        .expect("presented")
        .allowed()
        .collect();
    assert_eq!(allowed, vec![EconomicMaterial::DepositFive]);

    let shanghai_five = ApplicantProfile {
        residence_consulate: Some(Consulate::Shanghai),
        ..beijing_five
    };
    let result = resolver().resolve(&shanghai_five);
    let allowed: Vec<_> = result
        .legal_options
        .economic_material
        .as_ref()
        .expect("presented")
        .allowed()
        .collect();
    assert_eq!(
        allowed,
        vec![EconomicMaterial::DepositFive, EconomicMaterial::SalaryFive]
    );
}

#[test]
fn out_of_domain_material_is_cleared() {
    let profile = ApplicantProfile {
        visa_type: Some(VisaType::Three),
        economic_material: Some(EconomicMaterial::SalaryThree),
        ..employed_profile()
    };

    let result = resolver().resolve(&profile);

    let forced = result
        .forced_corrections
        .iter()
        .find(|forced| forced.rule == RuleId::EconomicMaterialDomain)
        .expect("salary is not offered in Beijing");
    assert_eq!(forced.reason, ReasonKey::EconomicMaterialOutsideDomain);
}

#[test]
fn material_is_cleared_outside_the_normal_track() {
    let profile = ApplicantProfile {
        process_type: Some(ProcessType::Tax),
        ..employed_profile()
    };

    let result = resolver().resolve(&profile);

    let forced = result
        .forced_corrections
        .iter()
        .find(|forced| forced.rule == RuleId::EconomicMaterialDomain)
        .expect("material cleared");
    assert_eq!(forced.reason, ReasonKey::EconomicMaterialNotApplicable);
    assert!(result.legal_options.economic_material.is_none());
}

#[test]
fn simplified_track_without_prior_visit_is_blocked_until_answered() {
    let profile = ApplicantProfile {
        process_type: Some(ProcessType::Simplified),
        visa_type: None,
        economic_material: None,
        previous_visit: Some(false),
        ..employed_profile()
    };

    let result = resolver().resolve(&profile);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].rule, RuleId::SimplifiedPriorVisit);
    assert_eq!(
        result.diagnostics[0].reason,
        ReasonKey::SimplifiedRequiresPreviousVisit
    );
    assert!(!result.legal_options.previous_visit.is_allowed(false));
    assert_eq!(
        correction_for(&result, ProfileField::VisaType),
        Some(Correction::VisaType(Some(VisaType::Three)))
    );

    let visited = ApplicantProfile {
        previous_visit: Some(true),
        ..profile
    };
    let result = resolver().resolve(&visited);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn family_member_outside_jurisdiction_blocks_with_member_index() {
    let profile = family_profile(vec![
        member(
            FamilyRelation::Spouse,
            IdentityType::Employed,
            Consulate::Beijing,
            Consulate::Beijing,
        ),
        member(
            FamilyRelation::Child,
            IdentityType::Student,
            Consulate::Shanghai,
            Consulate::Shanghai,
        ),
    ]);

    let result = resolver().resolve(&profile);

    assert_eq!(result.diagnostics.len(), 1);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.rule, RuleId::FamilyConsulateMatch);
    assert_eq!(diagnostic.reason, ReasonKey::FamilyMemberConsulateMismatch);
    assert_eq!(diagnostic.member, Some(2));
    assert!(result.forced_corrections.is_empty());

    let member_options = result
        .legal_options
        .member_residence_consulate
        .as_ref()
        .expect("member consulate presented");
    assert_eq!(
        member_options.allowed().collect::<Vec<_>>(),
        vec![Consulate::Beijing]
    );

    match resolver().finalize(profile, None) {
        Err(FinalizationError::Blocked { diagnostics }) => {
            assert_eq!(diagnostics[0].member, Some(2));
        }
        other => panic!("expected blocked finalization, got {other:?}"),
    }
}

#[test]
fn graduate_status_follows_identity() {
    let employed = ApplicantProfile {
        process_type: Some(ProcessType::Student),
        graduate_status: Some(GraduateStatus::Current),
        visa_type: None,
        economic_material: None,
        ..employed_profile()
    };
    let result = resolver().resolve(&employed);
    let forced = result
        .forced_corrections
        .iter()
        .find(|forced| forced.rule == RuleId::GraduateStatus)
        .expect("status flipped");
    assert_eq!(forced.correction, Correction::GraduateStatus(Some(GraduateStatus::Recent)));
    assert_eq!(forced.reason, ReasonKey::CurrentStatusRequiresStudent);

    let student = ApplicantProfile {
        identity_type: Some(IdentityType::Student),
        graduate_status: Some(GraduateStatus::Recent),
        ..employed
    };
    let result = resolver().resolve(&student);
    assert_eq!(
        correction_for(&result, ProfileField::GraduateStatus),
        Some(Correction::GraduateStatus(Some(GraduateStatus::Current)))
    );
}

#[test]
fn tax_track_is_redirected_for_students_and_children() {
    let student = ApplicantProfile {
        identity_type: Some(IdentityType::Student),
        process_type: Some(ProcessType::Tax),
        economic_material: None,
        ..employed_profile()
    };
    let result = resolver().resolve(&student);
    assert_eq!(
        correction_for(&result, ProfileField::ProcessType),
        Some(Correction::ProcessType(ProcessType::Student))
    );
    assert!(result.missing_fields.contains(&ProfileField::GraduateStatus));

    let options = result.legal_options.process_type.expect("track presented");
    assert!(!options.is_allowed(ProcessType::Tax));
    assert!(options.is_allowed(ProcessType::Student));
}

#[test]
fn binding_holder_identity_only_kept_for_shanghai() {
    let beijing = ApplicantProfile {
        identity_type: Some(IdentityType::Retired),
        application_type: Some(ApplicationType::Binding),
        visa_type: None,
        economic_material: None,
        family_relation: Some(FamilyRelation::Parent),
        family_visa_type: Some(VisaType::Five),
        family_holder_identity: Some(IdentityType::Employed),
        ..employed_profile()
    };
    let result = resolver().resolve(&beijing);
    assert_eq!(
        correction_for(&result, ProfileField::FamilyHolderIdentity),
        Some(Correction::FamilyHolderIdentity(None))
    );
    assert!(!result
        .presented_fields
        .contains(&ProfileField::FamilyHolderIdentity));

    let shanghai = ApplicantProfile {
        residence_consulate: Some(Consulate::Shanghai),
        family_holder_identity: None,
        ..beijing
    };
    let result = resolver().resolve(&shanghai);
    assert!(result
        .missing_fields
        .contains(&ProfileField::FamilyHolderIdentity));
}

#[test]
fn binding_holder_must_hold_multiple_entry_visa() {
    let profile = ApplicantProfile {
        application_type: Some(ApplicationType::Binding),
        visa_type: None,
        economic_material: None,
        family_relation: Some(FamilyRelation::Spouse),
        family_visa_type: Some(VisaType::Single),
        ..employed_profile()
    };

    let result = resolver().resolve(&profile);

    assert!(result.diagnostics.iter().any(|diagnostic| {
        diagnostic.reason == ReasonKey::BindingHolderVisaMustBeMultipleEntry
    }));
    let tiers = result.legal_options.family_visa_type.expect("presented");
    assert!(!tiers.is_allowed(VisaType::Single));
}

#[test]
fn economic_sponsor_defaults_require_opt_in() {
    let profile = ApplicantProfile {
        application_type: Some(ApplicationType::Economic),
        economic_material: None,
        ..employed_profile()
    };

    let result = resolver().resolve(&profile);
    assert!(result.missing_fields.contains(&ProfileField::EconomicRelation));
    assert!(result
        .missing_fields
        .contains(&ProfileField::EconomicProofType));
    assert!(correction_for(&result, ProfileField::EconomicRelation).is_none());

    let opted_in = EligibilityResolver::new(
        EligibilityPolicy::default().with_economic_sponsor_defaults(true),
    );
    let result = opted_in.resolve(&profile);
    assert_eq!(
        correction_for(&result, ProfileField::EconomicRelation),
        Some(Correction::EconomicRelation(FamilyRelation::Parent))
    );
    assert_eq!(
        correction_for(&result, ProfileField::EconomicProofType),
        Some(Correction::EconomicProofType(
            EconomicProofType::EmploymentIncome
        ))
    );
    assert!(result.missing_fields.is_empty());
}

#[test]
fn other_jurisdiction_requires_policy() {
    let profile = ApplicantProfile {
        residence_consulate: Some(Consulate::Other),
        economic_material: None,
        ..employed_profile()
    };

    let result = resolver().resolve(&profile);
    assert!(result
        .diagnostics
        .iter()
        .any(|diagnostic| diagnostic.reason == ReasonKey::UnsupportedConsulate));
    assert!(!result
        .legal_options
        .residence_consulate
        .is_allowed(Consulate::Other));

    let accepting =
        EligibilityResolver::new(EligibilityPolicy::default().with_accept_other_consulate(true));
    let result = accepting.resolve(&profile);
    assert!(result.diagnostics.is_empty());
    assert!(result.legal_options.economic_material.is_none());
    assert!(result.is_complete());
}

#[test]
fn empty_profile_presents_the_opening_questions() {
    let result = resolver().resolve(&ApplicantProfile::default());

    let opening = vec![
        ProfileField::ResidenceConsulate,
        ProfileField::HukouConsulate,
        ProfileField::IdentityType,
        ProfileField::ApplicationType,
        ProfileField::ProcessType,
        ProfileField::PreviousVisit,
    ];
    assert_eq!(result.presented_fields, opening);
    assert_eq!(result.missing_fields, opening);
    assert!(result.forced_corrections.is_empty());
    assert!(result.diagnostics.is_empty());
    assert!(!result.risk_acknowledgement_required);
}

#[test]
fn single_rule_can_be_evaluated_alone() {
    let policy = EligibilityPolicy::default();
    let profile = ApplicantProfile {
        application_type: Some(ApplicationType::Binding),
        process_type: Some(ProcessType::Tax),
        ..ApplicantProfile::default()
    };
    let mut context = RuleContext::new(profile, &policy);

    evaluate(RuleId::DependentProcessTrack, &mut context);

    assert_eq!(context.profile.process_type, Some(ProcessType::Normal));
    assert_eq!(context.corrections.len(), 1);
    assert!(context.diagnostics.is_empty());
}

#[test]
fn resolution_reaches_a_fixed_point_in_one_pass() {
    let resolver = EligibilityResolver::new(
        EligibilityPolicy::default().with_economic_sponsor_defaults(true),
    );
    let identities = [None]
        .into_iter()
        .chain(IdentityType::ALL.into_iter().map(Some));
    let identities: Vec<_> = identities.collect();
    let applications: Vec<_> = [None]
        .into_iter()
        .chain(ApplicationType::ALL.into_iter().map(Some))
        .collect();
    let processes: Vec<_> = [None]
        .into_iter()
        .chain(ProcessType::ALL.into_iter().map(Some))
        .collect();
    let visas: Vec<_> = [None]
        .into_iter()
        .chain(VisaType::ALL.into_iter().map(Some))
        .collect();
    let materials = [
        None,
        Some(EconomicMaterial::DepositSingle),
        Some(EconomicMaterial::CreditCard),
        Some(EconomicMaterial::SalaryFive),
    ];
    let statuses = [
        None,
        Some(GraduateStatus::Current),
        Some(GraduateStatus::Recent),
    ];

    for residence in [Consulate::Beijing, Consulate::Shanghai] {
        for &identity in &identities {
            for &application in &applications {
                for &process in &processes {
                    for &visa in &visas {
                        for material in materials {
                            for status in statuses {
                                for holder in [None, Some(IdentityType::Employed)] {
                                    let profile = ApplicantProfile {
                                        identity_type: identity,
                                        residence_consulate: Some(residence),
                                        hukou_consulate: Some(Consulate::Beijing),
                                        application_type: application,
                                        process_type: process,
                                        visa_type: visa,
                                        previous_visit: Some(false),
                                        graduate_status: status,
                                        economic_material: material,
                                        family_holder_identity: holder,
                                        ..ApplicantProfile::default()
                                    };

                                    let first = resolver.resolve(&profile);
                                    let corrected = first.apply_corrections(&profile);
                                    let second = resolver.resolve(&corrected);

                                    assert!(
                                        second.forced_corrections.is_empty(),
                                        "second pass corrected {:?} for {profile:?}",
                                        second.forced_corrections
                                    );
                                    assert_eq!(first, resolver.resolve(&profile));
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn multiple_entry_without_visit_requires_acknowledgement() {
    let profile = ApplicantProfile {
        visa_type: Some(VisaType::Three),
        economic_material: Some(EconomicMaterial::DepositThree),
        previous_visit: Some(false),
        ..employed_profile()
    };

    assert!(resolver().resolve(&profile).risk_acknowledgement_required);
    assert!(matches!(
        resolver().finalize(profile.clone(), None),
        Err(FinalizationError::RiskAcknowledgementRequired)
    ));

    let empty = RiskDecision::Acknowledge { factors: Vec::new() };
    assert!(matches!(
        resolver().finalize(profile.clone(), Some(&empty)),
        Err(FinalizationError::RiskAcknowledgementRequired)
    ));

    let affirmed = RiskDecision::Acknowledge {
        factors: vec![RiskFactor::SchengenTravel],
    };
    let finalized = resolver()
        .finalize(profile.clone(), Some(&affirmed))
        .expect("acknowledged profile finalizes");
    assert_eq!(finalized.visa_type, Some(VisaType::Three));
}

#[test]
fn downgrade_drops_material_chosen_for_the_multiple_entry_tier() {
    let profile = ApplicantProfile {
        visa_type: Some(VisaType::Three),
        economic_material: Some(EconomicMaterial::DepositThree),
        previous_visit: Some(false),
        ..employed_profile()
    };

    match resolver().finalize(profile, Some(&RiskDecision::DowngradeToSingle)) {
        Err(FinalizationError::Incomplete { missing }) => {
            assert_eq!(missing, vec![ProfileField::EconomicMaterial]);
        }
        other => panic!("expected incomplete profile after downgrade, got {other:?}"),
    }
}

#[test]
fn downgrade_finalizes_as_single_entry() {
    let resolver =
        EligibilityResolver::new(EligibilityPolicy::default().with_accept_other_consulate(true));
    let profile = ApplicantProfile {
        residence_consulate: Some(Consulate::Other),
        hukou_consulate: Some(Consulate::Other),
        visa_type: Some(VisaType::Five),
        economic_material: None,
        previous_visit: Some(false),
        ..employed_profile()
    };

    let finalized = resolver
        .finalize(profile, Some(&RiskDecision::DowngradeToSingle))
        .expect("downgrade satisfies the gate");

    assert_eq!(finalized.visa_type, Some(VisaType::Single));
}

#[test]
fn finalize_reports_missing_answers() {
    let profile = ApplicantProfile {
        previous_visit: None,
        ..employed_profile()
    };

    match resolver().finalize(profile, None) {
        Err(FinalizationError::Incomplete { missing }) => {
            assert_eq!(missing, vec![ProfileField::PreviousVisit]);
        }
        other => panic!("expected incomplete profile, got {other:?}"),
    }
}
