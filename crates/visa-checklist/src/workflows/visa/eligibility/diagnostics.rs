use serde::{Deserialize, Serialize};

use super::super::domain::{
    ApplicantProfile, ApplicationType, EconomicMaterial, EconomicProofType, FamilyRelation,
    GraduateStatus, IdentityType, ProcessType, ProfileField, VisaType,
};
use super::rules::RuleId;

/// Stable, localizable key explaining why a value was corrected, disallowed, or blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonKey {
    FamilyMemberConsulateMismatch,
    FamilyApplicationNotAllowedForIdentity,
    SingleApplicationNotAllowedForChild,
    StudentTrackNotAllowedForIdentity,
    TaxTrackNotAllowedForIdentity,
    FamilyApplicationTrackUnsupported,
    DependentApplicationRequiresNormalTrack,
    EconomicApplicationSingleEntryOnly,
    BindingVisaFollowsHolder,
    SimplifiedRequiresPreviousVisit,
    CurrentStatusRequiresStudent,
    RecentGraduateStatusNotForStudent,
    GraduateStatusOnlyForStudentTrack,
    EconomicMaterialOutsideDomain,
    EconomicMaterialNotApplicable,
    CreditCardNotAllowedForFamilySingle,
    HolderIdentityOnlyForShanghaiBinding,
    HolderIdentityNotAccepted,
    BindingHolderVisaMustBeMultipleEntry,
    TrackImpliesVisaTier,
    EconomicSponsorDefaulted,
    UnsupportedConsulate,
}

impl ReasonKey {
    /// Default Chinese wording shown when the caller has no translation of its own.
    pub const fn message(self) -> &'static str {
        match self {
            ReasonKey::FamilyMemberConsulateMismatch => "家庭成员的居住地领区必须与主申请人一致",
            ReasonKey::FamilyApplicationNotAllowedForIdentity => {
                "学生和儿童不能作为家庭签证的主申请人"
            }
            ReasonKey::SingleApplicationNotAllowedForChild => "儿童需要通过绑定签证或经济材料申请",
            ReasonKey::StudentTrackNotAllowedForIdentity => {
                "退休人员和儿童不能使用学生专用办理方式"
            }
            ReasonKey::TaxTrackNotAllowedForIdentity => "学生和儿童不能使用个税办理方式",
            ReasonKey::FamilyApplicationTrackUnsupported => "家庭签证只能使用个税或普通办理方式",
            ReasonKey::DependentApplicationRequiresNormalTrack => {
                "绑定签证和经济材料申请只能使用普通办理方式"
            }
            ReasonKey::EconomicApplicationSingleEntryOnly => "经济材料申请只能申请单次签证",
            ReasonKey::BindingVisaFollowsHolder => "绑定签证的类型与签证持有人一致",
            ReasonKey::SimplifiedRequiresPreviousVisit => "新政简化办理需要曾经赴日旅行",
            ReasonKey::CurrentStatusRequiresStudent => "非在读学生不能选择在读状态",
            ReasonKey::RecentGraduateStatusNotForStudent => "在读学生不能选择毕业状态",
            ReasonKey::GraduateStatusOnlyForStudentTrack => "学籍状态仅适用于学生专用办理方式",
            ReasonKey::EconomicMaterialOutsideDomain => "所选财力证明不适用于当前领区和签证类型",
            ReasonKey::EconomicMaterialNotApplicable => "当前办理方式不需要选择财力证明",
            ReasonKey::CreditCardNotAllowedForFamilySingle => "家庭申请单次签证不能使用信用卡",
            ReasonKey::HolderIdentityOnlyForShanghaiBinding => {
                "仅上海领区的绑定签证需要签证持有人身份"
            }
            ReasonKey::HolderIdentityNotAccepted => "签证持有人身份必须是在职、退休或自由职业",
            ReasonKey::BindingHolderVisaMustBeMultipleEntry => {
                "签证持有人必须持有三年或五年多次往返签证"
            }
            ReasonKey::TrackImpliesVisaTier => "当前办理方式决定了签证类型",
            ReasonKey::EconomicSponsorDefaulted => "已使用默认的经济材料提供人",
            ReasonKey::UnsupportedConsulate => "暂不支持该领区的申请",
        }
    }
}

/// Blocking finding that the applicant has to resolve by changing an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub rule: RuleId,
    pub reason: ReasonKey,
    pub fields: Vec<ProfileField>,
    /// One-based position in `familyMembers` when the finding concerns a member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<usize>,
}

/// Value a rule forces onto a field; `None` clears the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum Correction {
    ApplicationType(ApplicationType),
    ProcessType(ProcessType),
    VisaType(Option<VisaType>),
    GraduateStatus(Option<GraduateStatus>),
    EconomicMaterial(Option<EconomicMaterial>),
    FamilyHolderIdentity(Option<IdentityType>),
    EconomicRelation(FamilyRelation),
    EconomicProofType(EconomicProofType),
}

impl Correction {
    pub fn field(&self) -> ProfileField {
        match self {
            Correction::ApplicationType(_) => ProfileField::ApplicationType,
            Correction::ProcessType(_) => ProfileField::ProcessType,
            Correction::VisaType(_) => ProfileField::VisaType,
            Correction::GraduateStatus(_) => ProfileField::GraduateStatus,
            Correction::EconomicMaterial(_) => ProfileField::EconomicMaterial,
            Correction::FamilyHolderIdentity(_) => ProfileField::FamilyHolderIdentity,
            Correction::EconomicRelation(_) => ProfileField::EconomicRelation,
            Correction::EconomicProofType(_) => ProfileField::EconomicProofType,
        }
    }

    pub fn apply(&self, profile: &mut ApplicantProfile) {
        match *self {
            Correction::ApplicationType(value) => profile.application_type = Some(value),
            Correction::ProcessType(value) => profile.process_type = Some(value),
            Correction::VisaType(value) => profile.visa_type = value,
            Correction::GraduateStatus(value) => profile.graduate_status = value,
            Correction::EconomicMaterial(value) => profile.economic_material = value,
            Correction::FamilyHolderIdentity(value) => profile.family_holder_identity = value,
            Correction::EconomicRelation(value) => profile.economic_relation = Some(value),
            Correction::EconomicProofType(value) => profile.economic_proof_type = Some(value),
        }
    }
}

/// Correction together with the rule that forced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForcedCorrection {
    pub rule: RuleId,
    pub reason: ReasonKey,
    pub correction: Correction,
}
