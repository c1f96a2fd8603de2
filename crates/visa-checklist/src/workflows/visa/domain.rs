use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Occupation of an applicant or a family member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentityType {
    Employed,
    Student,
    Retired,
    #[serde(alias = "FREELANCER")]
    Freelance,
    Child,
}

impl IdentityType {
    pub const ALL: [IdentityType; 5] = [
        IdentityType::Employed,
        IdentityType::Student,
        IdentityType::Retired,
        IdentityType::Freelance,
        IdentityType::Child,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            IdentityType::Employed => "在职人员",
            IdentityType::Student => "在校学生",
            IdentityType::Retired => "退休人员",
            IdentityType::Freelance => "自由职业者",
            IdentityType::Child => "学龄前儿童",
        }
    }
}

/// Consular jurisdiction a residence or household register falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Consulate {
    #[serde(alias = "BEIJING")]
    Beijing,
    #[serde(alias = "SHANGHAI")]
    Shanghai,
    #[serde(alias = "OTHER")]
    Other,
}

impl Consulate {
    pub const ALL: [Consulate; 3] = [Consulate::Beijing, Consulate::Shanghai, Consulate::Other];

    pub const fn label(self) -> &'static str {
        match self {
            Consulate::Beijing => "北京",
            Consulate::Shanghai => "上海",
            Consulate::Other => "其他",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationType {
    Single,
    Family,
    Binding,
    Economic,
}

impl ApplicationType {
    pub const ALL: [ApplicationType; 4] = [
        ApplicationType::Single,
        ApplicationType::Family,
        ApplicationType::Binding,
        ApplicationType::Economic,
    ];

    /// Dependent applications borrow their standing from a relative.
    pub const fn is_dependent(self) -> bool {
        matches!(self, ApplicationType::Binding | ApplicationType::Economic)
    }
}

/// Processing track the application is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessType {
    Tax,
    Student,
    Normal,
    Simplified,
}

impl ProcessType {
    pub const ALL: [ProcessType; 4] = [
        ProcessType::Tax,
        ProcessType::Student,
        ProcessType::Normal,
        ProcessType::Simplified,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisaType {
    Single,
    Three,
    Five,
}

impl VisaType {
    pub const ALL: [VisaType; 3] = [VisaType::Single, VisaType::Three, VisaType::Five];

    pub const fn label(self) -> &'static str {
        match self {
            VisaType::Single => "单次签证",
            VisaType::Three => "三年多次往返签证",
            VisaType::Five => "五年多次往返签证",
        }
    }

    pub const fn is_multiple_entry(self) -> bool {
        matches!(self, VisaType::Three | VisaType::Five)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraduateStatus {
    #[serde(alias = "CURRENT")]
    Current,
    #[serde(alias = "RECENT", alias = "graduate")]
    Recent,
}

impl GraduateStatus {
    pub const ALL: [GraduateStatus; 2] = [GraduateStatus::Current, GraduateStatus::Recent];
}

/// Financial evidence offered on the normal track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomicMaterial {
    DepositSingle,
    DepositThree,
    DepositFive,
    CreditCard,
    SalarySingle,
    SalaryThree,
    SalaryFive,
}

impl EconomicMaterial {
    /// Materials the jurisdiction accepts for a visa tier, in presentation order.
    ///
    /// Returns an empty slice for jurisdictions without an economic-material question.
    pub fn domain(consulate: Consulate, visa: VisaType) -> &'static [EconomicMaterial] {
        use EconomicMaterial::*;

        match (consulate, visa) {
            (Consulate::Beijing, VisaType::Single) => &[DepositSingle, CreditCard],
            (Consulate::Beijing, VisaType::Three) => &[DepositThree],
            (Consulate::Beijing, VisaType::Five) => &[DepositFive],
            (Consulate::Shanghai, VisaType::Single) => &[DepositSingle, CreditCard, SalarySingle],
            (Consulate::Shanghai, VisaType::Three) => &[DepositThree, SalaryThree],
            (Consulate::Shanghai, VisaType::Five) => &[DepositFive, SalaryFive],
            (Consulate::Other, _) => &[],
        }
    }
}

/// Relationship between the applicant and a relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FamilyRelation {
    Spouse,
    Parent,
    Child,
}

impl FamilyRelation {
    pub const ALL: [FamilyRelation; 3] = [
        FamilyRelation::Spouse,
        FamilyRelation::Parent,
        FamilyRelation::Child,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            FamilyRelation::Spouse => "配偶",
            FamilyRelation::Parent => "父母",
            FamilyRelation::Child => "子女",
        }
    }
}

/// Household register kind; decides which register pages must be copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HukouType {
    #[default]
    #[serde(alias = "family")]
    Family,
    #[serde(alias = "collective")]
    Collective,
}

/// Evidence the sponsoring relative supplies on an economic application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EconomicProofType {
    EmploymentIncome,
    Deposit,
    TaxRecord,
}

impl EconomicProofType {
    pub const ALL: [EconomicProofType; 3] = [
        EconomicProofType::EmploymentIncome,
        EconomicProofType::Deposit,
        EconomicProofType::TaxRecord,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            EconomicProofType::EmploymentIncome => "在职收入证明",
            EconomicProofType::Deposit => "存款证明",
            EconomicProofType::TaxRecord => "纳税证明",
        }
    }
}

/// A relative travelling on a family application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub relation: FamilyRelation,
    pub identity_type: IdentityType,
    pub residence_consulate: Consulate,
    pub hukou_consulate: Consulate,
}

impl FamilyMember {
    pub fn needs_residence_proof(&self) -> bool {
        self.residence_consulate != self.hukou_consulate
    }
}

/// Answers collected so far for one application session.
///
/// Every field stays optional while the applicant is answering; the resolver
/// decides which ones are required for the current combination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicantProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_type: Option<IdentityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residence_consulate: Option<Consulate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hukou_consulate: Option<Consulate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hukou_type: Option<HukouType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_type: Option<ApplicationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_type: Option<ProcessType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visa_type: Option<VisaType>,
    #[serde(
        deserialize_with = "deserialize_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub previous_visit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduate_status: Option<GraduateStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economic_material: Option<EconomicMaterial>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub family_members: Vec<FamilyMember>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_relation: Option<FamilyRelation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_visa_type: Option<VisaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_holder_identity: Option<IdentityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economic_relation: Option<FamilyRelation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economic_proof_type: Option<EconomicProofType>,
}

impl ApplicantProfile {
    pub fn is_application(&self, application: ApplicationType) -> bool {
        self.application_type == Some(application)
    }

    pub fn is_process(&self, process: ProcessType) -> bool {
        self.process_type == Some(process)
    }

    pub fn is_identity(&self, identity: IdentityType) -> bool {
        self.identity_type == Some(identity)
    }
}

/// HTML forms post `previousVisit` as a string while JSON clients send a bool.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Flag::Bool(value)) => Ok(Some(value)),
        Some(Flag::Text(raw)) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid previousVisit value `{other}`"
            ))),
        },
    }
}

/// Profile question identifiers, used by diagnostics and the question graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    ResidenceConsulate,
    HukouConsulate,
    HukouType,
    IdentityType,
    ApplicationType,
    ProcessType,
    VisaType,
    PreviousVisit,
    GraduateStatus,
    EconomicMaterial,
    FamilyMembers,
    FamilyRelation,
    FamilyVisaType,
    FamilyHolderIdentity,
    EconomicRelation,
    EconomicProofType,
}

impl ProfileField {
    pub const fn as_str(self) -> &'static str {
        match self {
            ProfileField::ResidenceConsulate => "residenceConsulate",
            ProfileField::HukouConsulate => "hukouConsulate",
            ProfileField::HukouType => "hukouType",
            ProfileField::IdentityType => "identityType",
            ProfileField::ApplicationType => "applicationType",
            ProfileField::ProcessType => "processType",
            ProfileField::VisaType => "visaType",
            ProfileField::PreviousVisit => "previousVisit",
            ProfileField::GraduateStatus => "graduateStatus",
            ProfileField::EconomicMaterial => "economicMaterial",
            ProfileField::FamilyMembers => "familyMembers",
            ProfileField::FamilyRelation => "familyRelation",
            ProfileField::FamilyVisaType => "familyVisaType",
            ProfileField::FamilyHolderIdentity => "familyHolderIdentity",
            ProfileField::EconomicRelation => "economicRelation",
            ProfileField::EconomicProofType => "economicProofType",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn join_fields(fields: &[ProfileField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
