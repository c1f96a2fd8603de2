mod academic;
mod basic;
mod family;
mod financial;
mod other;
mod residence;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{
    join_fields, ApplicantProfile, ApplicationType, Consulate, EconomicMaterial,
    EconomicProofType, FamilyMember, FamilyRelation, GraduateStatus, HukouType, IdentityType,
    ProcessType, ProfileField, VisaType,
};
use super::eligibility::{is_answered, missing_fields};

/// Document categories in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChecklistCategory {
    BasicInfo,
    BasicMaterials,
    AcademicProof,
    AcademicProofWithExplanation,
    EmploymentProof,
    FinancialProof,
    ResidenceProof,
    FamilyMaterials,
    OtherMaterials,
}

impl ChecklistCategory {
    pub const ALL: [ChecklistCategory; 9] = [
        ChecklistCategory::BasicInfo,
        ChecklistCategory::BasicMaterials,
        ChecklistCategory::AcademicProof,
        ChecklistCategory::AcademicProofWithExplanation,
        ChecklistCategory::EmploymentProof,
        ChecklistCategory::FinancialProof,
        ChecklistCategory::ResidenceProof,
        ChecklistCategory::FamilyMaterials,
        ChecklistCategory::OtherMaterials,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ChecklistCategory::BasicInfo => "基本信息",
            ChecklistCategory::BasicMaterials => "基本材料",
            ChecklistCategory::AcademicProof => "学籍/学历证明",
            ChecklistCategory::AcademicProofWithExplanation => "学籍/学历证明及情况说明",
            ChecklistCategory::EmploymentProof => "工作证明",
            ChecklistCategory::FinancialProof => "财力证明",
            ChecklistCategory::ResidenceProof => "居住证明材料",
            ChecklistCategory::FamilyMaterials => "家属材料",
            ChecklistCategory::OtherMaterials => "其他材料",
        }
    }
}

/// Compiled checklist keyed by category; empty categories are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentChecklist {
    sections: BTreeMap<ChecklistCategory, Vec<String>>,
}

impl DocumentChecklist {
    pub fn get(&self, category: ChecklistCategory) -> Option<&[String]> {
        self.sections.get(&category).map(Vec::as_slice)
    }

    pub fn contains(&self, category: ChecklistCategory) -> bool {
        self.sections.contains_key(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = ChecklistCategory> + '_ {
        self.sections.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChecklistCategory, &[String])> + '_ {
        self.sections
            .iter()
            .map(|(category, items)| (*category, items.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn insert(&mut self, category: ChecklistCategory, items: Vec<String>) {
        if !items.is_empty() {
            self.sections.insert(category, items);
        }
    }
}

impl fmt::Display for DocumentChecklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (category, items)) in self.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "【{}】", category.label())?;

            match category {
                ChecklistCategory::BasicInfo | ChecklistCategory::FamilyMaterials => {
                    for item in items {
                        writeln!(f, "{item}")?;
                    }
                }
                ChecklistCategory::ResidenceProof => {
                    let mut lines = items.iter();
                    if let Some(heading) = lines.next() {
                        writeln!(f, "{heading}")?;
                    }
                    for item in lines {
                        writeln!(f, "    {item}")?;
                    }
                }
                _ => {
                    let mut position = 1;
                    for item in items {
                        if is_numbered(item) {
                            writeln!(f, "{item}")?;
                        } else {
                            writeln!(f, "{position}. {item}")?;
                            position += 1;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Matches entries that already start with `<digits>.<whitespace>`.
fn is_numbered(item: &str) -> bool {
    let digits = item.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0
        && item[digits..]
            .strip_prefix('.')
            .and_then(|rest| rest.chars().next())
            .is_some_and(char::is_whitespace)
}

/// Prefixes each entry with its one-based position.
pub(crate) fn numbered<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| format!("{}. {}", index + 1, item.as_ref()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("checklist cannot be compiled, missing: {}", join_fields(.missing))]
pub struct IncompleteProfileError {
    pub missing: Vec<ProfileField>,
}

/// Answer set with every always-required question answered.
pub(crate) struct CompiledProfile<'a> {
    pub identity: IdentityType,
    pub residence: Consulate,
    pub hukou: Consulate,
    pub hukou_type: HukouType,
    pub application: ApplicationType,
    pub process: ProcessType,
    pub visa: Option<VisaType>,
    pub graduate_status: Option<GraduateStatus>,
    pub economic_material: Option<EconomicMaterial>,
    pub members: &'a [FamilyMember],
    pub family_relation: Option<FamilyRelation>,
    pub family_visa: Option<VisaType>,
    pub holder_identity: Option<IdentityType>,
    pub economic_relation: Option<FamilyRelation>,
    pub economic_proof: Option<EconomicProofType>,
}

impl<'a> CompiledProfile<'a> {
    fn from_profile(profile: &'a ApplicantProfile) -> Result<Self, IncompleteProfileError> {
        let missing = missing_fields(profile);
        if !missing.is_empty() {
            return Err(IncompleteProfileError { missing });
        }

        let (Some(identity), Some(residence), Some(hukou), Some(application), Some(process)) = (
            profile.identity_type,
            profile.residence_consulate,
            profile.hukou_consulate,
            profile.application_type,
            profile.process_type,
        ) else {
            let missing = [
                ProfileField::IdentityType,
                ProfileField::ResidenceConsulate,
                ProfileField::HukouConsulate,
                ProfileField::ApplicationType,
                ProfileField::ProcessType,
            ]
            .into_iter()
            .filter(|field| !is_answered(profile, *field))
            .collect();
            return Err(IncompleteProfileError { missing });
        };

        Ok(Self {
            identity,
            residence,
            hukou,
            hukou_type: profile.hukou_type.unwrap_or_default(),
            application,
            process,
            visa: profile.visa_type,
            graduate_status: profile.graduate_status,
            economic_material: profile.economic_material,
            members: &profile.family_members,
            family_relation: profile.family_relation,
            family_visa: profile.family_visa_type,
            holder_identity: profile.family_holder_identity,
            economic_relation: profile.economic_relation,
            economic_proof: profile.economic_proof_type,
        })
    }

    pub fn is_application(&self, application: ApplicationType) -> bool {
        self.application == application
    }

    /// Employed applicants prove employment themselves unless a student-track or
    /// economic application replaces that proof.
    pub fn proves_own_employment(&self) -> bool {
        self.identity == IdentityType::Employed
            && self.process != ProcessType::Student
            && self.application != ApplicationType::Economic
    }
}

/// Expands a finalized profile into the categorized document list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChecklistCompiler;

impl ChecklistCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compiles a profile the resolver has already finalized; rules are not re-checked.
    pub fn compile(
        &self,
        profile: &ApplicantProfile,
    ) -> Result<DocumentChecklist, IncompleteProfileError> {
        let profile = CompiledProfile::from_profile(profile)?;
        let mut checklist = DocumentChecklist::default();

        checklist.insert(ChecklistCategory::BasicInfo, basic::basic_info(&profile));
        checklist.insert(
            ChecklistCategory::BasicMaterials,
            basic::basic_materials(&profile),
        );
        checklist.insert(
            ChecklistCategory::AcademicProof,
            academic::academic_proof(&profile),
        );
        checklist.insert(
            ChecklistCategory::AcademicProofWithExplanation,
            academic::academic_proof_with_explanation(&profile),
        );
        checklist.insert(
            ChecklistCategory::EmploymentProof,
            academic::employment_proof(&profile),
        );
        checklist.insert(
            ChecklistCategory::FinancialProof,
            financial::financial_proof(&profile),
        );
        checklist.insert(
            ChecklistCategory::ResidenceProof,
            residence::residence_proof(&profile),
        );
        checklist.insert(
            ChecklistCategory::FamilyMaterials,
            family::family_materials(&profile),
        );
        checklist.insert(
            ChecklistCategory::OtherMaterials,
            other::other_materials(&profile),
        );

        info!(
            application = ?profile.application,
            process = ?profile.process,
            categories = checklist.sections.len(),
            "document checklist compiled"
        );
        Ok(checklist)
    }
}
