use super::super::domain::{
    ApplicationType, Consulate, FamilyRelation, HukouType, IdentityType, ProcessType, VisaType,
};
use super::{numbered, CompiledProfile};

const PASSPORT: &str = "护照原件+首页彩色复印件（剩余有效期大于7个月）";
const APPLICATION_FORM: &str = "签证申请表（双面打印）";
const PHOTO: &str = "小两寸（3.5cmx4.5cm）白底证件照（近期6个月内拍摄）";
const EMPLOYMENT_CERTIFICATE: &str = "在职证明（原件）";
const HOLDER_PASSPORT: &str = "签证持有人的护照首页复印件 + 签证页复印件";

pub(super) fn basic_info(profile: &CompiledProfile<'_>) -> Vec<String> {
    let mut lines = vec![
        format!("居住地领区: {}", profile.residence.label()),
        format!("户籍所在地领区: {}", profile.hukou.label()),
        format!("申请类型: {}", application_line(profile)),
    ];

    match profile.application {
        ApplicationType::Binding => {
            lines.push(format!("家属签证类型: {}", holder_visa_label(profile.family_visa)));
        }
        ApplicationType::Economic => {
            let sponsor = (profile.economic_relation, profile.economic_proof);
            if let (Some(relation), Some(proof)) = sponsor {
                lines.push(format!(
                    "经济材料提供人: {}（{}）",
                    relation.label(),
                    proof.label()
                ));
            }
        }
        ApplicationType::Single | ApplicationType::Family => {}
    }

    lines
}

fn application_line(profile: &CompiledProfile<'_>) -> String {
    if profile.is_application(ApplicationType::Binding) {
        let relation = profile.family_relation.map_or("", FamilyRelation::label);
        return format!(
            "申请人是{}持有人的{}",
            holder_visa_label(profile.family_visa),
            relation
        );
    }

    match profile.process {
        ProcessType::Simplified => "三年多次签证（新政简化）".to_string(),
        ProcessType::Student => "单次签证（学生专用）".to_string(),
        ProcessType::Tax | ProcessType::Normal => {
            profile.visa.unwrap_or(VisaType::Single).label().to_string()
        }
    }
}

fn holder_visa_label(visa: Option<VisaType>) -> &'static str {
    match visa {
        Some(VisaType::Three) => VisaType::Three.label(),
        _ => VisaType::Five.label(),
    }
}

pub(super) fn basic_materials(profile: &CompiledProfile<'_>) -> Vec<String> {
    let mut items = vec![
        PASSPORT,
        APPLICATION_FORM,
        PHOTO,
        household_register(profile.residence, profile.hukou_type),
    ];

    if profile.residence == Consulate::Shanghai && profile.identity == IdentityType::Employed {
        items.push(EMPLOYMENT_CERTIFICATE);
    }

    if profile.is_application(ApplicationType::Binding) {
        items.push(HOLDER_PASSPORT);
        items.push(holder_relation_proof(profile.family_relation));
    }

    numbered(items)
}

/// Shanghai asks for the householder page on family registers.
fn household_register(residence: Consulate, hukou_type: HukouType) -> &'static str {
    match (residence, hukou_type) {
        (Consulate::Shanghai, HukouType::Family) => "户口本复印件（家庭户：户首页+户主页+本人页）",
        (Consulate::Shanghai, HukouType::Collective) => "户口本复印件（集体户：户首页+本人页）",
        (_, HukouType::Family) => "户口本复印件（家庭户：户首页 + 本人页）",
        (_, HukouType::Collective) => "户口本复印件（集体户：户首页 + 本人页）",
    }
}

fn holder_relation_proof(relation: Option<FamilyRelation>) -> &'static str {
    match relation {
        Some(FamilyRelation::Spouse) => "与签证持有人的关系证明材料（结婚证/户口本）",
        Some(FamilyRelation::Parent) => "与签证持有人的关系证明材料（子女出生证明/户口本）",
        Some(FamilyRelation::Child) => "与签证持有人的关系证明材料（出生证明/户口本）",
        None => "与签证持有人的关系证明材料（结婚证/出生证明/户口本）",
    }
}
