use super::super::domain::{ApplicationType, IdentityType};
use super::CompiledProfile;

pub(super) fn family_materials(profile: &CompiledProfile<'_>) -> Vec<String> {
    if !profile.is_application(ApplicationType::Family) {
        return Vec::new();
    }

    let mut lines = vec![
        "1.基本材料内的1、2、3、4项目".to_string(),
        "2.与主申请人的关系证明".to_string(),
    ];

    for (index, member) in profile.members.iter().enumerate() {
        lines.push(format!(
            "{}. 家庭成员{}（{}）{}",
            index + 3,
            index + 1,
            member.relation.label(),
            member_requirement(member.identity_type)
        ));
    }

    lines
}

fn member_requirement(identity: IdentityType) -> &'static str {
    match identity {
        IdentityType::Employed => "需要提供在职证明原件",
        IdentityType::Student => "需要提供学信网在线学籍验证报告",
        IdentityType::Retired => "需要提供退休证复印件",
        IdentityType::Freelance => "需要提供自由职业情况说明及相关证明材料",
        IdentityType::Child => "需要由监护人陪同并提供监护关系证明",
    }
}
