use super::super::domain::{GraduateStatus, IdentityType, ProcessType};
use super::CompiledProfile;

pub(super) fn academic_proof(profile: &CompiledProfile<'_>) -> Vec<String> {
    if profile.identity != IdentityType::Student {
        return Vec::new();
    }

    let items: &[&str] = match profile.graduate_status {
        Some(GraduateStatus::Recent) => &[
            "学信网学历在线验证报告",
            "登录学信网(https://www.chsi.com.cn/)，查询并打印学历信息，须本人签名",
        ],
        Some(GraduateStatus::Current) | None => &[
            "学信网学籍在线验证报告",
            "登录学信网(https://www.chsi.com.cn/)，查询并打印学籍信息，须本人签名",
        ],
    };
    items.iter().map(|item| item.to_string()).collect()
}

/// Non-students using the student track prove a past enrolment instead.
pub(super) fn academic_proof_with_explanation(profile: &CompiledProfile<'_>) -> Vec<String> {
    if profile.process != ProcessType::Student || profile.identity == IdentityType::Student {
        return Vec::new();
    }

    vec![
        "非在读学生使用特定大学生办理方式，需要提供曾经的学籍或学历证明".to_string(),
        "学信网电子学历注册备案表（毕业三年内）".to_string(),
        "学信网学历在线验证报告（https://www.chsi.com.cn/）".to_string(),
    ]
}

pub(super) fn employment_proof(profile: &CompiledProfile<'_>) -> Vec<String> {
    if !profile.proves_own_employment() {
        return Vec::new();
    }
    vec!["在职证明原件（需加盖公章，注明职位、入职时间、准假时间）".to_string()]
}
