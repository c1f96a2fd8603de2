use super::super::domain::{ApplicationType, Consulate, GraduateStatus, IdentityType, ProcessType};
use super::{numbered, CompiledProfile};

const ANY_ONE_TITLE: &str = "以下居住证明材料（选择一种即可）";
const ALL_REQUIRED_TITLE: &str = "以下居住证明材料（全部需要提供）";

const DEFAULT_OPTIONS: [&str; 3] = [
    "派出所开具的居住证确认单（原件）",
    "工作居住证确认单（可复印或扫描）",
    "居住证卡片原件（需提供原件）",
];

const SHANGHAI_OPTIONS: [&str; 3] = [
    "居住证双面复印件（上海居住证需额外附上密码）",
    "近期一年的社保（社保单最低要近期6个月缴纳在上海领区内）",
    "近期一年的纳税证明（税单最低要近期6个月缴纳在上海领区内）",
];

/// Heading line followed by the numbered options for the jurisdiction.
///
/// Family applications always carry the category and name every person who
/// lives outside their register's jurisdiction. Single-person applications
/// leave it out when the applicant does not need it.
pub(super) fn residence_proof(profile: &CompiledProfile<'_>) -> Vec<String> {
    let applicant_needs_proof = applicant_needs_proof(profile);
    let family = profile.is_application(ApplicationType::Family);
    if !applicant_needs_proof && !family {
        return Vec::new();
    }

    // Shanghai asks for the full set only from residents registered elsewhere.
    let (title, options) =
        if profile.residence == Consulate::Shanghai && profile.residence != profile.hukou {
            (ALL_REQUIRED_TITLE, SHANGHAI_OPTIONS)
        } else {
            (ANY_ONE_TITLE, DEFAULT_OPTIONS)
        };

    let heading = if family {
        let mut people = Vec::new();
        if applicant_needs_proof {
            people.push("主申请人".to_string());
        }
        people.extend(
            profile
                .members
                .iter()
                .enumerate()
                .filter(|(_, member)| member.needs_residence_proof())
                .map(|(index, _)| format!("家庭成员{}", index + 1)),
        );
        if people.is_empty() {
            format!("{title}：")
        } else {
            format!("{}需要提供{title}：", people.join(", "))
        }
    } else {
        format!("{title}：")
    };

    let mut lines = vec![heading];
    lines.extend(numbered(options));
    lines
}

/// Current students on the student track are covered by their enrolment record.
fn applicant_needs_proof(profile: &CompiledProfile<'_>) -> bool {
    let enrolled_student = profile.process == ProcessType::Student
        && profile.identity == IdentityType::Student
        && profile.graduate_status == Some(GraduateStatus::Current);

    profile.residence != profile.hukou && !enrolled_student
}
