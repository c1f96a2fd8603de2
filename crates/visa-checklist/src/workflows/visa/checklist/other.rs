use super::super::domain::{ApplicationType, IdentityType, ProcessType};
use super::{numbered, CompiledProfile};

const ELECTRONIC_PHOTO: &str = "和纸质照片一致的电子版照片";
const SIMPLIFIED_NOTICE: &str = "提供的签证发放通知书必须是本人的，且已赴日旅行";
const ANNUAL_TAX_STATEMENT: &str = "近一年的个人所得税税单（从去年到今年相同月份）";
const OUT_OF_JURISDICTION_TAX: &str =
    "如果税单右下角盖章是在外领区，需要额外提供领区内的营业执照副本复印件";

pub(super) fn other_materials(profile: &CompiledProfile<'_>) -> Vec<String> {
    let mut items: Vec<&str> = identity_extras(profile);

    items.push(ELECTRONIC_PHOTO);
    if profile.process == ProcessType::Simplified {
        items.push(SIMPLIFIED_NOTICE);
    }

    if profile.identity == IdentityType::Employed {
        if profile.is_application(ApplicationType::Family) {
            items.push("主申请人需要提供：");
        }
        if profile.process != ProcessType::Tax {
            items.push(ANNUAL_TAX_STATEMENT);
        }
        items.push(OUT_OF_JURISDICTION_TAX);
    }

    numbered(items)
}

fn identity_extras(profile: &CompiledProfile<'_>) -> Vec<&'static str> {
    match profile.identity {
        IdentityType::Retired => vec!["退休证复印件"],
        IdentityType::Freelance => {
            let mut extras = Vec::new();
            // The tax track already carries the tax certificate.
            if profile.process != ProcessType::Tax {
                extras.push("个税app无需开具的截图");
            }
            extras.push("收入来源说明");
            extras.push("相关附件证明");
            extras
        }
        IdentityType::Child => vec!["出生证明复印件（证明与监护人的关系）"],
        IdentityType::Employed | IdentityType::Student => Vec::new(),
    }
}
