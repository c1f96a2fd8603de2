use super::super::domain::{
    ApplicationType, Consulate, EconomicMaterial, FamilyRelation, IdentityType, ProcessType,
    VisaType,
};
use super::CompiledProfile;

const SALARY_CONTINUITY_NOTE: &str = "备注：近期6个月工资项流水需要是连续的";

pub(super) fn financial_proof(profile: &CompiledProfile<'_>) -> Vec<String> {
    match profile.application {
        ApplicationType::Binding => binding_holder_materials(profile),
        ApplicationType::Economic => vec![
            "1. 需提供直系亲属的经济材料（如：税单/存款/理财证明）".to_string(),
            "2. 与直系亲属的关系证明（如：户口本/出生证明/结婚证）".to_string(),
        ],
        ApplicationType::Single | ApplicationType::Family => match profile.process {
            ProcessType::Tax => vec!["个人所得税完税证明（近一年）".to_string()],
            ProcessType::Student => Vec::new(),
            ProcessType::Simplified => vec![
                "近三年两次日本签证的签证发放通知书复印件（非特大单次）".to_string(),
                "两次的入境许可贴纸复印件（如在旧护照上，需额外复印旧护照首页）".to_string(),
                "近期5年出入境记录复印件".to_string(),
            ],
            ProcessType::Normal => match profile.economic_material {
                Some(material) => material_items(profile, material),
                None => vec![fallback_savings(profile.identity)],
            },
        },
    }
}

/// Binding applicants reuse the materials the visa holder applied with.
fn binding_holder_materials(profile: &CompiledProfile<'_>) -> Vec<String> {
    // The holder is the applicant's relative seen from the other side.
    let holder = match profile.family_relation {
        Some(FamilyRelation::Spouse) => "配偶",
        Some(FamilyRelation::Parent) => "子女",
        Some(FamilyRelation::Child) => "父母",
        None => "",
    };
    let visa = profile.family_visa.map_or("", VisaType::label);

    let mut items = vec![format!("需提供{holder}{visa}申请时使用的经济材料")];

    if profile.residence == Consulate::Shanghai {
        let extra = match profile.holder_identity {
            Some(IdentityType::Employed) => Some("签证持有人为在职人员，需额外提供在职证明原件"),
            Some(IdentityType::Retired) => Some("签证持有人为退休人员，需额外提供退休证复印件"),
            Some(IdentityType::Freelance) => {
                Some("签证持有人为自由职业或无业，需额外提供情况说明及相关佐证材料")
            }
            _ => None,
        };
        items.extend(extra.map(str::to_string));
    }

    items
}

fn material_items(profile: &CompiledProfile<'_>, material: EconomicMaterial) -> Vec<String> {
    let deposit = |amount: &str| {
        vec![format!(
            "{amount}元以上存款/理财证明原件（需要是可验证银行开具的存款/理财证明）"
        )]
    };
    let salary = |amount: &str| {
        vec![
            format!("近期12个月可认定为工资的可验证银行账户对账单（统计年收入{amount}以上）"),
            SALARY_CONTINUITY_NOTE.to_string(),
        ]
    };

    match material {
        EconomicMaterial::DepositSingle => deposit("10万"),
        EconomicMaterial::DepositThree => deposit("50万"),
        EconomicMaterial::DepositFive => deposit("100万"),
        EconomicMaterial::CreditCard
            if profile.is_application(ApplicationType::Family)
                && profile.visa == Some(VisaType::Single) =>
        {
            vec!["家庭申请单次签证不能使用信用卡，请使用存款/理财证明或其他财力证明".to_string()]
        }
        EconomicMaterial::CreditCard => vec![
            "信用卡正反面复印件（自行遮挡CVV码）".to_string(),
            "信用卡有效性证明（近三个月电子账单截图或POS机回单）".to_string(),
        ],
        EconomicMaterial::SalarySingle => salary("10万"),
        EconomicMaterial::SalaryThree => salary("20万"),
        EconomicMaterial::SalaryFive => salary("50万"),
    }
}

/// Used where the jurisdiction offers no economic-material choice.
fn fallback_savings(identity: IdentityType) -> String {
    let owner = match identity {
        IdentityType::Student => "父母",
        IdentityType::Child => "监护人",
        _ => "",
    };
    format!("{owner}银行存款/理财证明（建议10万元以上）或活期存折复印件")
}
