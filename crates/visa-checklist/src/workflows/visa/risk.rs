use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantProfile, ProcessType};

/// Disclosure shown before a first-time visitor files for a multiple-entry visa.
pub const RISK_PROMPT: &str = "普通经济材料申请多次签证，如果从未访问过日本，建议申请单次签证。如继续申请多次签证，请确认以下选项：";

/// Circumstances an applicant can affirm to keep a multiple-entry request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    SchengenTravel,
    AnglosphereTravel,
    AnnualTaxOverTenThousand,
    SocialSecurityFiveYears,
    UrbanHukou,
    BachelorDegree,
}

impl RiskFactor {
    pub const ALL: [RiskFactor; 6] = [
        RiskFactor::SchengenTravel,
        RiskFactor::AnglosphereTravel,
        RiskFactor::AnnualTaxOverTenThousand,
        RiskFactor::SocialSecurityFiveYears,
        RiskFactor::UrbanHukou,
        RiskFactor::BachelorDegree,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            RiskFactor::SchengenTravel => "schengen_travel",
            RiskFactor::AnglosphereTravel => "anglosphere_travel",
            RiskFactor::AnnualTaxOverTenThousand => "annual_tax_over_ten_thousand",
            RiskFactor::SocialSecurityFiveYears => "social_security_five_years",
            RiskFactor::UrbanHukou => "urban_hukou",
            RiskFactor::BachelorDegree => "bachelor_degree",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskFactor::SchengenTravel => "去过欧洲申根国",
            RiskFactor::AnglosphereTravel => "去过美国、加拿大、澳洲、新西兰",
            RiskFactor::AnnualTaxOverTenThousand => "年纳税大于1万",
            RiskFactor::SocialSecurityFiveYears => "当前工作社保已经缴纳五年以上",
            RiskFactor::UrbanHukou => "领区内大城区户籍",
            RiskFactor::BachelorDegree => "四年全日制本科及以上学历",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RiskFactor {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        RiskFactor::ALL
            .into_iter()
            .find(|factor| factor.key() == normalized)
            .ok_or_else(|| {
                let known = RiskFactor::ALL.map(RiskFactor::key).join(", ");
                format!("unknown risk factor `{raw}` (expected one of {known})")
            })
    }
}

/// Applicant's answer to the disclosure; held for one submission only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RiskDecision {
    Acknowledge { factors: Vec<RiskFactor> },
    DowngradeToSingle,
}

impl RiskDecision {
    /// An acknowledgement only counts when at least one factor is affirmed.
    pub fn acknowledges(&self) -> bool {
        matches!(self, RiskDecision::Acknowledge { factors } if !factors.is_empty())
    }
}

/// Normal-track multiple-entry requests from first-time visitors need a disclosure.
pub fn requires_acknowledgement(profile: &ApplicantProfile) -> bool {
    profile.is_process(ProcessType::Normal)
        && profile.visa_type.is_some_and(|visa| visa.is_multiple_entry())
        && profile.previous_visit == Some(false)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactorView {
    pub key: RiskFactor,
    pub label: String,
}

/// Payload the caller renders as the disclosure dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskChecklist {
    pub prompt: String,
    pub factors: Vec<RiskFactorView>,
}

pub fn risk_checklist() -> RiskChecklist {
    RiskChecklist {
        prompt: RISK_PROMPT.to_string(),
        factors: RiskFactor::ALL
            .into_iter()
            .map(|factor| RiskFactorView {
                key: factor,
                label: factor.label().to_string(),
            })
            .collect(),
    }
}
