use serde::Serialize;

use ars_core::models::risk::RiskLevel;

/// Action guidance attached to a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Traffic-light label shown to clinicians.
    pub risk_level: &'static str,
    pub required_action: &'static str,
    pub time_line: &'static str,
}

const HIGH: Recommendation = Recommendation {
    risk_level: "Red",
    required_action: "Thank you for completing the questionnaire. Based on the information provided, your pregnancy requires a high level of attention and we recommend that you visit any of our facilities closest to you to continue this survey within the next 24 hours.",
    time_line: "Immediately or within 24 hours",
};

const MEDIUM: Recommendation = Recommendation {
    risk_level: "Yellow",
    required_action: "Thank you for completing the questionnaire. Based on the information provided, your pregnancy requires some level of attention and we recommend that you visit any of our facilities closest to you to continue this survey within the next 2 days.",
    time_line: "Within 2 to 3 days",
};

const LOW: Recommendation = Recommendation {
    risk_level: "Green",
    required_action: "Thank you for completing the questionnaire. Based on the information provided, your pregnancy is at no significant risk however we recommend that you visit any of our facilities closest to you to continue this survey within the next 2 days.",
    time_line: "Within 1 week",
};

pub fn for_band(band: RiskLevel) -> &'static Recommendation {
    match band {
        RiskLevel::High => &HIGH,
        RiskLevel::Medium => &MEDIUM,
        RiskLevel::Low => &LOW,
    }
}
