use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::response::ResponseValue;
use crate::error::CoreError;

/// Risk classification of a single sub-question (a tier) or of a whole
/// submission (a band).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Numeric weight used when summing groups into a band.
    pub fn weight(self) -> u32 {
        match self {
            Self::High => 7,
            Self::Medium => 1,
            Self::Low => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Band for a summed risk value: 0 is low, 1 to 6 medium, 7 and up high.
    pub fn band_for(total: u32) -> Self {
        match total {
            0 => Self::Low,
            1..=6 => Self::Medium,
            _ => Self::High,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(CoreError::InvalidRiskLevel(other.to_string())),
        }
    }
}

/// Channel a submission arrived through. Each platform has its own catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Platform {
    Web,
    Ussd,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Ussd => "ussd",
        }
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "web" => Ok(Self::Web),
            "ussd" => Ok(Self::Ussd),
            other => Err(CoreError::InvalidPlatform(other.to_string())),
        }
    }
}

/// Per-sub-question line of a group breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionBreakdown {
    pub number: String,
    pub response: ResponseValue,
    pub risk_value: u32,
}

/// Scored result of one question group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupBreakdown {
    pub id: u32,
    pub risk_value: u32,
    pub questions: Vec<QuestionBreakdown>,
}

/// The persisted outcome of one completed submission. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub risk_level: RiskLevel,
    pub risk_value: u32,
    pub platform: Platform,
    pub patient_response: Vec<GroupBreakdown>,
    pub recommendation: String,
    pub created_at: jiff::Timestamp,
}
