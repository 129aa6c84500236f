use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_RISK_SCORE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("risk score {0} is outside 0..={MAX_RISK_SCORE}")]
    ScoreOutOfRange(i64),
}

/// Estimated contractual risk, 0 (benign) to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct RiskScore(u8);

impl RiskScore {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        Self::try_from(i64::from(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for RiskScore {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(score) if score <= MAX_RISK_SCORE => Ok(Self(score)),
            _ => Err(DomainError::ScoreOutOfRange(value)),
        }
    }
}

impl From<RiskScore> for u8 {
    fn from(value: RiskScore) -> Self {
        value.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category label attached to a score. The service is not consistent about
/// casing, so parsing ignores it; unrecognised labels are kept as sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Other(String),
}

impl RiskLevel {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Other(label) => label,
        }
    }

    /// Upper-cased label used for badges.
    pub fn badge_label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl From<String> for RiskLevel {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<RiskLevel> for String {
    fn from(value: RiskLevel) -> Self {
        match value {
            RiskLevel::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_parsing_ignores_case_and_whitespace() {
        assert_eq!(RiskLevel::parse("High"), RiskLevel::High);
        assert_eq!(RiskLevel::parse(" medium "), RiskLevel::Medium);
        assert_eq!(RiskLevel::parse("LOW"), RiskLevel::Low);
    }

    #[test]
    fn unknown_risk_level_is_preserved_and_upper_cased_for_badges() {
        let level = RiskLevel::parse("Severe");
        assert_eq!(level, RiskLevel::Other("Severe".to_string()));
        assert_eq!(level.badge_label(), "SEVERE");
    }

    #[test]
    fn risk_score_rejects_values_outside_range() {
        assert!(RiskScore::try_from(100).is_ok());
        assert!(RiskScore::try_from(0).is_ok());
        assert_eq!(
            RiskScore::try_from(101),
            Err(DomainError::ScoreOutOfRange(101))
        );
        assert_eq!(
            RiskScore::try_from(-3),
            Err(DomainError::ScoreOutOfRange(-3))
        );
    }

    #[test]
    fn risk_score_deserializes_from_json_integer() {
        let score: RiskScore = serde_json::from_str("72").expect("score");
        assert_eq!(score.value(), 72);
        assert!(serde_json::from_str::<RiskScore>("250").is_err());
    }
}
