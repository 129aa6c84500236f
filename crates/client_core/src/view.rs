//! Pure projection from a [`ControllerState`] snapshot to what a front-end
//! draws.

use shared::domain::RiskLevel;

use crate::{
    controller::ControllerState,
    error::{ErrorCategory, ErrorNotice},
};

pub const APP_TITLE: &str = "AI Consumer Advocate";
pub const APP_TAGLINE: &str =
    "Upload a loan agreement or insurance policy to detect hidden risks.";
pub const PICKER_PLACEHOLDER: &str = "Choose PDF Contract";
pub const ANALYZE_LABEL: &str = "Analyze Risk";
pub const ANALYZING_LABEL: &str = "Analyzing...";
pub const EXPLANATION_HEADING: &str = "Why?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTone {
    Low,
    Medium,
    High,
    Neutral,
}

impl From<&RiskLevel> for RiskTone {
    fn from(value: &RiskLevel) -> Self {
        match value {
            RiskLevel::Low => Self::Low,
            RiskLevel::Medium => Self::Medium,
            RiskLevel::High => Self::High,
            RiskLevel::Other(_) => Self::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerView {
    pub enabled: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub category: ErrorCategory,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub score_line: String,
    pub badge: String,
    pub tone: RiskTone,
    pub explanation: String,
    pub filename_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeView {
    Idle,
    Error(ErrorView),
    Result(ResultCard),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerView {
    pub file_label: String,
    pub trigger: TriggerView,
    pub outcome: OutcomeView,
}

pub fn project(state: &ControllerState) -> AnalyzerView {
    let file_label = state
        .selected_file
        .as_ref()
        .map(|file| file.name().to_string())
        .unwrap_or_else(|| PICKER_PLACEHOLDER.to_string());

    let trigger = TriggerView {
        enabled: state.can_analyze(),
        label: if state.loading {
            ANALYZING_LABEL
        } else {
            ANALYZE_LABEL
        },
    };

    // An error always wins over a result.
    let outcome = match (&state.error, &state.result) {
        (Some(ErrorNotice { category, message }), _) => OutcomeView::Error(ErrorView {
            category: *category,
            message: message.clone(),
        }),
        (None, Some(result)) => OutcomeView::Result(ResultCard {
            score_line: format!("Risk Score: {}/100", result.risk_score),
            badge: format!("{} RISK", result.risk_level.badge_label()),
            tone: RiskTone::from(&result.risk_level),
            explanation: result.explanation.clone(),
            filename_line: format!("Analyzed file: {}", result.filename),
        }),
        (None, None) => OutcomeView::Idle,
    };

    AnalyzerView {
        file_label,
        trigger,
        outcome,
    }
}
