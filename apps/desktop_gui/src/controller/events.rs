//! Events posted by the backend worker to the UI thread.

use client_core::{AnalysisOutcome, AnalysisTicket};

pub enum UiEvent {
    Info(String),
    BackendUnavailable(String),
    AnalysisFinished {
        ticket: AnalysisTicket,
        outcome: AnalysisOutcome,
    },
}
