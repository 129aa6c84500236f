//! Upload/analyze state machine.
//!
//! The controller performs no I/O of its own. Front-ends either await
//! [`AnalyzeController::analyze`] or drive the two halves
//! ([`AnalyzeController::begin_analysis`] and
//! [`AnalyzeController::complete_analysis`]) across their own event loop.

use shared::protocol::AnalysisResult;
use tracing::{error, info, warn};

use crate::{
    document::SelectedFile,
    error::{AnalyzeError, ErrorNotice},
    AnalysisService,
};

/// Immutable snapshot of everything a view needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub selected_file: Option<SelectedFile>,
    pub result: Option<AnalysisResult>,
    pub error: Option<ErrorNotice>,
    pub loading: bool,
}

impl ControllerState {
    pub fn can_analyze(&self) -> bool {
        !self.loading && self.selected_file.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|notice| notice.message.as_str())
    }
}

/// Identifies one analyze invocation so its completion can be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnalysisTicket(u64);

/// Work handed to whoever performs the upload.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    pub ticket: AnalysisTicket,
    pub file: SelectedFile,
}

pub type AnalysisOutcome = Result<AnalysisResult, AnalyzeError>;

#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: AnalysisTicket,
    selection: u64,
}

#[derive(Debug, Default)]
pub struct AnalyzeController {
    state: ControllerState,
    selection: u64,
    next_ticket: u64,
    in_flight: Option<InFlight>,
}

impl AnalyzeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn snapshot(&self) -> ControllerState {
        self.state.clone()
    }

    /// Replaces the selection and clears the last outcome. `None` (a
    /// dismissed picker) leaves everything as it was.
    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        let Some(file) = file else {
            return;
        };

        if !file.looks_like_pdf() {
            warn!(filename = file.name(), "selected file does not have a .pdf extension");
        }
        info!(
            filename = file.name(),
            size_bytes = file.size_bytes(),
            "file selected"
        );

        self.selection = self.selection.wrapping_add(1);
        self.state.selected_file = Some(file);
        self.state.result = None;
        self.state.error = None;
    }

    /// Validates the preconditions and marks the request as in flight.
    pub fn begin_analysis(&mut self) -> Result<PendingAnalysis, AnalyzeError> {
        if self.state.loading {
            return Err(AnalyzeError::AlreadyInFlight);
        }

        let Some(file) = self.state.selected_file.clone() else {
            let err = AnalyzeError::NoFileSelected;
            self.state.error = Some(ErrorNotice::from(&err));
            return Err(err);
        };

        self.next_ticket = self.next_ticket.wrapping_add(1);
        let ticket = AnalysisTicket(self.next_ticket);
        self.in_flight = Some(InFlight {
            ticket,
            selection: self.selection,
        });
        self.state.loading = true;
        self.state.error = None;

        info!(filename = file.name(), ticket = ticket.0, "analysis started");
        Ok(PendingAnalysis { ticket, file })
    }

    /// Applies the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` when the outcome was not applied: either the ticket is
    /// unknown, or the user picked another file while the request ran. In the
    /// latter case the request is still considered finished.
    pub fn complete_analysis(&mut self, ticket: AnalysisTicket, outcome: AnalysisOutcome) -> bool {
        let Some(in_flight) = self.in_flight.filter(|in_flight| in_flight.ticket == ticket) else {
            warn!(ticket = ticket.0, "ignoring completion for unknown analysis");
            return false;
        };

        self.in_flight = None;
        self.state.loading = false;

        if in_flight.selection != self.selection {
            warn!(
                ticket = ticket.0,
                "discarding analysis outcome for a file that is no longer selected"
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                info!(
                    ticket = ticket.0,
                    filename = %result.filename,
                    risk_score = result.risk_score.value(),
                    risk_level = %result.risk_level,
                    "analysis finished"
                );
                self.state.result = Some(result);
                self.state.error = None;
            }
            Err(err) => {
                match &err {
                    AnalyzeError::Transport(detail) => {
                        error!(ticket = ticket.0, "analysis request failed: {detail}");
                    }
                    other => warn!(ticket = ticket.0, "analysis rejected: {other}"),
                }
                self.state.result = None;
                self.state.error = Some(ErrorNotice::from(&err));
            }
        }
        true
    }

    /// Runs one full analyze round-trip against `service`.
    pub async fn analyze<S>(&mut self, service: &S) -> AnalysisOutcome
    where
        S: AnalysisService + ?Sized,
    {
        let pending = self.begin_analysis()?;
        let outcome = service.analyze(&pending.file).await;
        self.complete_analysis(pending.ticket, outcome.clone());
        outcome
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
