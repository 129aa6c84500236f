//! Backend commands queued from UI to backend worker.

use client_core::PendingAnalysis;

pub enum BackendCommand {
    Analyze(PendingAnalysis),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Analyze(_) => "analyze",
        }
    }
}
