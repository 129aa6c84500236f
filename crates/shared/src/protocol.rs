use serde::{Deserialize, Serialize};

use crate::domain::{RiskLevel, RiskScore};

/// Path of the analysis endpoint, relative to the service base URL.
pub const ANALYZE_PATH: &str = "/api/analyze";
/// Multipart field carrying the uploaded document.
pub const FILE_FIELD: &str = "file";
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Verdict returned by a successful analysis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub risk_score: RiskScore,
    pub risk_level: RiskLevel,
    pub explanation: String,
    pub filename: String,
}
