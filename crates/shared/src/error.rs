use serde::{Deserialize, Serialize};

/// Body returned by the analysis service alongside a non-success status.
/// Every field is optional: the service may answer with an empty or
/// non-JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceErrorBody {
    /// Lenient parse; anything unreadable yields an empty body.
    pub fn from_bytes(raw: &[u8]) -> Self {
        serde_json::from_slice(raw).unwrap_or_default()
    }

    /// The service-supplied message, ignoring blank strings.
    pub fn message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}
