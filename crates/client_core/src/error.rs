//! Error taxonomy for a single analyze round-trip and the messages users see.

use thiserror::Error;

pub const NO_FILE_SELECTED_MESSAGE: &str = "Please select a file to upload first";
pub const ALREADY_IN_FLIGHT_MESSAGE: &str = "An analysis is already running; wait for it to finish.";
pub const GENERIC_SERVER_ERROR_MESSAGE: &str = "Something went wrong on the server.";
pub const CONNECT_FAILURE_MESSAGE: &str =
    "Failed to connect to the analysis service. Is the backend running?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Server,
    Transport,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("an analysis request is already in flight")]
    AlreadyInFlight,
    #[error("analysis service returned status {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },
    #[error("analysis service returned an unreadable result: {0}")]
    MalformedResponse(String),
    #[error("failed to reach analysis service: {0}")]
    Transport(String),
}

impl AnalyzeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NoFileSelected | Self::AlreadyInFlight => ErrorCategory::Validation,
            Self::Server { .. } | Self::MalformedResponse(_) => ErrorCategory::Server,
            Self::Transport(_) => ErrorCategory::Transport,
        }
    }

    /// Text shown to the user. Transport details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoFileSelected => NO_FILE_SELECTED_MESSAGE.to_string(),
            Self::AlreadyInFlight => ALREADY_IN_FLIGHT_MESSAGE.to_string(),
            Self::Server {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Server { message: None, .. } | Self::MalformedResponse(_) => {
                GENERIC_SERVER_ERROR_MESSAGE.to_string()
            }
            Self::Transport(_) => CONNECT_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for AnalyzeError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value.to_string())
    }
}

/// The last failure as the user sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub category: ErrorCategory,
    pub message: String,
}

impl From<&AnalyzeError> for ErrorNotice {
    fn from(value: &AnalyzeError) -> Self {
        Self {
            category: value.category(),
            message: value.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_shown_verbatim() {
        let err = AnalyzeError::Server {
            status: 400,
            message: Some("Unsupported file type".to_string()),
        };
        assert_eq!(err.user_message(), "Unsupported file type");
        assert_eq!(err.category(), ErrorCategory::Server);
    }

    #[test]
    fn missing_server_message_and_bad_payload_fall_back_to_generic_text() {
        let err = AnalyzeError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_SERVER_ERROR_MESSAGE);
        assert_eq!(
            AnalyzeError::MalformedResponse("expected value".into()).user_message(),
            GENERIC_SERVER_ERROR_MESSAGE
        );
    }

    #[test]
    fn transport_details_are_not_shown_to_user() {
        let err = AnalyzeError::Transport("tcp connect error: Connection refused".into());
        assert_eq!(err.user_message(), CONNECT_FAILURE_MESSAGE);
        assert!(err.to_string().contains("Connection refused"));
    }
}
