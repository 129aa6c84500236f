use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    error::ServiceErrorBody,
    protocol::{AnalysisResult, FILE_FIELD, PDF_MIME_TYPE},
};
use tracing::{debug, info};
use url::Url;

pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod view;

pub use config::{load_settings, Settings};
pub use controller::{
    AnalysisOutcome, AnalysisTicket, AnalyzeController, ControllerState, PendingAnalysis,
};
pub use document::SelectedFile;
pub use error::{AnalyzeError, ErrorCategory, ErrorNotice};

/// Remote service that turns a contract into a risk verdict.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, AnalyzeError>;
}

pub struct HttpAnalysisClient {
    http: Client,
    endpoint: Url,
}

impl HttpAnalysisClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let endpoint = settings.analyze_endpoint()?;
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn upload_form(file: &SelectedFile) -> Result<Form, AnalyzeError> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(PDF_MIME_TYPE)?;
        Ok(Form::new().part(FILE_FIELD, part))
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, AnalyzeError> {
        info!(
            endpoint = %self.endpoint,
            filename = file.name(),
            size_bytes = file.size_bytes(),
            "uploading document for analysis"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(Self::upload_form(file)?)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), body_len = body.len(), "analysis response received");

        if status.is_success() {
            serde_json::from_slice::<AnalysisResult>(&body)
                .map_err(|err| AnalyzeError::MalformedResponse(err.to_string()))
        } else {
            Err(AnalyzeError::Server {
                status: status.as_u16(),
                message: ServiceErrorBody::from_bytes(&body)
                    .message()
                    .map(str::to_string),
            })
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
