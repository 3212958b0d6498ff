use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, error};

use super::submission::{PartBody, SubmissionPayload};
use crate::config::SinkConfig;

pub const REJECTED_ALERT: &str = "Something went wrong. Please try again.";
pub const NETWORK_ALERT: &str = "Error submitting form.";

#[derive(Debug, Clone, thiserror::Error)]
pub enum SinkError {
    #[error("sink rejected the submission with status {status}")]
    Rejected { status: u16, detail: Value },
    #[error("network error while submitting: {0}")]
    Transport(String),
    #[error("unable to encode multipart body: {0}")]
    Encoding(String),
    #[error("unable to build HTTP client: {0}")]
    Client(String),
}

impl SinkError {
    pub fn alert_message(&self) -> &'static str {
        match self {
            SinkError::Rejected { .. } => REJECTED_ALERT,
            SinkError::Transport(_) | SinkError::Encoding(_) | SinkError::Client(_) => {
                NETWORK_ALERT
            }
        }
    }
}

/// Successful delivery as reported by the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkAcknowledgement {
    pub status: u16,
}

/// Receiver of completed applications.
#[async_trait]
pub trait ApplicationSink: Send + Sync {
    async fn deliver(&self, payload: &SubmissionPayload)
        -> Result<SinkAcknowledgement, SinkError>;
}

/// Posts applications as `multipart/form-data` to a form-processing endpoint.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: Client,
    endpoint: Url,
}

impl HttpSink {
    pub fn new(endpoint: Url) -> Result<Self, SinkError> {
        let client = Client::builder()
            .build()
            .map_err(|err| SinkError::Client(err.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &SinkConfig) -> Result<Self, SinkError> {
        Self::new(config.endpoint.clone())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_form(payload: &SubmissionPayload) -> Result<Form, SinkError> {
        payload.parts().iter().try_fold(Form::new(), |form, part| {
            let form = match &part.body {
                PartBody::Text(value) => form.text(part.name(), value.clone()),
                PartBody::Document(attachment) => {
                    let file_part = Part::bytes(attachment.bytes.to_vec())
                        .file_name(attachment.file_name.clone())
                        .mime_str(attachment.content_type.as_ref())
                        .map_err(|err| SinkError::Encoding(err.to_string()))?;
                    form.part(part.name(), file_part)
                }
            };
            Ok(form)
        })
    }
}

#[async_trait]
impl ApplicationSink for HttpSink {
    async fn deliver(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SinkAcknowledgement, SinkError> {
        let form = Self::build_form(payload)?;
        debug!(endpoint = %self.endpoint, parts = payload.len(), "posting application");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, "network error while submitting application");
                SinkError::Transport(err.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(SinkAcknowledgement {
                status: status.as_u16(),
            });
        }

        let raw = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<Value>(&raw).unwrap_or(Value::String(raw));
        error!(status = status.as_u16(), detail = %detail, "submission rejected by sink");

        Err(SinkError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}
