use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{ApplicantRecord, Attachment, Field, FieldKind};
use super::sink::{SinkAcknowledgement, SinkError};
use super::validation::FieldErrors;
use super::wizard::Step;

/// Body of a single multipart part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartBody {
    Text(String),
    Document(Attachment),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayloadPart {
    pub field: Field,
    pub body: PartBody,
}

impl PayloadPart {
    pub fn name(&self) -> &'static str {
        self.field.name()
    }
}

/// Ordered multipart parts derived from a record. Empty text values are left out entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionPayload {
    parts: Vec<PayloadPart>,
}

impl SubmissionPayload {
    pub fn from_record(record: &ApplicantRecord) -> Self {
        let parts = Field::ALL
            .into_iter()
            .filter_map(|field| {
                let body = if field.kind() == FieldKind::Document {
                    PartBody::Document(record.attachment(field)?.clone())
                } else {
                    let value = record.value(field).filter(|value| !value.is_empty())?;
                    PartBody::Text(value.to_string())
                };
                Some(PayloadPart { field, body })
            })
            .collect();

        Self { parts }
    }

    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn part_names(&self) -> Vec<&'static str> {
        self.parts.iter().map(PayloadPart::name).collect()
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        self.parts.iter().find_map(|part| match &part.body {
            PartBody::Text(value) if part.field == field => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn document(&self, field: Field) -> Option<&Attachment> {
        self.parts.iter().find_map(|part| match &part.body {
            PartBody::Document(attachment) if part.field == field => Some(attachment),
            _ => None,
        })
    }
}

/// Confirmation that the sink accepted the application.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub submitted_at: DateTime<Utc>,
    pub status: u16,
}

impl From<SinkAcknowledgement> for SubmissionReceipt {
    fn from(acknowledgement: SinkAcknowledgement) -> Self {
        Self {
            submitted_at: Utc::now(),
            status: acknowledgement.status,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("submission is only available from the review step (currently on {0})")]
    NotOnReview(Step),
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the application has already been submitted")]
    AlreadySubmitted,
    #[error("required documents are missing")]
    MissingDocuments(FieldErrors),
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl SubmitError {
    /// One-shot notification for the applicant when delivery itself failed.
    pub fn alert(&self) -> Option<&'static str> {
        match self {
            SubmitError::Sink(err) => Some(err.alert_message()),
            _ => None,
        }
    }
}
