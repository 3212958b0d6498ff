use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{ApplicantRecord, Attachment, Field, FieldKind, RecordError, Role};
use super::sink::{ApplicationSink, SinkAcknowledgement, SinkError};
use super::submission::{SubmissionPayload, SubmissionReceipt, SubmitError};
use super::validation::{validate_step, FieldErrors, FILE_TOO_LARGE};

/// Largest accepted document, in bytes (10 MiB).
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Screens of the wizard in the order they are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    Welcome,
    Identity,
    RoleSelect,
    RoleQuestions,
    Upload,
    Review,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Welcome,
        Step::Identity,
        Step::RoleSelect,
        Step::RoleQuestions,
        Step::Upload,
        Step::Review,
    ];

    /// Steps shown in the progress indicator (everything after the welcome screen).
    pub const PROGRESS_TOTAL: u8 = 5;

    pub const fn index(self) -> u8 {
        match self {
            Step::Welcome => 0,
            Step::Identity => 1,
            Step::RoleSelect => 2,
            Step::RoleQuestions => 3,
            Step::Upload => 4,
            Step::Review => 5,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Step::ALL.get(usize::from(index)).copied()
    }

    pub const fn next(self) -> Self {
        match self {
            Step::Welcome => Step::Identity,
            Step::Identity => Step::RoleSelect,
            Step::RoleSelect => Step::RoleQuestions,
            Step::RoleQuestions => Step::Upload,
            Step::Upload | Step::Review => Step::Review,
        }
    }

    pub const fn previous(self) -> Self {
        match self {
            Step::Welcome | Step::Identity => Step::Welcome,
            Step::RoleSelect => Step::Identity,
            Step::RoleQuestions => Step::RoleSelect,
            Step::Upload => Step::RoleQuestions,
            Step::Review => Step::Upload,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Step::Welcome => "Welcome",
            Step::Identity => "Personal Info",
            Step::RoleSelect => "Role Selection",
            Step::RoleQuestions => "Role Questions",
            Step::Upload => "Upload Documents",
            Step::Review => "Review & Submit",
        }
    }

    /// Inputs collected on this step; role questions depend on the selected role.
    pub fn fields(self, role: Option<Role>) -> &'static [Field] {
        match self {
            Step::Identity => &Field::IDENTITY,
            Step::RoleSelect => &[Field::Role],
            Step::RoleQuestions => match role {
                Some(role) => role.question_fields(),
                None => &[],
            },
            Step::Upload => &Field::DOCUMENTS,
            Step::Welcome | Step::Review => &[],
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("{step} has {} incomplete field(s)", .errors.len())]
    Incomplete { step: Step, errors: FieldErrors },
    #[error("the application has already been submitted")]
    Closed,
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Result of offering a document to an upload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileIntake {
    Accepted,
    RejectedTooLarge { size: u64, limit: u64 },
}

/// Owned state of one application session: step cursor, collected record, visible
/// field errors, and the submission flags. Rendering never mutates it.
#[derive(Debug, Clone, Default)]
pub struct ApplicationWizard {
    step: Step,
    record: ApplicantRecord,
    errors: FieldErrors,
    submitting: bool,
    submitted: bool,
}

impl ApplicationWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a wizard positioned on `step` around an existing record. Errors start empty.
    pub fn restore(step: Step, record: ApplicantRecord) -> Self {
        Self {
            step,
            record,
            ..Self::default()
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn record(&self) -> &ApplicantRecord {
        &self.record
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Move forward one step when the current step validates.
    pub fn advance(&mut self) -> Result<Step, WizardError> {
        self.ensure_open()?;

        if self.step != Step::Welcome {
            let errors = validate_step(self.step, &self.record);
            self.errors = errors.clone();
            if !errors.is_empty() {
                debug!(step = %self.step, missing = errors.len(), "step incomplete");
                return Err(WizardError::Incomplete {
                    step: self.step,
                    errors,
                });
            }
        }

        let from = self.step;
        self.step = from.next();
        debug!(from = %from, to = %self.step, "advanced");
        Ok(self.step)
    }

    /// Move back one step. Never validates and leaves errors in place.
    pub fn retreat(&mut self) -> Result<Step, WizardError> {
        self.ensure_open()?;
        self.step = self.step.previous();
        Ok(self.step)
    }

    /// Overwrite a text or choice field and drop any stale error for it.
    pub fn update_field(&mut self, field: Field, value: &str) -> Result<(), WizardError> {
        self.ensure_open()?;
        self.record.set_value(field, value)?;
        self.errors.remove(field);
        Ok(())
    }

    /// Offer a document for an upload field. Oversized files are recorded as a field error and
    /// never replace a previously accepted document.
    pub fn select_file(
        &mut self,
        field: Field,
        attachment: Attachment,
    ) -> Result<FileIntake, WizardError> {
        self.ensure_open()?;
        if field.kind() != FieldKind::Document {
            return Err(RecordError::ExpectsText(field).into());
        }

        let size = attachment.size();
        if size > MAX_ATTACHMENT_BYTES {
            debug!(%field, size, "document rejected for size");
            self.errors.insert(field, FILE_TOO_LARGE);
            return Ok(FileIntake::RejectedTooLarge {
                size,
                limit: MAX_ATTACHMENT_BYTES,
            });
        }

        self.errors.remove(field);
        self.record.set_attachment(field, attachment)?;
        Ok(FileIntake::Accepted)
    }

    /// Gate a submission from the review step and mark it in flight.
    pub fn begin_submission(&mut self) -> Result<SubmissionPayload, SubmitError> {
        if self.submitted {
            return Err(SubmitError::AlreadySubmitted);
        }
        if self.step != Step::Review {
            return Err(SubmitError::NotOnReview(self.step));
        }
        if self.submitting {
            return Err(SubmitError::InFlight);
        }

        let errors = validate_step(Step::Upload, &self.record);
        self.errors = errors.clone();
        if !errors.is_empty() {
            return Err(SubmitError::MissingDocuments(errors));
        }

        self.submitting = true;
        Ok(SubmissionPayload::from_record(&self.record))
    }

    /// Settle an in-flight submission. Failures leave step and record untouched.
    pub fn complete_submission(
        &mut self,
        outcome: Result<SinkAcknowledgement, SinkError>,
    ) -> Result<SubmissionReceipt, SubmitError> {
        self.submitting = false;

        match outcome {
            Ok(acknowledgement) => {
                self.submitted = true;
                let receipt = SubmissionReceipt::from(acknowledgement);
                info!(status = receipt.status, "application submitted");
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, "application submission failed");
                Err(SubmitError::Sink(err))
            }
        }
    }

    /// Run the whole submission against a sink for single-owner callers.
    pub async fn submit<K>(&mut self, sink: &K) -> Result<SubmissionReceipt, SubmitError>
    where
        K: ApplicationSink + ?Sized,
    {
        let payload = self.begin_submission()?;
        let outcome = sink.deliver(&payload).await;
        self.complete_submission(outcome)
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.submitted {
            Err(WizardError::Closed)
        } else {
            Ok(())
        }
    }
}
