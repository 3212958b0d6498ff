//! Multi-step job application wizard.
//!
//! An [`ApplicationWizard`] walks an applicant from the welcome screen through identity,
//! role selection, role-specific questions and document upload to a review screen, then
//! hands the collected [`ApplicantRecord`] to an [`ApplicationSink`] as a multipart payload.
//! Step validation is pure and only ever runs on forward navigation or submission.
//! [`IntakeService`] and [`application_router`] host many wizards behind a [`SessionStore`].

pub mod domain;
pub mod router;
pub mod service;
pub mod session;
pub mod sink;
pub mod submission;
pub mod validation;
pub mod views;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantRecord, Attachment, CurriculumAnswers, Field, FieldKind, Identity, ItTutorAnswers,
    RecordError, Role, RoleAnswers, SocialMediaAnswers, UnknownField, YesNo, ACCEPTED_EXTENSIONS,
};
pub use router::{application_router, MAX_REQUEST_BYTES};
pub use service::{IntakeService, IntakeServiceError};
pub use session::{SessionError, SessionId, SessionStore};
pub use sink::{
    ApplicationSink, HttpSink, SinkAcknowledgement, SinkError, NETWORK_ALERT, REJECTED_ALERT,
};
pub use submission::{PartBody, PayloadPart, SubmissionPayload, SubmissionReceipt, SubmitError};
pub use validation::{validate_step, FieldErrors};
pub use views::{render, WizardView};
pub use wizard::{ApplicationWizard, FileIntake, Step, WizardError, MAX_ATTACHMENT_BYTES};
