use std::sync::Arc;

use tracing::{debug, error, info};

use super::domain::{Attachment, Field};
use super::session::{SessionError, SessionId, SessionStore};
use super::sink::ApplicationSink;
use super::submission::{SubmissionReceipt, SubmitError};
use super::views::{render, WizardView};
use super::wizard::{ApplicationWizard, FileIntake, WizardError};

/// Service composing the session store and the outbound sink.
pub struct IntakeService<S, K> {
    sessions: Arc<S>,
    sink: Arc<K>,
}

impl<S, K> IntakeService<S, K>
where
    S: SessionStore + 'static,
    K: ApplicationSink + 'static,
{
    pub fn new(sessions: Arc<S>, sink: Arc<K>) -> Self {
        Self { sessions, sink }
    }

    /// Start a fresh wizard on the welcome step.
    pub fn open(&self) -> Result<(SessionId, WizardView), IntakeServiceError> {
        let id = SessionId::generate();
        let wizard = ApplicationWizard::new();
        let view = render(&wizard);
        self.sessions.open(id, wizard)?;
        info!(session = %id, "application session opened");
        Ok((id, view))
    }

    pub fn view(&self, id: &SessionId) -> Result<WizardView, IntakeServiceError> {
        let wizard = self
            .sessions
            .fetch(id)?
            .ok_or(SessionError::NotFound(*id))?;
        Ok(render(&wizard))
    }

    pub fn update_field(
        &self,
        id: &SessionId,
        field: Field,
        value: &str,
    ) -> Result<WizardView, IntakeServiceError> {
        let view = self.sessions.with_session(id, |wizard| {
            wizard.update_field(field, value).map(|()| render(wizard))
        })??;
        Ok(view)
    }

    pub fn attach_document(
        &self,
        id: &SessionId,
        field: Field,
        attachment: Attachment,
    ) -> Result<(FileIntake, WizardView), IntakeServiceError> {
        let outcome = self.sessions.with_session(id, |wizard| {
            wizard
                .select_file(field, attachment)
                .map(|intake| (intake, render(wizard)))
        })??;
        Ok(outcome)
    }

    pub fn advance(&self, id: &SessionId) -> Result<WizardView, IntakeServiceError> {
        let view = self
            .sessions
            .with_session(id, |wizard| wizard.advance().map(|_| render(wizard)))??;
        Ok(view)
    }

    pub fn retreat(&self, id: &SessionId) -> Result<WizardView, IntakeServiceError> {
        let view = self
            .sessions
            .with_session(id, |wizard| wizard.retreat().map(|_| render(wizard)))??;
        Ok(view)
    }

    /// Deliver the application. The session is released while the sink is awaited, and
    /// the in-flight flag rejects concurrent attempts on the same session.
    ///
    /// Delivery and settlement run on their own task, so dropping the returned future
    /// still settles the session once the sink answers.
    pub async fn submit(
        &self,
        id: &SessionId,
    ) -> Result<(SubmissionReceipt, WizardView), IntakeServiceError> {
        let payload = self
            .sessions
            .with_session(id, ApplicationWizard::begin_submission)??;
        debug!(session = %id, parts = payload.len(), "delivering application");

        let sessions = Arc::clone(&self.sessions);
        let sink = Arc::clone(&self.sink);
        let session = *id;
        let delivery = tokio::spawn(async move {
            let outcome = sink.deliver(&payload).await;
            sessions.with_session(&session, |wizard| {
                wizard
                    .complete_submission(outcome)
                    .map(|receipt| (receipt, render(wizard)))
            })
        });

        let settled = delivery.await.map_err(|err| {
            error!(session = %id, error = %err, "delivery task aborted");
            SessionError::Unavailable(format!("delivery task aborted: {err}"))
        })??;
        Ok(settled?)
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

impl IntakeServiceError {
    /// One-shot applicant notification for failed deliveries.
    pub fn alert(&self) -> Option<&'static str> {
        match self {
            IntakeServiceError::Submit(err) => err.alert(),
            _ => None,
        }
    }
}
