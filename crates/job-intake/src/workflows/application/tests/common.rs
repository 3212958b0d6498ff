use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;
use tokio::sync::Notify;

use crate::workflows::application::{
    application_router, ApplicationSink, ApplicationWizard, Attachment, Field, FieldKind,
    IntakeService, Role, SessionError, SessionId, SessionStore, SinkAcknowledgement, SinkError,
    Step, SubmissionPayload,
};

pub(super) const PORTFOLIO: &str = "https://portfolio.example.com/work";

pub(super) fn document(name: &str, size: usize) -> Attachment {
    Attachment::new(name, vec![b'%'; size])
}

pub(super) fn fill_identity(wizard: &mut ApplicationWizard) {
    wizard
        .update_field(Field::FullName, "Ada Okafor")
        .expect("full name");
    wizard
        .update_field(Field::Email, "ada@example.com")
        .expect("email");
    wizard
        .update_field(Field::Phone, "+2348012345678")
        .expect("phone");
}

pub(super) fn answer_for(field: Field) -> &'static str {
    match field.kind() {
        FieldKind::YesNo => "yes",
        FieldKind::Url => PORTFOLIO,
        _ => "Four years running community pages",
    }
}

pub(super) fn fill_role_questions(wizard: &mut ApplicationWizard, role: Role) {
    for &field in role.question_fields() {
        wizard
            .update_field(field, answer_for(field))
            .expect("role answer");
    }
}

pub(super) fn attach_documents(wizard: &mut ApplicationWizard) {
    wizard
        .select_file(Field::CoverLetter, document("cover-letter.pdf", 2048))
        .expect("cover letter");
    wizard
        .select_file(Field::Resume, document("resume.docx", 4096))
        .expect("resume");
}

/// Drive a wizard forward until it rests on `target`, filling whatever each step needs.
pub(super) fn wizard_at(target: Step, role: Role) -> ApplicationWizard {
    let mut wizard = ApplicationWizard::new();
    while wizard.step() < target {
        match wizard.step() {
            Step::Identity => fill_identity(&mut wizard),
            Step::RoleSelect => wizard
                .update_field(Field::Role, role.label())
                .expect("role"),
            Step::RoleQuestions => fill_role_questions(&mut wizard, role),
            Step::Upload => attach_documents(&mut wizard),
            Step::Welcome | Step::Review => {}
        }
        wizard.advance().expect("step completes");
    }
    wizard
}

#[derive(Default, Clone)]
pub(super) struct MemorySessions {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, ApplicationWizard>>>,
}

impl MemorySessions {
    pub(super) fn insert(&self, wizard: ApplicationWizard) -> SessionId {
        let id = SessionId::generate();
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .insert(id, wizard);
        id
    }

    pub(super) fn snapshot(&self, id: &SessionId) -> ApplicationWizard {
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .get(id)
            .cloned()
            .expect("session exists")
    }
}

impl SessionStore for MemorySessions {
    fn open(&self, id: SessionId, wizard: ApplicationWizard) -> Result<(), SessionError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        if guard.contains_key(&id) {
            return Err(SessionError::Conflict(id));
        }
        guard.insert(id, wizard);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<ApplicationWizard>, SessionError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn with_session<T, F>(&self, id: &SessionId, apply: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut ApplicationWizard) -> T,
    {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        let wizard = guard.get_mut(id).ok_or(SessionError::NotFound(*id))?;
        Ok(apply(wizard))
    }
}

pub(super) struct UnavailableSessions;

impl SessionStore for UnavailableSessions {
    fn open(&self, _id: SessionId, _wizard: ApplicationWizard) -> Result<(), SessionError> {
        Err(SessionError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<ApplicationWizard>, SessionError> {
        Err(SessionError::Unavailable("store offline".to_string()))
    }

    fn with_session<T, F>(&self, _id: &SessionId, _apply: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut ApplicationWizard) -> T,
    {
        Err(SessionError::Unavailable("store offline".to_string()))
    }
}

/// Sink that records every payload and answers with a fixed outcome.
#[derive(Default)]
pub(super) struct RecordingSink {
    deliveries: Mutex<Vec<SubmissionPayload>>,
    failure: Option<SinkError>,
}

impl RecordingSink {
    pub(super) fn failing(error: SinkError) -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    pub(super) fn deliveries(&self) -> Vec<SubmissionPayload> {
        self.deliveries
            .lock()
            .expect("sink mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl ApplicationSink for RecordingSink {
    async fn deliver(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SinkAcknowledgement, SinkError> {
        self.deliveries
            .lock()
            .expect("sink mutex poisoned")
            .push(payload.clone());
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(SinkAcknowledgement { status: 200 }),
        }
    }
}

/// Sink that holds every delivery until the test releases it.
#[derive(Default)]
pub(super) struct HeldSink {
    release: Notify,
    delivered: AtomicUsize,
    failure: Option<SinkError>,
}

impl HeldSink {
    pub(super) fn failing(error: SinkError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub(super) fn release(&self) {
        self.release.notify_one();
    }

    pub(super) fn delivered(&self) -> usize {
        self.delivered.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApplicationSink for HeldSink {
    async fn deliver(
        &self,
        _payload: &SubmissionPayload,
    ) -> Result<SinkAcknowledgement, SinkError> {
        self.release.notified().await;
        self.delivered.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(SinkAcknowledgement { status: 200 }),
        }
    }
}

pub(super) fn rejected() -> SinkError {
    SinkError::Rejected {
        status: 422,
        detail: serde_json::json!({ "error": "form rejected" }),
    }
}

pub(super) fn build_service(
    sink: RecordingSink,
) -> (
    IntakeService<MemorySessions, RecordingSink>,
    Arc<MemorySessions>,
    Arc<RecordingSink>,
) {
    let sessions = Arc::new(MemorySessions::default());
    let sink = Arc::new(sink);
    let service = IntakeService::new(sessions.clone(), sink.clone());
    (service, sessions, sink)
}

pub(super) fn router_with_service(
    service: IntakeService<MemorySessions, RecordingSink>,
) -> axum::Router {
    application_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
