//! End-to-end scenarios for the application wizard.
//!
//! Applications travel through the public service facade and router, and are delivered by the
//! real HTTP sink to a throwaway multipart endpoint bound on localhost.

mod common {
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Multipart, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    use job_intake::workflows::application::{
        ApplicationWizard, Attachment, Field, FieldKind, HttpSink, Role, SessionError, SessionId,
        SessionStore, Step,
    };

    #[derive(Debug, Clone)]
    pub struct ReceivedPart {
        pub name: String,
        pub file_name: Option<String>,
        pub content_type: Option<String>,
        pub bytes: Vec<u8>,
    }

    impl ReceivedPart {
        pub fn text(&self) -> String {
            String::from_utf8_lossy(&self.bytes).into_owned()
        }
    }

    #[derive(Debug, Clone, Default)]
    pub struct ReceivedForm {
        pub accept: Option<String>,
        pub parts: Vec<ReceivedPart>,
    }

    impl ReceivedForm {
        pub fn names(&self) -> Vec<&str> {
            self.parts.iter().map(|part| part.name.as_str()).collect()
        }

        pub fn part(&self, name: &str) -> Option<&ReceivedPart> {
            self.parts.iter().find(|part| part.name == name)
        }
    }

    #[derive(Clone, Default)]
    struct Inbox {
        forms: Arc<Mutex<Vec<ReceivedForm>>>,
        reject: bool,
    }

    async fn receive(
        State(inbox): State<Inbox>,
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> (StatusCode, Json<serde_json::Value>) {
        let mut form = ReceivedForm {
            accept: headers
                .get(axum::http::header::ACCEPT)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            parts: Vec::new(),
        };

        while let Some(field) = multipart.next_field().await.expect("multipart field") {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.expect("part bytes").to_vec();
            form.parts.push(ReceivedPart {
                name,
                file_name,
                content_type,
                bytes,
            });
        }

        inbox.forms.lock().expect("inbox mutex poisoned").push(form);

        if inbox.reject {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "Form is closed" })),
            )
        } else {
            (StatusCode::OK, Json(json!({ "ok": true })))
        }
    }

    pub struct FormEndpoint {
        pub addr: SocketAddr,
        forms: Arc<Mutex<Vec<ReceivedForm>>>,
    }

    impl FormEndpoint {
        pub async fn start(reject: bool) -> Self {
            let inbox = Inbox {
                forms: Arc::default(),
                reject,
            };
            let forms = inbox.forms.clone();
            let app = Router::new()
                .route("/f/test-form", post(receive))
                .with_state(inbox);

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind form endpoint");
            let addr = listener.local_addr().expect("local addr");
            tokio::spawn(async move {
                axum::serve(listener, app).await.expect("form endpoint");
            });

            Self { addr, forms }
        }

        pub fn sink(&self) -> HttpSink {
            let url = format!("http://{}/f/test-form", self.addr)
                .parse()
                .expect("endpoint url");
            HttpSink::new(url).expect("http sink")
        }

        pub fn forms(&self) -> Vec<ReceivedForm> {
            self.forms.lock().expect("inbox mutex poisoned").clone()
        }
    }

    /// Sink pointed at a port nobody is listening on.
    pub async fn unreachable_sink() -> HttpSink {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        let url = format!("http://{addr}/f/test-form")
            .parse()
            .expect("endpoint url");
        HttpSink::new(url).expect("http sink")
    }

    pub fn answer_for(field: Field) -> &'static str {
        match field.kind() {
            FieldKind::YesNo => "No",
            FieldKind::Url => "https://portfolio.example.com",
            _ => "Built and taught beginner Python cohorts",
        }
    }

    pub fn completed_wizard(role: Role) -> ApplicationWizard {
        let mut wizard = ApplicationWizard::new();
        wizard.advance().expect("welcome");

        wizard
            .update_field(Field::FullName, "Chidi Nwosu")
            .expect("name");
        wizard
            .update_field(Field::Email, "chidi@example.com")
            .expect("email");
        wizard.update_field(Field::Phone, "08031234567").expect("phone");
        wizard.advance().expect("identity");

        wizard.update_field(Field::Role, role.label()).expect("role");
        wizard.advance().expect("role select");

        for &field in role.question_fields() {
            wizard
                .update_field(field, answer_for(field))
                .expect("answer");
        }
        wizard.advance().expect("role questions");

        wizard
            .select_file(
                Field::CoverLetter,
                Attachment::new("cover.pdf", b"%PDF-1.4 cover".to_vec()),
            )
            .expect("cover");
        wizard
            .select_file(
                Field::Resume,
                Attachment::new("resume.doc", b"resume body".to_vec()),
            )
            .expect("resume");
        wizard.advance().expect("upload");
        assert_eq!(wizard.step(), Step::Review);
        wizard
    }

    #[derive(Default)]
    pub struct MemorySessions {
        sessions: Mutex<HashMap<SessionId, ApplicationWizard>>,
    }

    impl SessionStore for MemorySessions {
        fn open(&self, id: SessionId, wizard: ApplicationWizard) -> Result<(), SessionError> {
            self.sessions
                .lock()
                .expect("session mutex poisoned")
                .insert(id, wizard);
            Ok(())
        }

        fn fetch(&self, id: &SessionId) -> Result<Option<ApplicationWizard>, SessionError> {
            Ok(self
                .sessions
                .lock()
                .expect("session mutex poisoned")
                .get(id)
                .cloned())
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
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::*;
use job_intake::workflows::application::{
    application_router, Field, IntakeService, Role, SinkError, SubmitError, NETWORK_ALERT,
    REJECTED_ALERT,
};
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn completed_application_is_posted_as_multipart() {
    let endpoint = FormEndpoint::start(false).await;
    let sink = endpoint.sink();
    let mut wizard = completed_wizard(Role::ItTutor);

    let receipt = wizard.submit(&sink).await.expect("accepted");

    assert_eq!(receipt.status, 200);
    assert!(wizard.is_submitted());

    let forms = endpoint.forms();
    assert_eq!(forms.len(), 1);
    let form = &forms[0];
    assert_eq!(form.accept.as_deref(), Some("application/json"));
    assert_eq!(
        form.names(),
        vec![
            "fullName",
            "email",
            "phone",
            "role",
            "itExpertise",
            "teachingExperience",
            "explainConcepts",
            "lmsPlatforms",
            "itPortfolioLink",
            "coverLetter",
            "resume",
        ]
    );
    assert_eq!(form.part("role").map(|part| part.text()), Some("IT Tutor".to_string()));

    let cover = form.part("coverLetter").expect("cover part");
    assert_eq!(cover.file_name.as_deref(), Some("cover.pdf"));
    assert_eq!(cover.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(cover.bytes, b"%PDF-1.4 cover");

    let resume = form.part("resume").expect("resume part");
    assert_eq!(resume.file_name.as_deref(), Some("resume.doc"));
    assert_eq!(resume.content_type.as_deref(), Some("application/msword"));
}

#[tokio::test]
async fn yes_no_answers_reach_the_endpoint_in_lowercase() {
    let endpoint = FormEndpoint::start(false).await;
    let mut wizard = completed_wizard(Role::SocialMediaManager);

    wizard.submit(&endpoint.sink()).await.expect("accepted");

    let form = endpoint.forms().remove(0);
    assert_eq!(
        form.part("contentCreation").map(|part| part.text()),
        Some("no".to_string())
    );
    assert!(form.part("itExpertise").is_none());
}

#[tokio::test]
async fn rejected_application_can_be_resubmitted() {
    let closed = FormEndpoint::start(true).await;
    let mut wizard = completed_wizard(Role::CurriculumDesigner);

    let err = wizard
        .submit(&closed.sink())
        .await
        .expect_err("endpoint rejects");

    match &err {
        SubmitError::Sink(SinkError::Rejected { status, detail }) => {
            assert_eq!(*status, 422);
            assert_eq!(detail, &json!({ "error": "Form is closed" }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.alert(), Some(REJECTED_ALERT));
    assert!(!wizard.is_submitted());
    assert!(!wizard.is_submitting());

    let open = FormEndpoint::start(false).await;
    wizard.submit(&open.sink()).await.expect("retry accepted");
    assert!(wizard.is_submitted());
    assert_eq!(closed.forms().len(), 1);
    assert_eq!(open.forms().len(), 1);
}

#[tokio::test]
async fn unreachable_endpoint_reports_a_network_failure() {
    let sink = unreachable_sink().await;
    let mut wizard = completed_wizard(Role::ItTutor);

    let err = wizard.submit(&sink).await.expect_err("nothing listening");

    assert!(matches!(err, SubmitError::Sink(SinkError::Transport(_))));
    assert_eq!(err.alert(), Some(NETWORK_ALERT));
    assert!(!wizard.is_submitted());
}

async fn send(router: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    (status, serde_json::from_slice(&body).expect("json"))
}

fn json_put(uri: String, value: &str) -> Request<Body> {
    Request::put(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "value": value }).to_string()))
        .expect("request")
}

fn empty_post(uri: String) -> Request<Body> {
    Request::post(uri).body(Body::empty()).expect("request")
}

fn upload(uri: String, file_name: &str, content: &[u8]) -> Request<Body> {
    let boundary = "wizard-boundary";
    let mut body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn applicant_completes_the_wizard_over_http() {
    let endpoint = FormEndpoint::start(false).await;
    let service = IntakeService::new(
        Arc::new(MemorySessions::default()),
        Arc::new(endpoint.sink()),
    );
    let router = application_router(Arc::new(service));

    let (status, opened) = send(&router, empty_post("/api/v1/applications".into())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = opened["session_id"].as_str().expect("session id").to_string();
    let base = format!("/api/v1/applications/{id}");

    let (status, view) = send(&router, empty_post(format!("{base}/advance"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["progress"]["label"], "Step 1 of 5: Personal Info");

    for (field, value) in [
        ("fullName", "Chidi Nwosu"),
        ("email", "chidi@example.com"),
        ("phone", "08031234567"),
    ] {
        let (status, _) = send(&router, json_put(format!("{base}/fields/{field}"), value)).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = send(&router, empty_post(format!("{base}/advance"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&router, json_put(format!("{base}/fields/role"), "IT Tutor")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, view) = send(&router, empty_post(format!("{base}/advance"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["fields"].as_array().map(Vec::len), Some(5));

    for &field in Role::ItTutor.question_fields() {
        let (status, _) = send(
            &router,
            json_put(format!("{base}/fields/{field}"), answer_for(field)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, _) = send(&router, empty_post(format!("{base}/advance"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, blocked) = send(&router, empty_post(format!("{base}/advance"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(blocked["errors"]["resume"], "Resume is required");

    for (field, name) in [(Field::CoverLetter, "cover.pdf"), (Field::Resume, "cv.pdf")] {
        let (status, _) = send(
            &router,
            upload(format!("{base}/documents/{field}"), name, b"%PDF-1.4"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, review) = send(&router, empty_post(format!("{base}/advance"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(review["review"]["resume"]["file_name"], "cv.pdf");

    let (status, submitted) = send(&router, empty_post(format!("{base}/submit"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["view"]["submitted"], true);

    let (status, _) = send(&router, empty_post(format!("{base}/submit"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(endpoint.forms().len(), 1);
}
