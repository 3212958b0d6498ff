use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use super::domain::{Attachment, Field};
use super::service::{IntakeService, IntakeServiceError};
use super::session::{SessionError, SessionId, SessionStore};
use super::sink::ApplicationSink;
use super::submission::SubmitError;
use super::validation::FILE_TOO_LARGE;
use super::views::WizardView;
use super::wizard::{FileIntake, WizardError};
use super::RecordError;

/// Request body cap. Larger than the attachment limit so oversize files still reach the
/// intake check and come back as a field error.
pub const MAX_REQUEST_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub(crate) struct FieldUpdate {
    #[serde(default)]
    pub(crate) value: String,
}

/// Router builder exposing the wizard over HTTP.
pub fn application_router<S, K>(service: Arc<IntakeService<S, K>>) -> Router
where
    S: SessionStore + 'static,
    K: ApplicationSink + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(open_handler::<S, K>))
        .route(
            "/api/v1/applications/:session_id",
            get(view_handler::<S, K>),
        )
        .route(
            "/api/v1/applications/:session_id/fields/:field",
            put(field_handler::<S, K>),
        )
        .route(
            "/api/v1/applications/:session_id/documents/:field",
            post(document_handler::<S, K>),
        )
        .route(
            "/api/v1/applications/:session_id/advance",
            post(advance_handler::<S, K>),
        )
        .route(
            "/api/v1/applications/:session_id/retreat",
            post(retreat_handler::<S, K>),
        )
        .route(
            "/api/v1/applications/:session_id/submit",
            post(submit_handler::<S, K>),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(service)
}

pub(crate) async fn open_handler<S, K>(
    State(service): State<Arc<IntakeService<S, K>>>,
) -> Response
where
    S: SessionStore + 'static,
    K: ApplicationSink + 'static,
{
    match service.open() {
        Ok((session_id, view)) => (
            StatusCode::CREATED,
            axum::Json(json!({ "session_id": session_id, "view": view })),
        )
            .into_response(),
        Err(err) => failure(StatusCode::INTERNAL_SERVER_ERROR, &err, None),
    }
}

pub(crate) async fn view_handler<S, K>(
    State(service): State<Arc<IntakeService<S, K>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    K: ApplicationSink + 'static,
{
    let Some(id) = parse_session(&session_id) else {
        return unknown_session(&session_id);
    };
    match service.view(&id) {
        Ok(view) => view_response(view),
        Err(err) => error_response(&service, &id, err),
    }
}

pub(crate) async fn field_handler<S, K>(
    State(service): State<Arc<IntakeService<S, K>>>,
    Path((session_id, field)): Path<(String, String)>,
    axum::Json(update): axum::Json<FieldUpdate>,
) -> Response
where
    S: SessionStore + 'static,
    K: ApplicationSink + 'static,
{
    let Some(id) = parse_session(&session_id) else {
        return unknown_session(&session_id);
    };
    let field = match field.parse::<Field>() {
        Ok(field) => field,
        Err(err) => return bad_request(err.to_string()),
    };

    match service.update_field(&id, field, &update.value) {
        Ok(view) => view_response(view),
        Err(err) => error_response(&service, &id, err),
    }
}

pub(crate) async fn document_handler<S, K>(
    State(service): State<Arc<IntakeService<S, K>>>,
    Path((session_id, field)): Path<(String, String)>,
    mut multipart: Multipart,
) -> Response
where
    S: SessionStore + 'static,
    K: ApplicationSink + 'static,
{
    let Some(id) = parse_session(&session_id) else {
        return unknown_session(&session_id);
    };
    let field = match field.parse::<Field>() {
        Ok(field) => field,
        Err(err) => return bad_request(err.to_string()),
    };

    let attachment = match read_attachment(&mut multipart).await {
        Ok(Some(attachment)) => attachment,
        Ok(None) => return bad_request("multipart body did not contain a file"),
        Err(message) => return bad_request(message),
    };

    match service.attach_document(&id, field, attachment) {
        Ok((FileIntake::Accepted, view)) => view_response(view),
        Ok((FileIntake::RejectedTooLarge { size, limit }, view)) => {
            let payload = json!({
                "error": FILE_TOO_LARGE,
                "size": size,
                "limit": limit,
                "view": view,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(&service, &id, err),
    }
}

pub(crate) async fn advance_handler<S, K>(
    State(service): State<Arc<IntakeService<S, K>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    K: ApplicationSink + 'static,
{
    let Some(id) = parse_session(&session_id) else {
        return unknown_session(&session_id);
    };
    match service.advance(&id) {
        Ok(view) => view_response(view),
        Err(err) => error_response(&service, &id, err),
    }
}

pub(crate) async fn retreat_handler<S, K>(
    State(service): State<Arc<IntakeService<S, K>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    K: ApplicationSink + 'static,
{
    let Some(id) = parse_session(&session_id) else {
        return unknown_session(&session_id);
    };
    match service.retreat(&id) {
        Ok(view) => view_response(view),
        Err(err) => error_response(&service, &id, err),
    }
}

pub(crate) async fn submit_handler<S, K>(
    State(service): State<Arc<IntakeService<S, K>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: SessionStore + 'static,
    K: ApplicationSink + 'static,
{
    let Some(id) = parse_session(&session_id) else {
        return unknown_session(&session_id);
    };
    match service.submit(&id).await {
        Ok((receipt, view)) => (
            StatusCode::OK,
            axum::Json(json!({ "receipt": receipt, "view": view })),
        )
            .into_response(),
        Err(err) => error_response(&service, &id, err),
    }
}

async fn read_attachment(multipart: &mut Multipart) -> Result<Option<Attachment>, String> {
    let Some(part) = multipart.next_field().await.map_err(|err| err.to_string())? else {
        return Ok(None);
    };

    let file_name = part.file_name().unwrap_or("document").to_string();
    let declared_type = part
        .content_type()
        .and_then(|value| value.parse::<mime::Mime>().ok());
    let bytes = part.bytes().await.map_err(|err| err.to_string())?;

    let mut attachment = Attachment::new(file_name, bytes);
    if let Some(content_type) = declared_type {
        attachment.content_type = content_type;
    }
    Ok(Some(attachment))
}

fn parse_session(raw: &str) -> Option<SessionId> {
    raw.parse().ok()
}

fn view_response(view: WizardView) -> Response {
    (StatusCode::OK, axum::Json(view)).into_response()
}

fn unknown_session(raw: &str) -> Response {
    let payload = json!({
        "error": format!("session {raw} not found"),
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn bad_request(message: impl Into<String>) -> Response {
    let payload = json!({
        "error": message.into(),
    });
    (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
}

fn failure(status: StatusCode, err: &IntakeServiceError, view: Option<WizardView>) -> Response {
    let mut payload = json!({
        "error": err.to_string(),
    });
    if let Some(alert) = err.alert() {
        payload["alert"] = Value::from(alert);
    }
    if let IntakeServiceError::Wizard(WizardError::Incomplete { errors, .. })
    | IntakeServiceError::Submit(SubmitError::MissingDocuments(errors)) = err
    {
        payload["errors"] = json!(errors);
    }
    if let Some(view) = view {
        payload["view"] = json!(view);
    }
    (status, axum::Json(payload)).into_response()
}

fn error_response<S, K>(
    service: &IntakeService<S, K>,
    id: &SessionId,
    err: IntakeServiceError,
) -> Response
where
    S: SessionStore + 'static,
    K: ApplicationSink + 'static,
{
    let status = match &err {
        IntakeServiceError::Session(SessionError::NotFound(_)) => StatusCode::NOT_FOUND,
        IntakeServiceError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        IntakeServiceError::Wizard(WizardError::Incomplete { .. })
        | IntakeServiceError::Submit(SubmitError::MissingDocuments(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        IntakeServiceError::Wizard(WizardError::Closed)
        | IntakeServiceError::Wizard(WizardError::Record(RecordError::InactiveRoleField {
            ..
        }))
        | IntakeServiceError::Submit(
            SubmitError::NotOnReview(_) | SubmitError::InFlight | SubmitError::AlreadySubmitted,
        ) => StatusCode::CONFLICT,
        IntakeServiceError::Wizard(WizardError::Record(_)) => StatusCode::BAD_REQUEST,
        IntakeServiceError::Submit(SubmitError::Sink(_)) => StatusCode::BAD_GATEWAY,
    };

    if status.is_server_error() {
        warn!(session = %id, error = %err, "application request failed");
    }

    let view = match &err {
        IntakeServiceError::Session(_) => None,
        _ => service.view(id).ok(),
    };
    failure(status, &err, view)
}
