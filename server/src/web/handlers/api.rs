//! REST API handlers
//!
//! HTTP endpoints for starting tests, driving the test-flow state machine and
//! submitting answers. Handlers translate typed server errors into coarse
//! status codes; the frontend only ever distinguishes "worked", "not found"
//! and "cannot start test".

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ServerError;
use crate::server_impl::PlatformServer;
use crate::traits::{AttemptStore, QuestionStore};
use crate::types::{BeginTestRequest, BeginTestResponse, SessionId, SessionView, SubmitAnswersRequest};
use shared::{AttemptId, AttemptSummary, UserId};

/// How many attempts the history endpoint returns
const HISTORY_LIMIT: usize = 20;

fn error_status(error: &ServerError) -> StatusCode {
    match error {
        ServerError::SessionNotFound { .. } | ServerError::AttemptNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        ServerError::AttemptAlreadyScored { .. } => StatusCode::CONFLICT,
        ServerError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, ServerError> {
    SessionId::from_string(raw).map_err(|_| ServerError::InvalidRequest {
        details: format!("invalid session id: {raw}"),
    })
}

fn parse_attempt_id(raw: &str) -> Result<AttemptId, ServerError> {
    AttemptId::from_string(raw).map_err(|_| ServerError::InvalidRequest {
        details: format!("invalid attempt id: {raw}"),
    })
}

fn parse_user_id(raw: &str) -> Result<UserId, ServerError> {
    UserId::from_string(raw).map_err(|_| ServerError::InvalidRequest {
        details: format!("invalid user id: {raw}"),
    })
}

/// Start a new practice test - POST /api/tests
///
/// Any assembly failure collapses to one "cannot start test" response.
pub async fn begin_test<Q, A>(
    State(server): State<PlatformServer<Q, A>>,
    Json(request): Json<BeginTestRequest>,
) -> Result<Json<BeginTestResponse>, StatusCode>
where
    Q: QuestionStore + 'static,
    A: AttemptStore + 'static,
{
    match server.begin_test(request.user_id, request.config).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            shared::logging::log_error("Test assembly", &e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get the current flow position of a session - GET /api/sessions/:id
pub async fn get_session<Q, A>(
    Path(session_id): Path<String>,
    State(server): State<PlatformServer<Q, A>>,
) -> Result<Json<SessionView>, StatusCode>
where
    Q: QuestionStore + 'static,
    A: AttemptStore + 'static,
{
    let session_id = parse_session_id(&session_id).map_err(|e| error_status(&e))?;

    match server.state().get_session(&session_id).await {
        Ok(session) => Ok(Json(SessionView::from(&session))),
        Err(e) => Err(error_status(&e)),
    }
}

/// Advance a session's flow state - POST /api/sessions/:id/advance
///
/// Invoked on every module-submitted or break-finished event.
pub async fn advance_session<Q, A>(
    Path(session_id): Path<String>,
    State(server): State<PlatformServer<Q, A>>,
) -> Result<Json<SessionView>, StatusCode>
where
    Q: QuestionStore + 'static,
    A: AttemptStore + 'static,
{
    let session_id = parse_session_id(&session_id).map_err(|e| error_status(&e))?;

    match server.state().advance_session(&session_id).await {
        Ok(_) => {
            let session = server
                .state()
                .get_session(&session_id)
                .await
                .map_err(|e| error_status(&e))?;
            Ok(Json(SessionView::from(&session)))
        }
        Err(e) => Err(error_status(&e)),
    }
}

/// Submit answers for an attempt - POST /api/attempts/:id/submit
pub async fn submit_attempt<Q, A>(
    Path(attempt_id): Path<String>,
    State(server): State<PlatformServer<Q, A>>,
    Json(request): Json<SubmitAnswersRequest>,
) -> Result<Json<Value>, StatusCode>
where
    Q: QuestionStore + 'static,
    A: AttemptStore + 'static,
{
    let attempt_id = parse_attempt_id(&attempt_id).map_err(|e| error_status(&e))?;

    match server.submit_attempt(attempt_id, request).await {
        Ok(result) => Ok(Json(json!({
            "status": "success",
            "attempt": result.attempt
        }))),
        Err(e) => {
            shared::logging::log_error("Attempt submission", &e);
            Err(error_status(&e))
        }
    }
}

/// Recent attempt history for a user - GET /api/users/:id/attempts
pub async fn user_attempts<Q, A>(
    Path(user_id): Path<String>,
    State(server): State<PlatformServer<Q, A>>,
) -> Result<Json<Value>, StatusCode>
where
    Q: QuestionStore + 'static,
    A: AttemptStore + 'static,
{
    let user_id = parse_user_id(&user_id).map_err(|e| error_status(&e))?;

    match server.attempt_store().attempts_for_user(user_id).await {
        Ok(attempts) => {
            let summaries: Vec<AttemptSummary> = attempts
                .iter()
                .take(HISTORY_LIMIT)
                .map(AttemptSummary::from)
                .collect();
            Ok(Json(json!({
                "status": "ok",
                "attempts": summaries
            })))
        }
        Err(e) => Err(error_status(&e)),
    }
}

/// Get server status - GET /api/status
pub async fn get_status<Q, A>(State(server): State<PlatformServer<Q, A>>) -> Json<Value>
where
    Q: QuestionStore + 'static,
    A: AttemptStore + 'static,
{
    Json(json!({
        "status": "running",
        "uptime_seconds": server.state().get_uptime_seconds(),
        "active_sessions": server.state().session_count().await,
        "tests_generated": server.state().get_tests_generated(),
        "question_sets": server.question_store().set_count().await,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Health check endpoint - GET /health
pub async fn health_check<Q, A>(State(server): State<PlatformServer<Q, A>>) -> Json<Value>
where
    Q: QuestionStore + 'static,
    A: AttemptStore + 'static,
{
    Json(json!({
        "status": "healthy",
        "uptime": server.state().get_uptime_seconds(),
        "sessions": server.state().session_count().await
    }))
}
