//! Main server implementation
//!
//! The `PlatformServer` struct wires the assembler, the session registry and
//! the stores together with dependency injection, and exposes the axum
//! router over them.

use axum::{
    routing::{get, post},
    Router,
};
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::core::{scoring, TestAssembler};
use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use crate::traits::{AttemptStore, QuestionStore};
use crate::types::{
    AttemptResultResponse, BeginTestResponse, SubmitAnswersRequest, TestSession,
};
use crate::web::handlers::api;
use shared::{AttemptId, AttemptSummary, TestConfig, UserId};

/// How often the background sweep removes abandoned sessions
const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Idle sittings older than this are dropped by the sweep
const SESSION_MAX_IDLE: Duration = Duration::from_secs(6 * 3600);

/// Main practice server with dependency injection
pub struct PlatformServer<Q, A>
where
    Q: QuestionStore,
    A: AttemptStore,
{
    state: Arc<ServerState>,
    assembler: Arc<TestAssembler<Q, A>>,
    question_store: Arc<Q>,
    attempt_store: Arc<A>,
}

impl<Q, A> Clone for PlatformServer<Q, A>
where
    Q: QuestionStore,
    A: AttemptStore,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            assembler: self.assembler.clone(),
            question_store: self.question_store.clone(),
            attempt_store: self.attempt_store.clone(),
        }
    }
}

impl<Q, A> PlatformServer<Q, A>
where
    Q: QuestionStore + 'static,
    A: AttemptStore + 'static,
{
    /// Create a new server with injected stores
    pub fn new(state: ServerState, question_store: Q, attempt_store: A) -> Self {
        let question_store = Arc::new(question_store);
        let attempt_store = Arc::new(attempt_store);
        let assembler = Arc::new(TestAssembler::new(
            question_store.clone(),
            attempt_store.clone(),
        ));

        Self {
            state: Arc::new(state),
            assembler,
            question_store,
            attempt_store,
        }
    }

    /// Server state for handlers and tests
    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }

    pub fn question_store(&self) -> &Arc<Q> {
        &self.question_store
    }

    pub fn attempt_store(&self) -> &Arc<A> {
        &self.attempt_store
    }

    /// Assemble a test and open a session for it
    ///
    /// The session starts at the flow entry state; the attempt record is
    /// already created by the assembler.
    pub async fn begin_test(
        &self,
        user_id: UserId,
        config: TestConfig,
    ) -> ServerResult<BeginTestResponse> {
        let test = self.assembler.generate_test(user_id, config).await?;
        let session = TestSession::begin(user_id, test.clone());
        let session_id = session.id;
        let flow = session.flow;

        self.state.insert_session(session).await;
        self.state.increment_tests_generated();

        Ok(BeginTestResponse {
            session_id,
            test,
            flow,
        })
    }

    /// Score submitted answers and complete the attempt
    pub async fn submit_attempt(
        &self,
        attempt_id: AttemptId,
        request: SubmitAnswersRequest,
    ) -> ServerResult<AttemptResultResponse> {
        let attempt = self.attempt_store.get_attempt(attempt_id).await?;
        if attempt.is_completed() {
            return Err(ServerError::AttemptAlreadyScored {
                attempt_id: attempt_id.to_string(),
            });
        }

        // The session owns the generated questions needed for scoring.
        let session = self
            .state
            .find_session_by_attempt(attempt_id)
            .await
            .ok_or(ServerError::SessionNotFound {
                session_id: attempt_id.to_string(),
            })?;

        let correct_count = scoring::score_answers(&session.test.questions, &request.answers);
        let time_taken_seconds = request.time_taken_seconds.unwrap_or_else(|| {
            (Utc::now() - attempt.started_at).num_seconds().max(0) as u32
        });

        let completed = self
            .attempt_store
            .complete_attempt(attempt_id, request.answers, correct_count, time_taken_seconds)
            .await?;

        // The session has served its purpose once the attempt is scored.
        self.state.remove_session(&session.id).await;

        shared::logging::log_success(&format!(
            "Scored attempt {}: {}/{}",
            attempt_id, correct_count, completed.total_questions
        ));

        Ok(AttemptResultResponse {
            attempt: AttemptSummary::from(&completed),
        })
    }

    /// Build the axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Test lifecycle
            .route("/api/tests", post(api::begin_test::<Q, A>))
            .route("/api/sessions/:id", get(api::get_session::<Q, A>))
            .route("/api/sessions/:id/advance", post(api::advance_session::<Q, A>))
            .route("/api/attempts/:id/submit", post(api::submit_attempt::<Q, A>))
            .route("/api/users/:id/attempts", get(api::user_attempts::<Q, A>))
            // Observability
            .route("/api/status", get(api::get_status::<Q, A>))
            .route("/health", get(api::health_check::<Q, A>))
            .layer(
                ServiceBuilder::new()
                    .layer(CorsLayer::permissive()) // Allow CORS for development
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Start the server and run until shutdown
    pub async fn run(&self, addr: SocketAddr) -> ServerResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            ServerError::ServerStartup(format!("Failed to bind to {addr}: {e}"))
        })?;

        tracing::info!("🌐 Practice server listening on http://{addr}");

        // Background sweep for abandoned sittings
        let cleanup_task = {
            let state = self.state.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
                loop {
                    interval.tick().await;
                    state.cleanup_stale_sessions(SESSION_MAX_IDLE).await;
                }
            })
        };

        let server_task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Server error: {e}");
            }
        });

        tokio::select! {
            _ = server_task => {
                tracing::info!("HTTP server task completed");
            },
            _ = tokio::signal::ctrl_c() => {
                shared::logging::log_shutdown("Received Ctrl+C signal");
                self.state.set_running(false);
            }
        }

        cleanup_task.abort();
        Ok(())
    }
}
