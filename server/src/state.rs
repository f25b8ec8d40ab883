//! Server state management
//!
//! Holds the session registry (every in-flight sitting) and server-level
//! counters shared across handlers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::error::{ServerError, ServerResult};
use crate::types::{SessionId, TestSession};
use shared::{AttemptId, TestFlowState};

/// Core server state
#[derive(Debug)]
pub struct ServerState {
    /// Active sittings keyed by session id
    pub sessions: Arc<RwLock<HashMap<SessionId, TestSession>>>,

    // Server state
    pub is_running: Arc<AtomicBool>,
    pub tests_generated: Arc<AtomicU32>,
    pub server_start_time: Instant,
}

impl ServerState {
    /// Create a new server state
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            is_running: Arc::new(AtomicBool::new(true)),
            tests_generated: Arc::new(AtomicU32::new(0)),
            server_start_time: Instant::now(),
        }
    }

    /// Check if the server is running
    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Set running state
    pub fn set_running(&self, running: bool) {
        self.is_running.store(running, Ordering::Relaxed);
    }

    /// Get server uptime in seconds
    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }

    /// Count of tests generated since startup
    pub fn get_tests_generated(&self) -> u32 {
        self.tests_generated.load(Ordering::Relaxed)
    }

    /// Record one more generated test
    pub fn increment_tests_generated(&self) -> u32 {
        self.tests_generated.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Register a new sitting
    pub async fn insert_session(&self, session: TestSession) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session);
    }

    /// Look up a session by id
    pub async fn get_session(&self, session_id: &SessionId) -> ServerResult<TestSession> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .cloned()
            .ok_or(ServerError::SessionNotFound {
                session_id: session_id.to_string(),
            })
    }

    /// Advance a session's flow state and return the new position
    pub async fn advance_session(&self, session_id: &SessionId) -> ServerResult<TestFlowState> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or(ServerError::SessionNotFound {
                session_id: session_id.to_string(),
            })?;
        session.flow = session.flow.advance();
        session.last_touched = Instant::now();
        Ok(session.flow)
    }

    /// Find the session owning a given attempt, if any
    pub async fn find_session_by_attempt(&self, attempt_id: AttemptId) -> Option<TestSession> {
        let sessions = self.sessions.read().await;
        sessions
            .values()
            .find(|s| s.attempt_id() == attempt_id)
            .cloned()
    }

    /// Count of active sessions
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    /// Remove a session, typically once its attempt has been scored
    pub async fn remove_session(&self, session_id: &SessionId) -> Option<TestSession> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id)
    }

    /// Remove sittings idle longer than `max_idle`
    ///
    /// A completed flow alone is not grounds for removal: the session still
    /// holds the generated questions submission needs, and scoring removes it.
    /// The sweep only expires abandoned sittings. Returns the number removed.
    pub async fn cleanup_stale_sessions(&self, max_idle: Duration) -> u32 {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        let before = sessions.len();

        sessions.retain(|_, session| now.duration_since(session.last_touched) <= max_idle);

        let removed = (before - sessions.len()) as u32;
        if removed > 0 {
            tracing::info!("🧹 Cleaned up {} stale sessions", removed);
        }
        removed
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
