//! Type definitions for the practice server
//!
//! Session bookkeeping and HTTP request/response types that are not service
//! traits.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;
use uuid::Uuid;

use shared::{AttemptId, AttemptSummary, GeneratedTest, TestConfig, TestFlowState, UserId};

/// Identifier for one active test sitting
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One in-flight sitting: the generated test plus its flow position
///
/// Owned by the session registry for the duration of the sitting. The flow
/// state lives here and nowhere else; callers advance it through the registry.
#[derive(Debug, Clone)]
pub struct TestSession {
    pub id: SessionId,
    pub user_id: UserId,
    pub test: GeneratedTest,
    pub flow: TestFlowState,
    pub created_at: Instant,
    pub last_touched: Instant,
}

impl TestSession {
    /// Start a session at the entry state for a freshly generated test
    pub fn begin(user_id: UserId, test: GeneratedTest) -> Self {
        let now = Instant::now();
        Self {
            id: SessionId::new(),
            user_id,
            test,
            flow: TestFlowState::initial(),
            created_at: now,
            last_touched: now,
        }
    }

    pub fn attempt_id(&self) -> AttemptId {
        self.test.id
    }
}

/// Request body for starting a new practice test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeginTestRequest {
    pub user_id: UserId,
    pub config: TestConfig,
}

/// Response for a successfully assembled test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeginTestResponse {
    pub session_id: SessionId,
    pub test: GeneratedTest,
    pub flow: TestFlowState,
}

/// Current flow position of one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub attempt_id: AttemptId,
    pub flow: TestFlowState,
}

impl From<&TestSession> for SessionView {
    fn from(session: &TestSession) -> Self {
        Self {
            session_id: session.id,
            attempt_id: session.attempt_id(),
            flow: session.flow,
        }
    }
}

/// Request body for submitting answers to an attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswersRequest {
    /// Answers keyed by question id
    pub answers: HashMap<String, String>,
    /// Wall-clock seconds the sitting took; derived from the attempt start
    /// time when omitted
    #[serde(default)]
    pub time_taken_seconds: Option<u32>,
}

/// Scored attempt returned after submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptResultResponse {
    pub attempt: AttemptSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_generation() {
        let id1 = SessionId::new();
        let id2 = SessionId::new();
        assert_ne!(id1, id2, "Session IDs should be unique");
    }

    #[test]
    fn test_session_id_round_trip() {
        let id = SessionId::new();
        let parsed = SessionId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_submit_request_deserializes_without_time() {
        let request: SubmitAnswersRequest =
            serde_json::from_str(r#"{"answers": {"q-1": "4"}}"#).unwrap();
        assert_eq!(request.answers.get("q-1").map(String::as_str), Some("4"));
        assert_eq!(request.time_taken_seconds, None);
    }
}
