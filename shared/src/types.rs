//! Core domain types and identifiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for platform users
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for test attempts
///
/// The attempt id doubles as the generated test id: one attempt record is
/// created the moment a test is assembled, and the test carries its id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId(Uuid);

impl AttemptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Question difficulty levels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// One step harder; `Hard` absorbs.
    pub fn step_up(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Hard,
        }
    }

    /// One step easier; `Easy` absorbs.
    pub fn step_down(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Easy,
            Difficulty::Normal => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Normal,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// The two sections of the digital SAT
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    ReadingWriting,
    Math,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::ReadingWriting => write!(f, "reading_writing"),
            Section::Math => write!(f, "math"),
        }
    }
}

/// Question answer formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    GridIn,
}

/// Which section(s) a practice test draws from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    Math,
    ReadingWriting,
    Combined,
}

impl TestType {
    /// Sections covered by this test type
    pub fn sections(self) -> Vec<Section> {
        match self {
            TestType::Math => vec![Section::Math],
            TestType::ReadingWriting => vec![Section::ReadingWriting],
            TestType::Combined => vec![Section::ReadingWriting, Section::Math],
        }
    }

    pub fn is_combined(self) -> bool {
        matches!(self, TestType::Combined)
    }
}

/// User-selectable practice test lengths
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestLength {
    Quick,
    Short,
    Medium,
    Full,
}

impl TestLength {
    /// Number of questions a test of this length targets
    pub fn question_count(self) -> usize {
        match self {
            TestLength::Quick => 10,
            TestLength::Short => 25,
            TestLength::Medium => 50,
            TestLength::Full => 154,
        }
    }
}

/// A single authored question
///
/// Immutable once authored; owned by the question set it is embedded in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub kind: QuestionKind,
    pub section: Section,
    pub difficulty: Difficulty,
    pub topic: String,
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// One stored question-bank document with an embedded question array
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionSet {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub section: Section,
    #[serde(default)]
    pub is_official: bool,
    pub questions: Vec<Question>,
}

/// User-chosen configuration for one practice test
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestConfig {
    pub test_type: TestType,
    pub length: TestLength,
    pub difficulty: Difficulty,
    pub timer_enabled: bool,
}

/// An assembled practice test, created per attempt and discarded after scoring
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedTest {
    pub id: AttemptId,
    pub questions: Vec<Question>,
    pub time_limit_seconds: Option<u32>,
    pub config: TestConfig,
}

/// One instance of a user taking a generated test
///
/// Created write-once by the assembler with empty answers; completed later by
/// scoring, which fills in `correct_count`, `completed_at` and
/// `time_taken_seconds`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub id: AttemptId,
    pub user_id: UserId,
    pub config: TestConfig,
    /// Answers keyed by question id
    pub answers: HashMap<String, String>,
    pub total_questions: u32,
    pub correct_count: Option<u32>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub time_taken_seconds: Option<u32>,
}

impl AttemptRecord {
    /// Create a fresh attempt at test-assembly time
    pub fn begin(user_id: UserId, config: TestConfig, total_questions: u32) -> Self {
        Self {
            id: AttemptId::new(),
            user_id,
            config,
            answers: HashMap::new(),
            total_questions,
            correct_count: None,
            started_at: Utc::now(),
            completed_at: None,
            time_taken_seconds: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Fraction of questions answered correctly, if scored
    pub fn accuracy(&self) -> Option<f64> {
        if self.total_questions == 0 {
            return None;
        }
        self.correct_count
            .map(|c| c as f64 / self.total_questions as f64)
    }

    /// Average seconds spent per question, if timed and scored
    pub fn seconds_per_question(&self) -> Option<f64> {
        if self.total_questions == 0 {
            return None;
        }
        self.time_taken_seconds
            .map(|t| t as f64 / self.total_questions as f64)
    }
}

/// Compact attempt view for dashboards and history endpoints
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub id: AttemptId,
    pub test_type: TestType,
    pub total_questions: u32,
    pub correct_count: Option<u32>,
    pub accuracy: Option<f64>,
    pub seconds_per_question: Option<f64>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&AttemptRecord> for AttemptSummary {
    fn from(record: &AttemptRecord) -> Self {
        Self {
            id: record.id,
            test_type: record.config.test_type,
            total_questions: record.total_questions,
            correct_count: record.correct_count,
            accuracy: record.accuracy(),
            seconds_per_question: record.seconds_per_question(),
            started_at: record.started_at,
            completed_at: record.completed_at,
        }
    }
}
