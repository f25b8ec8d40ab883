//! Test fixtures for server service tests

use std::collections::HashMap;

use shared::{
    AttemptRecord, Difficulty, Question, QuestionKind, QuestionSet, Section, TestConfig,
    TestLength, TestType, UserId,
};

/// Create a test question in the given section
pub fn create_test_question(id: &str, section: Section, difficulty: Difficulty) -> Question {
    Question {
        id: id.to_string(),
        kind: QuestionKind::MultipleChoice,
        section,
        difficulty,
        topic: "linear-equations".to_string(),
        text: format!("Question {id}"),
        options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
        correct_answer: "A".to_string(),
        explanation: Some("A is correct".to_string()),
    }
}

/// Create a question set with `count` embedded questions
pub fn create_test_question_set(
    id: &str,
    section: Section,
    difficulty: Difficulty,
    count: usize,
) -> QuestionSet {
    QuestionSet {
        id: id.to_string(),
        title: format!("Practice set {id}"),
        difficulty,
        section,
        is_official: false,
        questions: (0..count)
            .map(|i| create_test_question(&format!("{id}-q{i}"), section, difficulty))
            .collect(),
    }
}

/// A small bank covering both sections at every difficulty
pub fn create_test_bank_sets() -> Vec<QuestionSet> {
    let mut sets = Vec::new();
    for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
        for section in [Section::ReadingWriting, Section::Math] {
            let id = format!("{difficulty}-{section}");
            sets.push(create_test_question_set(&id, section, difficulty, 20));
        }
    }
    sets
}

/// Default quick math configuration
pub fn create_test_config() -> TestConfig {
    TestConfig {
        test_type: TestType::Math,
        length: TestLength::Quick,
        difficulty: Difficulty::Normal,
        timer_enabled: false,
    }
}

/// Create a fresh (unscored) attempt for a user
pub fn create_test_attempt(user_id: UserId) -> AttemptRecord {
    AttemptRecord::begin(user_id, create_test_config(), 10)
}

/// Answers map marking the first `correct` of `total` fixture questions right
pub fn create_test_answers(set_id: &str, correct: usize, total: usize) -> HashMap<String, String> {
    (0..total)
        .map(|i| {
            let answer = if i < correct { "A" } else { "B" };
            (format!("{set_id}-q{i}"), answer.to_string())
        })
        .collect()
}
