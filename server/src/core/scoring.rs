//! Attempt scoring rules
//!
//! Pure answer comparison: normalized string matching for multiple choice,
//! numeric equivalence for grid-in responses so that "0.5", " .5" and "1/2"
//! all count as the same value.

use std::collections::HashMap;

use shared::{Question, QuestionKind};

/// Check a submitted answer against a question's correct answer
pub fn answer_matches(question: &Question, given: &str) -> bool {
    match question.kind {
        QuestionKind::MultipleChoice => normalize(given) == normalize(&question.correct_answer),
        QuestionKind::GridIn => match (parse_numeric(given), parse_numeric(&question.correct_answer)) {
            (Some(a), Some(b)) => (a - b).abs() < 1e-9,
            _ => normalize(given) == normalize(&question.correct_answer),
        },
    }
}

/// Count correct answers for a question list
///
/// Unanswered questions count as incorrect.
pub fn score_answers(questions: &[Question], answers: &HashMap<String, String>) -> u32 {
    questions
        .iter()
        .filter(|question| {
            answers
                .get(&question.id)
                .map(|given| answer_matches(question, given))
                .unwrap_or(false)
        })
        .count() as u32
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Parse a grid-in value, accepting decimals and simple fractions
fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if let Some((numerator, denominator)) = trimmed.split_once('/') {
        let numerator: f64 = numerator.trim().parse().ok()?;
        let denominator: f64 = denominator.trim().parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(numerator / denominator);
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Difficulty, Section};

    fn multiple_choice(id: &str, correct: &str) -> Question {
        Question {
            id: id.to_string(),
            kind: QuestionKind::MultipleChoice,
            section: Section::ReadingWriting,
            difficulty: Difficulty::Normal,
            topic: "grammar".to_string(),
            text: "Pick one".to_string(),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct.to_string(),
            explanation: None,
        }
    }

    fn grid_in(id: &str, correct: &str) -> Question {
        Question {
            id: id.to_string(),
            kind: QuestionKind::GridIn,
            section: Section::Math,
            difficulty: Difficulty::Normal,
            topic: "algebra".to_string(),
            text: "Solve".to_string(),
            options: Vec::new(),
            correct_answer: correct.to_string(),
            explanation: None,
        }
    }

    #[test]
    fn test_multiple_choice_ignores_case_and_whitespace() {
        let question = multiple_choice("q-1", "B");
        assert!(answer_matches(&question, "b"));
        assert!(answer_matches(&question, " B "));
        assert!(!answer_matches(&question, "C"));
    }

    #[test]
    fn test_grid_in_numeric_equivalence() {
        let question = grid_in("q-2", "0.5");
        assert!(answer_matches(&question, "0.5"));
        assert!(answer_matches(&question, ".5"));
        assert!(answer_matches(&question, "1/2"));
        assert!(!answer_matches(&question, "0.51"));
    }

    #[test]
    fn test_grid_in_falls_back_to_string_compare() {
        let question = grid_in("q-3", "x+1");
        assert!(answer_matches(&question, " X+1 "));
        assert!(!answer_matches(&question, "x+2"));
    }

    #[test]
    fn test_grid_in_division_by_zero_is_not_a_match() {
        let question = grid_in("q-4", "3");
        assert!(!answer_matches(&question, "3/0"));
    }

    #[test]
    fn test_score_counts_unanswered_as_incorrect() {
        let questions = vec![
            multiple_choice("q-1", "A"),
            multiple_choice("q-2", "B"),
            grid_in("q-3", "12"),
        ];

        let mut answers = HashMap::new();
        answers.insert("q-1".to_string(), "A".to_string());
        answers.insert("q-3".to_string(), "12.0".to_string());
        // q-2 left unanswered

        assert_eq!(score_answers(&questions, &answers), 2);
    }

    #[test]
    fn test_score_ignores_answers_for_unknown_questions() {
        let questions = vec![multiple_choice("q-1", "A")];
        let mut answers = HashMap::new();
        answers.insert("q-1".to_string(), "A".to_string());
        answers.insert("ghost".to_string(), "A".to_string());

        assert_eq!(score_answers(&questions, &answers), 1);
    }
}
