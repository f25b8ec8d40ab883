//! Test-flow state machine for the four-module digital SAT
//!
//! One sitting runs two Reading & Writing modules, a break, then two Math
//! modules. The sequence is fixed by the official test format and is not
//! configurable at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Section;

/// Screen-level phase within one sitting
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Start,
    Directions,
    Test,
    Review,
    Break,
    Complete,
}

/// Module position within a section
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleNumber {
    One,
    Two,
}

/// Position within one sitting of the four-module adaptive SAT
///
/// Held in memory by the session controller for the duration of a sitting;
/// never persisted. Phases advance along a fixed total order with no
/// back-edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFlowState {
    pub phase: Phase,
    pub section: Section,
    pub module: ModuleNumber,
}

impl TestFlowState {
    /// Entry point for a fresh sitting
    pub fn initial() -> Self {
        Self {
            phase: Phase::Start,
            section: Section::ReadingWriting,
            module: ModuleNumber::One,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Advance to the next state in the fixed module sequence
    ///
    /// Pure and total. `Complete` is terminal and absorbs; every other state
    /// has exactly one successor. The break is pre-set to Math module 1 since
    /// it always precedes the Math section.
    pub fn advance(self) -> Self {
        match (self.phase, self.section, self.module) {
            (Phase::Start, _, _) => Self {
                phase: Phase::Directions,
                section: Section::ReadingWriting,
                module: ModuleNumber::One,
            },
            (Phase::Directions, section, module) => Self {
                phase: Phase::Test,
                section,
                module,
            },
            (Phase::Test, section, module) => Self {
                phase: Phase::Review,
                section,
                module,
            },
            (Phase::Review, Section::ReadingWriting, ModuleNumber::One) => Self {
                phase: Phase::Directions,
                section: Section::ReadingWriting,
                module: ModuleNumber::Two,
            },
            (Phase::Review, Section::ReadingWriting, ModuleNumber::Two) => Self {
                phase: Phase::Break,
                section: Section::Math,
                module: ModuleNumber::One,
            },
            (Phase::Review, Section::Math, ModuleNumber::One) => Self {
                phase: Phase::Directions,
                section: Section::Math,
                module: ModuleNumber::Two,
            },
            (Phase::Review, Section::Math, ModuleNumber::Two) => Self {
                phase: Phase::Complete,
                section: Section::Math,
                module: ModuleNumber::Two,
            },
            (Phase::Break, _, _) => Self {
                phase: Phase::Directions,
                section: Section::Math,
                module: ModuleNumber::One,
            },
            (Phase::Complete, _, _) => self,
        }
    }
}

impl fmt::Display for TestFlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self.phase {
            Phase::Start => "start",
            Phase::Directions => "directions",
            Phase::Test => "test",
            Phase::Review => "review",
            Phase::Break => "break",
            Phase::Complete => "complete",
        };
        let module = match self.module {
            ModuleNumber::One => 1,
            ModuleNumber::Two => 2,
        };
        write!(f, "{}({}, {})", phase, self.section, module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(phase: Phase, section: Section, module: ModuleNumber) -> TestFlowState {
        TestFlowState {
            phase,
            section,
            module,
        }
    }

    #[test]
    fn test_canonical_module_sequence() {
        // The full 13-step sitting, from start screen to completion.
        use ModuleNumber::{One, Two};
        use Section::{Math, ReadingWriting};

        let expected = [
            state(Phase::Directions, ReadingWriting, One),
            state(Phase::Test, ReadingWriting, One),
            state(Phase::Review, ReadingWriting, One),
            state(Phase::Directions, ReadingWriting, Two),
            state(Phase::Test, ReadingWriting, Two),
            state(Phase::Review, ReadingWriting, Two),
            state(Phase::Break, Math, One),
            state(Phase::Directions, Math, One),
            state(Phase::Test, Math, One),
            state(Phase::Review, Math, One),
            state(Phase::Directions, Math, Two),
            state(Phase::Test, Math, Two),
            state(Phase::Review, Math, Two),
        ];

        let mut current = TestFlowState::initial();
        for (step, expected_state) in expected.iter().enumerate() {
            current = current.advance();
            assert_eq!(
                current, *expected_state,
                "unexpected state at step {}",
                step + 1
            );
        }

        let terminal = current.advance();
        assert_eq!(terminal.phase, Phase::Complete);
    }

    #[test]
    fn test_complete_is_absorbing() {
        let complete = state(Phase::Complete, Section::Math, ModuleNumber::Two);
        assert_eq!(complete.advance(), complete);
        assert_eq!(complete.advance().advance(), complete);
        assert!(complete.is_complete());
    }

    #[test]
    fn test_advance_is_deterministic() {
        let review = state(Phase::Review, Section::ReadingWriting, ModuleNumber::One);
        assert_eq!(review.advance(), review.advance());
    }

    #[test]
    fn test_break_always_leads_into_math() {
        // Section/module on the break state are already pre-set to Math 1;
        // advancing must land on Math directions regardless.
        let after_break = state(Phase::Break, Section::Math, ModuleNumber::One).advance();
        assert_eq!(
            after_break,
            state(Phase::Directions, Section::Math, ModuleNumber::One)
        );
    }

    #[test]
    fn test_start_resets_to_reading_writing() {
        // Entry transition normalizes whatever section/module the start
        // screen happened to carry.
        let odd_start = state(Phase::Start, Section::Math, ModuleNumber::Two).advance();
        assert_eq!(
            odd_start,
            state(Phase::Directions, Section::ReadingWriting, ModuleNumber::One)
        );
    }
}
