//! Scoring outputs: per-question results, the aggregate summary, and grades.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
    /// Position of the question in the quiz.
    pub question_index: usize,
    /// The question text.
    pub question: String,
    /// What the user picked, `None` if unanswered.
    pub selected_text: Option<String>,
    /// Text of the correct option.
    pub correct_text: String,
    pub is_correct: bool,
    pub explanation: String,
}

/// Aggregate score for a submitted quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub correct_count: usize,
    pub total: usize,
    /// 0.0 to 100.0.
    pub percentage: f64,
    pub grade: Grade,
}

/// Letter grade derived from the score percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    F,
}

/// Inclusive lower bounds, checked top-down.
const GRADE_THRESHOLDS: [(f64, Grade); 4] = [
    (90.0, Grade::APlus),
    (80.0, Grade::A),
    (70.0, Grade::B),
    (60.0, Grade::C),
];

impl Grade {
    /// Grade for a percentage in `[0, 100]`.
    pub fn from_percentage(percentage: f64) -> Self {
        GRADE_THRESHOLDS
            .iter()
            .find(|(floor, _)| percentage >= *floor)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    /// Badge shown next to the grade.
    pub fn emblem(&self) -> &'static str {
        match self {
            Grade::APlus => "🏆",
            Grade::A => "🥇",
            Grade::B => "🥈",
            Grade::C => "🥉",
            Grade::F => "📚",
        }
    }

    /// Short feedback line for the results screen.
    pub fn remark(&self) -> &'static str {
        match self {
            Grade::APlus | Grade::A => "Excellent! You have a strong understanding of this material.",
            Grade::B | Grade::C => {
                "Good job! Review the questions you missed to strengthen your knowledge."
            }
            Grade::F => "Keep studying! Focus on the core concepts and try again.",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::APlus => write!(f, "A+"),
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::F => write!(f, "F"),
        }
    }
}
