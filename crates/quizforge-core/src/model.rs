//! Core data model types for quizforge.
//!
//! Questions, quiz configuration, and the answers a user accumulates while
//! taking a quiz.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Option labels, in display order.
pub const OPTION_LABELS: [&str; 4] = ["a", "b", "c", "d"];

/// Number of options every question carries.
pub const OPTION_COUNT: usize = OPTION_LABELS.len();

/// Smallest number of questions a quiz may request.
pub const MIN_QUESTIONS: usize = 3;

/// Largest number of questions a quiz may request.
pub const MAX_QUESTIONS: usize = 15;

/// Question count used when the user does not pick one.
pub const DEFAULT_QUESTIONS: usize = 5;

/// Explanation used when the model does not supply one.
pub const DEFAULT_EXPLANATION: &str = "No explanation available";

/// One labelled answer choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Choice label, e.g. "a".
    pub label: String,
    /// Text shown to the user.
    pub text: String,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub prompt: String,
    /// Answer choices in display order.
    pub options: Vec<AnswerOption>,
    /// Label of the correct option.
    pub correct_label: String,
    /// Why the correct option is correct.
    #[serde(default = "default_explanation")]
    pub explanation: String,
}

fn default_explanation() -> String {
    DEFAULT_EXPLANATION.to_string()
}

impl Question {
    /// Build a question, checking its invariants.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<AnswerOption>,
        correct_label: impl Into<String>,
        explanation: Option<String>,
    ) -> Result<Self, QuizError> {
        let question = Self {
            prompt: prompt.into(),
            options,
            correct_label: correct_label.into(),
            explanation: explanation
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(default_explanation),
        };
        question.validate()?;
        Ok(question)
    }

    /// Check that the question has exactly four distinct, non-empty options
    /// labelled `a` to `d`, and that its correct label names one of them.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.options.len() != OPTION_COUNT {
            return Err(QuizError::DataIntegrity(format!(
                "question '{}' has {} options, expected {OPTION_COUNT}",
                self.prompt,
                self.options.len()
            )));
        }

        for (i, option) in self.options.iter().enumerate() {
            if !OPTION_LABELS.contains(&option.label.as_str()) {
                return Err(QuizError::DataIntegrity(format!(
                    "question '{}' has option label '{}', expected one of {}",
                    self.prompt,
                    option.label,
                    OPTION_LABELS.join(", ")
                )));
            }
            if option.text.trim().is_empty() {
                return Err(QuizError::DataIntegrity(format!(
                    "question '{}' has an empty option '{}'",
                    self.prompt, option.label
                )));
            }
            let duplicate = self.options[..i]
                .iter()
                .any(|o| o.label == option.label || o.text == option.text);
            if duplicate {
                return Err(QuizError::DataIntegrity(format!(
                    "question '{}' repeats option '{}'",
                    self.prompt, option.label
                )));
            }
        }

        self.correct_text().map(|_| ())
    }

    /// Text of the option with the given label.
    pub fn option_text(&self, label: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.label == label)
            .map(|o| o.text.as_str())
    }

    /// Text of the correct option.
    pub fn correct_text(&self) -> Result<&str, QuizError> {
        self.option_text(&self.correct_label).ok_or_else(|| {
            QuizError::DataIntegrity(format!(
                "correct label '{}' is not among the options of question '{}'",
                self.correct_label, self.prompt
            ))
        })
    }

    /// Whether `text` is exactly one of this question's option texts.
    pub fn has_option_text(&self, text: &str) -> bool {
        self.options.iter().any(|o| o.text == text)
    }
}

/// Requested quiz difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "easy" => Ok(Difficulty::Beginner),
            "intermediate" | "medium" => Ok(Difficulty::Intermediate),
            "advanced" | "hard" => Ok(Difficulty::Advanced),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Everything a generation request depends on.
///
/// Also serves as the memoization key, so two configs compare equal only
/// when the source text matches byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Text (or topic) to build questions from.
    pub source_text: String,
    /// Requested difficulty.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Number of questions to ask the model for.
    #[serde(default = "default_question_count")]
    pub question_count: usize,
}

fn default_question_count() -> usize {
    DEFAULT_QUESTIONS
}

impl QuizConfig {
    /// Build a config, checking the question count bounds.
    pub fn new(
        source_text: impl Into<String>,
        difficulty: Difficulty,
        question_count: usize,
    ) -> Result<Self, QuizError> {
        let config = Self {
            source_text: source_text.into(),
            difficulty,
            question_count,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), QuizError> {
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.question_count) {
            return Err(QuizError::InvalidConfig(format!(
                "question count must be between {MIN_QUESTIONS} and {MAX_QUESTIONS}, got {}",
                self.question_count
            )));
        }
        Ok(())
    }
}

/// The answers chosen so far, keyed by question index.
///
/// A missing entry means the question is unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSelection {
    answers: BTreeMap<usize, String>,
}

impl AnswerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the selected option text for a question.
    pub fn select(&mut self, index: usize, text: impl Into<String>) {
        self.answers.insert(index, text.into());
    }

    /// The selected text for a question, if answered.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.answers.contains_key(&index)
    }

    /// Number of answered questions among the first `total`.
    pub fn answered_count(&self, total: usize) -> usize {
        self.answers.range(..total).count()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl FromIterator<(usize, String)> for AnswerSelection {
    fn from_iter<I: IntoIterator<Item = (usize, String)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}
