//! Quiz error taxonomy.
//!
//! Every core operation returns these as values; nothing in the core panics
//! or aborts on bad input. The hosting UI decides how to render them.

use thiserror::Error;

/// Errors produced while synthesizing, answering, or scoring a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The source text was empty after trimming.
    #[error("text content is empty")]
    EmptyInput,

    /// The quiz configuration is out of bounds.
    #[error("invalid quiz configuration: {0}")]
    InvalidConfig(String),

    /// The outbound LLM call failed (network, auth, quota, ...).
    #[error("error generating questions: {0}")]
    LlmInvocation(String),

    /// The LLM reply could not be coerced into the expected question shape.
    #[error("failed to parse quiz questions from response: {0}")]
    ResponseParse(String),

    /// A question violates its own invariants, e.g. the correct label is not
    /// one of its options.
    #[error("question data is inconsistent: {0}")]
    DataIntegrity(String),

    /// An answer was recorded for a question or option that does not exist.
    #[error("invalid selection for question {index}")]
    InvalidSelection { index: usize },

    /// Submission attempted while questions remain unanswered.
    #[error("{remaining} question(s) still unanswered")]
    Incomplete { remaining: usize },
}

impl QuizError {
    /// Returns `true` if re-issuing the same generation request may succeed.
    ///
    /// Invocation and parse failures come from the model; local input errors
    /// will fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            QuizError::LlmInvocation(_) | QuizError::ResponseParse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(QuizError::EmptyInput.to_string(), "text content is empty");
        assert_eq!(
            QuizError::Incomplete { remaining: 2 }.to_string(),
            "2 question(s) still unanswered"
        );
        assert!(QuizError::ResponseParse("no mcqs key".into())
            .to_string()
            .contains("no mcqs key"));
    }

    #[test]
    fn retryable_classification() {
        assert!(QuizError::LlmInvocation("timeout".into()).is_retryable());
        assert!(QuizError::ResponseParse("garbage".into()).is_retryable());
        assert!(!QuizError::EmptyInput.is_retryable());
        assert!(!QuizError::DataIntegrity("label e".into()).is_retryable());
    }
}
