//! Quiz session state.
//!
//! All state a UI needs across interactions lives in one [`QuizSession`]
//! value owned by the UI layer. Handlers take `&mut QuizSession`, and
//! [`QuizSession::reset`] returns it to its initial value.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::{AnswerSelection, Question};
use crate::results::{QuestionResult, ScoreSummary};
use crate::scoring::{completion_fraction, score};

/// Where the user is in the quiz flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Nothing generated yet; the user is entering source text.
    Input,
    /// Questions generated, answers being collected.
    Answering,
    /// Answers submitted and scored.
    Submitted,
}

/// Scored results of a submitted quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub results: Vec<QuestionResult>,
    pub summary: ScoreSummary,
}

/// Session state for one user taking one quiz at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    id: Uuid,
    questions: Option<Vec<Question>>,
    answers: AnswerSelection,
    outcome: Option<QuizOutcome>,
    last_error: Option<String>,
    generated_at: Option<DateTime<Utc>>,
    submitted_at: Option<DateTime<Utc>>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// A fresh session: nothing generated, nothing answered, no error.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            questions: None,
            answers: AnswerSelection::new(),
            outcome: None,
            last_error: None,
            generated_at: None,
            submitted_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        match (&self.questions, &self.outcome) {
            (_, Some(_)) => Phase::Submitted,
            (Some(_), None) => Phase::Answering,
            (None, None) => Phase::Input,
        }
    }

    /// Store the result of a generation request.
    ///
    /// On success the questions replace any previous quiz and its answers.
    /// On failure the error message is kept for display and nothing else
    /// changes.
    pub fn apply_generation(&mut self, generated: Result<Vec<Question>, QuizError>) {
        match generated {
            Ok(questions) => {
                tracing::info!(session = %self.id, count = questions.len(), "quiz generated");
                self.questions = Some(questions);
                self.answers = AnswerSelection::new();
                self.outcome = None;
                self.last_error = None;
                self.generated_at = Some(Utc::now());
                self.submitted_at = None;
            }
            Err(e) => {
                tracing::warn!(session = %self.id, "quiz generation failed: {e}");
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn questions(&self) -> &[Question] {
        self.questions.as_deref().unwrap_or(&[])
    }

    pub fn answers(&self) -> &AnswerSelection {
        &self.answers
    }

    pub fn outcome(&self) -> Option<&QuizOutcome> {
        self.outcome.as_ref()
    }

    /// The most recent generation error, if the last attempt failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Record the user's choice for question `index`.
    ///
    /// `text` must be exactly one of that question's option texts. Answers
    /// are frozen once the quiz has been submitted.
    pub fn select(&mut self, index: usize, text: &str) -> Result<(), QuizError> {
        if self.phase() != Phase::Answering {
            return Err(QuizError::InvalidSelection { index });
        }
        let question = self
            .questions()
            .get(index)
            .ok_or(QuizError::InvalidSelection { index })?;
        if !question.has_option_text(text) {
            return Err(QuizError::InvalidSelection { index });
        }
        self.answers.select(index, text);
        Ok(())
    }

    /// Record the user's choice for question `index` by option label.
    pub fn select_label(&mut self, index: usize, label: &str) -> Result<(), QuizError> {
        let text = self
            .questions()
            .get(index)
            .and_then(|q| q.option_text(label))
            .map(str::to_string)
            .ok_or(QuizError::InvalidSelection { index })?;
        self.select(index, &text)
    }

    pub fn total(&self) -> usize {
        self.questions().len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.answered_count(self.total())
    }

    pub fn remaining(&self) -> usize {
        self.total() - self.answered_count()
    }

    pub fn all_answered(&self) -> bool {
        self.total() > 0 && self.remaining() == 0
    }

    /// Completion fraction for a progress indicator.
    pub fn progress(&self) -> f64 {
        completion_fraction(self.answered_count(), self.total())
    }

    /// Score the quiz.
    ///
    /// Refused while questions remain unanswered. Submitting twice returns
    /// the outcome computed the first time.
    pub fn submit(&mut self) -> Result<&QuizOutcome, QuizError> {
        if self.outcome.is_none() {
            if self.phase() == Phase::Input {
                return Err(QuizError::Incomplete { remaining: 0 });
            }
            let remaining = self.remaining();
            if remaining > 0 {
                return Err(QuizError::Incomplete { remaining });
            }

            let (results, summary) = score(self.questions(), &self.answers)?;
            tracing::info!(
                session = %self.id,
                correct = summary.correct_count,
                total = summary.total,
                grade = %summary.grade,
                "quiz submitted"
            );
            self.outcome = Some(QuizOutcome { results, summary });
            self.submitted_at = Some(Utc::now());
        }

        self.outcome
            .as_ref()
            .ok_or(QuizError::Incomplete { remaining: 0 })
    }

    /// Time from generation to submission, or to now if not yet submitted.
    pub fn elapsed(&self) -> Option<Duration> {
        let start = self.generated_at?;
        let end = self.submitted_at.unwrap_or_else(Utc::now);
        Some(end - start)
    }

    /// Discard all quiz state and return to the input screen.
    pub fn reset(&mut self) {
        tracing::debug!(session = %self.id, "session reset");
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerOption, OPTION_LABELS};
    use crate::results::Grade;

    fn question(prompt: &str, correct: &str) -> Question {
        let options = OPTION_LABELS
            .iter()
            .map(|l| AnswerOption::new(*l, format!("{prompt}-{l}")))
            .collect();
        Question::new(prompt, options, correct, None).unwrap()
    }

    fn generated() -> QuizSession {
        let mut session = QuizSession::new();
        session.apply_generation(Ok(vec![question("q1", "a"), question("q2", "b"), question("q3", "c")]));
        session
    }

    #[test]
    fn starts_in_input_phase() {
        let session = QuizSession::new();
        assert_eq!(session.phase(), Phase::Input);
        assert!(session.questions().is_empty());
        assert_eq!(session.progress(), 0.0);
        assert!(!session.all_answered());
        assert!(session.elapsed().is_none());
    }

    #[test]
    fn generation_failure_keeps_message() {
        let mut session = QuizSession::new();
        session.apply_generation(Err(QuizError::ResponseParse("no JSON".into())));
        assert_eq!(session.phase(), Phase::Input);
        assert!(session.last_error().unwrap().contains("no JSON"));

        session.apply_generation(Ok(vec![question("q1", "a")]));
        assert_eq!(session.phase(), Phase::Answering);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn answering_tracks_progress() {
        let mut session = generated();
        assert_eq!(session.remaining(), 3);

        session.select(0, "q1-a").unwrap();
        session.select_label(1, "d").unwrap();
        assert_eq!(session.answered_count(), 2);
        assert!((session.progress() - 2.0 / 3.0).abs() < 1e-9);
        assert!(!session.all_answered());

        session.select(2, "q3-b").unwrap();
        assert!(session.all_answered());
        assert_eq!(session.progress(), 1.0);
    }

    #[test]
    fn rejects_unknown_questions_and_options() {
        let mut session = generated();
        assert_eq!(
            session.select(5, "q1-a").unwrap_err(),
            QuizError::InvalidSelection { index: 5 }
        );
        assert!(session.select(0, "q2-a").is_err());
        assert!(session.select_label(0, "e").is_err());
        assert!(QuizSession::new().select(0, "x").is_err());
    }

    #[test]
    fn submit_requires_every_answer() {
        let mut session = generated();
        session.select(0, "q1-a").unwrap();
        assert_eq!(
            session.submit().unwrap_err(),
            QuizError::Incomplete { remaining: 2 }
        );
        assert_eq!(session.phase(), Phase::Answering);
    }

    #[test]
    fn submit_scores_once_and_freezes_answers() {
        let mut session = generated();
        session.select(0, "q1-a").unwrap();
        session.select(1, "q2-b").unwrap();
        session.select(2, "q3-a").unwrap();

        let outcome = session.submit().unwrap().clone();
        assert_eq!(outcome.summary.correct_count, 2);
        assert_eq!(outcome.summary.grade, Grade::C);
        assert!(!outcome.results[2].is_correct);
        assert_eq!(session.phase(), Phase::Submitted);
        assert!(session.elapsed().unwrap() >= Duration::zero());

        assert!(session.select(2, "q3-c").is_err());
        assert_eq!(session.submit().unwrap(), &outcome);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut session = generated();
        let old_id = session.id();
        session.select(0, "q1-a").unwrap();
        session.apply_generation(Err(QuizError::EmptyInput));

        session.reset();
        assert_eq!(session.phase(), Phase::Input);
        assert!(session.questions().is_empty());
        assert!(session.answers().is_empty());
        assert!(session.outcome().is_none());
        assert!(session.last_error().is_none());
        assert_ne!(session.id(), old_id);
    }

    #[test]
    fn submit_without_quiz_is_refused() {
        let mut session = QuizSession::new();
        assert!(matches!(
            session.submit().unwrap_err(),
            QuizError::Incomplete { .. }
        ));
    }
}
