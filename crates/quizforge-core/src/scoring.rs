//! Scoring engine and progress helper.
//!
//! Pure functions: the same questions and answers always produce the same
//! results, summary, and grade.

use crate::error::QuizError;
use crate::model::{AnswerSelection, Question};
use crate::results::{Grade, QuestionResult, ScoreSummary};

/// Score a set of answers against their questions.
///
/// An unanswered question counts as incorrect. Answers are compared with the
/// correct option's text by exact, case-sensitive equality. A question whose
/// correct label is not among its options fails the whole scoring pass
/// rather than being silently marked wrong.
pub fn score(
    questions: &[Question],
    answers: &AnswerSelection,
) -> Result<(Vec<QuestionResult>, ScoreSummary), QuizError> {
    let results = questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let correct_text = question.correct_text()?;
            let selected_text = answers.get(index);
            Ok(QuestionResult {
                question_index: index,
                question: question.prompt.clone(),
                selected_text: selected_text.map(str::to_string),
                correct_text: correct_text.to_string(),
                is_correct: selected_text == Some(correct_text),
                explanation: question.explanation.clone(),
            })
        })
        .collect::<Result<Vec<_>, QuizError>>()?;

    let correct_count = results.iter().filter(|r| r.is_correct).count();
    let summary = summarize(correct_count, results.len());

    tracing::debug!(
        correct = summary.correct_count,
        total = summary.total,
        grade = %summary.grade,
        "quiz scored"
    );

    Ok((results, summary))
}

/// Build the aggregate summary for `correct_count` out of `total`.
pub fn summarize(correct_count: usize, total: usize) -> ScoreSummary {
    let percentage = percentage(correct_count, total);
    ScoreSummary {
        correct_count,
        total,
        percentage,
        grade: Grade::from_percentage(percentage),
    }
}

/// `100 * correct / total`, or 0 when there are no questions.
pub fn percentage(correct_count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * correct_count as f64 / total as f64
}

/// Fraction of questions answered, clamped to `[0, 1]`.
pub fn completion_fraction(answered_count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (answered_count as f64 / total as f64).clamp(0.0, 1.0)
}
