//! The `quizforge take` command.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use quizforge_core::model::OPTION_LABELS;
use quizforge_core::session::{QuizOutcome, QuizSession};
use quizforge_core::QuizError;

use crate::commands::QuizArgs;
use crate::render;

pub async fn execute(args: QuizArgs, no_explanations: bool, no_progress: bool) -> Result<()> {
    let setup = args.setup()?;
    let show_explanations = setup.config.show_explanations && !no_explanations;
    let show_progress = setup.config.show_progress && !no_progress;

    eprintln!(
        "Generating {} {} questions with {}/{}...",
        setup.quiz.question_count, setup.quiz.difficulty, setup.model.provider, setup.model.model
    );

    let generated = setup.synthesizer.fetch(&setup.quiz).await;
    let hint = generated.as_ref().err().and_then(retry_hint);

    let mut session = QuizSession::new();
    session.apply_generation(generated);
    if let Some(err) = session.last_error() {
        match hint {
            Some(hint) => anyhow::bail!("{err}\n{hint}"),
            None => anyhow::bail!("{err}"),
        }
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    answer_questions(&mut session, stdin.lock(), &mut out, show_progress)?;
    session.submit()?;

    let elapsed_secs = session.elapsed().map(|d| d.num_seconds());
    if let Some(outcome) = session.outcome() {
        report(&mut out, outcome, elapsed_secs, show_explanations)?;
    }

    Ok(())
}

/// Advice for failures that a fresh request may not repeat.
fn retry_hint(err: &QuizError) -> Option<&'static str> {
    err.is_retryable()
        .then_some("The model's reply was unusable or the call failed; running the command again may succeed.")
}

/// Ask each question in turn, reading one option label per line.
///
/// Invalid labels are re-prompted. End of input stops early and leaves the
/// rest unanswered.
fn answer_questions<R: BufRead, W: Write>(
    session: &mut QuizSession,
    input: R,
    out: &mut W,
    show_progress: bool,
) -> Result<()> {
    let total = session.total();
    let mut lines = input.lines();

    for index in 0..total {
        render::question(out, index, total, &session.questions()[index])?;

        loop {
            write!(out, "Your answer ({}): ", OPTION_LABELS.join("/"))?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                return Ok(());
            };
            let label = line.context("failed to read answer")?.trim().to_lowercase();

            if session.select_label(index, &label).is_ok() {
                break;
            }
            writeln!(out, "Please answer with one of: {}", OPTION_LABELS.join(", "))?;
        }

        if show_progress {
            writeln!(
                out,
                "Progress: {}/{} answered ({:.0}%)",
                session.answered_count(),
                total,
                session.progress() * 100.0
            )?;
        }
    }

    Ok(())
}

fn report<W: Write>(
    out: &mut W,
    outcome: &QuizOutcome,
    elapsed_secs: Option<i64>,
    show_explanations: bool,
) -> Result<()> {
    writeln!(out, "\n{}", render::results_table(&outcome.results))?;
    render::summary(out, &outcome.summary, elapsed_secs)?;
    if show_explanations {
        render::explanations(out, &outcome.results)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::model::{AnswerOption, Question};
    use quizforge_core::results::Grade;
    use quizforge_core::session::Phase;
    use std::io::Cursor;

    fn session_with(count: usize) -> QuizSession {
        let questions = (0..count)
            .map(|i| {
                let options = OPTION_LABELS
                    .iter()
                    .map(|l| AnswerOption::new(*l, format!("{l}-{i}")))
                    .collect();
                Question::new(format!("Q{i}?"), options, "b", Some(format!("Because {i}.")))
                    .unwrap()
            })
            .collect();
        let mut session = QuizSession::new();
        session.apply_generation(Ok(questions));
        session
    }

    #[test]
    fn answers_every_question_and_reprompts_on_bad_input() {
        let mut session = session_with(3);
        let mut out = Vec::new();

        answer_questions(
            &mut session,
            Cursor::new("z\nB\n\n a \nb\n"),
            &mut out,
            true,
        )
        .unwrap();

        assert!(session.all_answered());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Please answer with one of").count(), 2);
        assert!(text.contains("Progress: 3/3 answered (100%)"));

        let outcome = session.submit().unwrap();
        assert_eq!(outcome.summary.correct_count, 2);
    }

    #[test]
    fn end_of_input_leaves_questions_unanswered() {
        let mut session = session_with(4);
        let mut out = Vec::new();

        answer_questions(&mut session, Cursor::new("b\n"), &mut out, false).unwrap();

        assert_eq!(session.answered_count(), 1);
        assert_eq!(
            session.submit().unwrap_err(),
            QuizError::Incomplete { remaining: 3 }
        );
        assert_eq!(session.phase(), Phase::Answering);
        assert!(!String::from_utf8(out).unwrap().contains("Progress"));
    }

    #[test]
    fn retry_hint_only_for_model_failures() {
        assert!(retry_hint(&QuizError::ResponseParse("prose".into())).is_some());
        assert!(retry_hint(&QuizError::LlmInvocation("timeout".into())).is_some());
        assert!(retry_hint(&QuizError::EmptyInput).is_none());
        assert!(retry_hint(&QuizError::DataIntegrity("label e".into())).is_none());
    }

    #[test]
    fn report_respects_explanation_toggle() {
        let mut session = session_with(3);
        answer_questions(&mut session, Cursor::new("b\nb\nb\n"), &mut Vec::new(), false).unwrap();
        let outcome = session.submit().unwrap().clone();
        assert_eq!(outcome.summary.grade, Grade::APlus);

        let mut with = Vec::new();
        report(&mut with, &outcome, None, true).unwrap();
        let with = String::from_utf8(with).unwrap();
        assert!(with.contains("Because 2."));
        assert!(with.contains("Grade: A+"));

        let mut without = Vec::new();
        report(&mut without, &outcome, None, false).unwrap();
        assert!(!String::from_utf8(without).unwrap().contains("Because"));
    }
}
