//! Terminal rendering for questions and results.

use std::io::{self, Write};

use comfy_table::{Cell, Color, ContentArrangement, Table};

use quizforge_core::model::Question;
use quizforge_core::results::{QuestionResult, ScoreSummary};

const TABLE_WIDTH: u16 = 100;

/// Print one question with its labelled options.
pub fn question<W: Write>(
    out: &mut W,
    index: usize,
    total: usize,
    question: &Question,
) -> io::Result<()> {
    writeln!(out, "\nQuestion {} of {total}", index + 1)?;
    writeln!(out, "{}", question.prompt)?;
    for option in &question.options {
        writeln!(out, "  {}) {}", option.label, option.text)?;
    }
    Ok(())
}

/// Per-question results as a table.
pub fn results_table(results: &[QuestionResult]) -> Table {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH)
        .set_header(vec!["#", "Question", "Your answer", "Correct answer", ""]);

    for result in results {
        let (mark, color) = if result.is_correct {
            ("✓", Color::Green)
        } else {
            ("✗", Color::Red)
        };
        table.add_row(vec![
            Cell::new(result.question_index + 1),
            Cell::new(&result.question),
            Cell::new(result.selected_text.as_deref().unwrap_or("(no answer)")),
            Cell::new(&result.correct_text),
            Cell::new(mark).fg(color),
        ]);
    }

    table
}

/// Print the score line, grade and remark.
pub fn summary<W: Write>(
    out: &mut W,
    summary: &ScoreSummary,
    elapsed_secs: Option<i64>,
) -> io::Result<()> {
    writeln!(
        out,
        "\nScore: {}/{} ({:.1}%)",
        summary.correct_count, summary.total, summary.percentage
    )?;
    writeln!(out, "Grade: {} {}", summary.grade, summary.grade.emblem())?;
    writeln!(out, "{}", summary.grade.remark())?;
    if let Some(secs) = elapsed_secs {
        writeln!(out, "Time taken: {}m {:02}s", secs / 60, secs % 60)?;
    }
    Ok(())
}

pub fn explanations<W: Write>(out: &mut W, results: &[QuestionResult]) -> io::Result<()> {
    writeln!(out, "\nExplanations")?;
    for result in results {
        writeln!(out, "  {}. {}", result.question_index + 1, result.explanation)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::scoring::summarize;

    fn result(index: usize, is_correct: bool) -> QuestionResult {
        QuestionResult {
            question_index: index,
            question: format!("Question {index}?"),
            selected_text: if index == 2 { None } else { Some("Mars".into()) },
            correct_text: "Mars".into(),
            is_correct,
            explanation: "Mars is the fourth planet.".into(),
        }
    }

    #[test]
    fn table_marks_each_row() {
        let table = results_table(&[result(0, true), result(1, false), result(2, false)]);
        let rendered = table.to_string();
        assert!(rendered.contains("Question 0?"));
        assert!(rendered.contains("(no answer)"));
        assert!(rendered.contains('✓'));
        assert!(rendered.contains('✗'));
    }

    #[test]
    fn summary_shows_grade_and_time() {
        let mut out = Vec::new();
        summary(&mut out, &summarize(4, 5), Some(125)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Score: 4/5 (80.0%)"));
        assert!(text.contains("Grade: A"));
        assert!(text.contains("Time taken: 2m 05s"));
    }
}
