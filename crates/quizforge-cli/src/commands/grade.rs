//! The `quizforge grade` command.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

use quizforge_core::model::{AnswerSelection, Question};
use quizforge_core::results::{QuestionResult, ScoreSummary};
use quizforge_core::scoring::score;

use crate::render;

#[derive(Serialize)]
struct GradeReport<'a> {
    summary: &'a ScoreSummary,
    results: &'a [QuestionResult],
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what}: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {what}: {}", path.display()))
}

pub fn execute(questions_path: PathBuf, answers_path: PathBuf, json: bool) -> Result<()> {
    let questions: Vec<Question> = read_json(&questions_path, "questions")?;
    let answers: AnswerSelection = read_json(&answers_path, "answers")?;

    anyhow::ensure!(!questions.is_empty(), "question set is empty");
    for (i, question) in questions.iter().enumerate() {
        question
            .validate()
            .with_context(|| format!("question {} is invalid", i + 1))?;
    }

    let (results, summary) = score(&questions, &answers)?;

    if json {
        let report = GradeReport {
            summary: &summary,
            results: &results,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", render::results_table(&results))?;
        render::summary(&mut out, &summary, None)?;
    }

    Ok(())
}
