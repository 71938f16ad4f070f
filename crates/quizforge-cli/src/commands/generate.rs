//! The `quizforge generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::commands::QuizArgs;

pub async fn execute(args: QuizArgs, output: Option<PathBuf>) -> Result<()> {
    let setup = args.setup()?;

    let synthesis = setup.synthesizer.synthesize(&setup.quiz).await?;
    if synthesis.source.is_expanded() {
        tracing::info!(
            "expanded short input '{}' into a topic brief",
            synthesis.source.original
        );
    }

    let json = serde_json::to_string_pretty(synthesis.questions.as_slice())
        .context("failed to serialize questions")?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} questions to {}",
                synthesis.questions.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
