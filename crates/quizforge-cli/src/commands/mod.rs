//! Subcommands and the options they share.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use quizforge_core::model::{Difficulty, QuizConfig};
use quizforge_core::synthesizer::QuestionSynthesizer;
use quizforge_core::traits::LlmProvider;
use quizforge_providers::config::load_config_from;
use quizforge_providers::{create_provider, QuizforgeConfig};

pub mod generate;
pub mod grade;
pub mod init;
pub mod list_models;
pub mod take;

/// Options for commands that generate a quiz.
#[derive(Args, Debug, Clone)]
pub struct QuizArgs {
    /// Source text, or a single topic such as "Photosynthesis"
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub text: Option<String>,

    /// Read the source text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// beginner, intermediate or advanced
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Number of questions (3-15)
    #[arg(long)]
    pub questions: Option<usize>,

    /// Model to use (e.g. "gemini/gemini-1.5-flash" or "openai/gpt-4.1-mini")
    #[arg(long)]
    pub model: Option<String>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Which provider and model to call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub provider: String,
    pub model: String,
}

impl ModelSpec {
    /// Parse `provider/model`, or a bare model name on the default provider.
    pub fn parse(spec: Option<&str>, config: &QuizforgeConfig) -> Self {
        match spec.map(str::trim) {
            Some(s) => match s.split_once('/') {
                Some((provider, model)) => ModelSpec {
                    provider: provider.to_string(),
                    model: model.to_string(),
                },
                None => ModelSpec {
                    provider: config.default_provider.clone(),
                    model: s.to_string(),
                },
            },
            None => ModelSpec {
                provider: config.default_provider.clone(),
                model: config.default_model.clone(),
            },
        }
    }
}

/// Everything a generating command needs, resolved from args and config.
pub struct QuizSetup {
    pub config: QuizforgeConfig,
    pub quiz: QuizConfig,
    pub model: ModelSpec,
    pub synthesizer: QuestionSynthesizer,
}

impl QuizArgs {
    fn source_text(&self) -> Result<String> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read source text: {}", path.display())),
            (None, None) => anyhow::bail!("either --text or --file is required"),
        }
    }

    /// Load config, build the quiz request, and wire up the provider.
    pub fn setup(&self) -> Result<QuizSetup> {
        let config = load_config_from(self.config.as_deref())?;

        let quiz = QuizConfig::new(
            self.source_text()?,
            self.difficulty.unwrap_or(config.default_difficulty),
            self.questions.unwrap_or(config.default_question_count),
        )?;

        let model = ModelSpec::parse(self.model.as_deref(), &config);
        let provider_config = config.providers.get(&model.provider).with_context(|| {
            format!(
                "provider '{}' is not configured. Run `quizforge init` or set QUIZFORGE_GEMINI_KEY",
                model.provider
            )
        })?;
        let provider: Arc<dyn LlmProvider> = Arc::from(create_provider(provider_config)?);

        let synthesizer =
            QuestionSynthesizer::new(provider, config.synthesizer_config(&model.model));

        Ok(QuizSetup {
            config,
            quiz,
            model,
            synthesizer,
        })
    }
}
