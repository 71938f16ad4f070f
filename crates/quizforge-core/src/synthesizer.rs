//! Question synthesizer.
//!
//! Validates the request, builds the prompt, makes one LLM call, and parses
//! the reply into questions. Successful results are memoized per
//! [`QuizConfig`] for the lifetime of the synthesizer.

use std::sync::Arc;
use std::time::Instant;

use tracing::instrument;

use crate::cache::QuestionCache;
use crate::error::QuizError;
use crate::model::{Question, QuizConfig};
use crate::parser::parse_questions;
use crate::prompt::{prompt_for, PreparedSource};
use crate::traits::{CompletionRequest, LlmProvider, DEFAULT_SYSTEM_PROMPT};

/// Generation settings passed through to the provider.
#[derive(Debug, Clone)]
pub struct SynthesizerConfig {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Max tokens for the reply.
    pub max_tokens: u32,
    /// Optional system prompt override.
    pub system_prompt_override: Option<String>,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.7,
            max_tokens: 4096,
            system_prompt_override: None,
        }
    }
}

/// A generated question set plus how the source text was prepared.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub questions: Arc<Vec<Question>>,
    pub source: PreparedSource,
    /// Whether the questions came from the cache.
    pub cached: bool,
}

/// Turns source text into multiple-choice questions via an LLM.
pub struct QuestionSynthesizer {
    provider: Arc<dyn LlmProvider>,
    config: SynthesizerConfig,
    cache: QuestionCache,
}

impl QuestionSynthesizer {
    pub fn new(provider: Arc<dyn LlmProvider>, config: SynthesizerConfig) -> Self {
        Self {
            provider,
            config,
            cache: QuestionCache::new(),
        }
    }

    pub fn cache(&self) -> &QuestionCache {
        &self.cache
    }

    /// Generate questions for `config`, returning only the question list.
    pub async fn fetch(&self, config: &QuizConfig) -> Result<Vec<Question>, QuizError> {
        self.synthesize(config)
            .await
            .map(|s| s.questions.as_ref().clone())
    }

    /// Generate questions for `config`.
    ///
    /// Identical configs are served from the cache without calling the
    /// provider again. Failures are returned, never cached.
    #[instrument(skip(self, config), fields(
        provider = self.provider.name(),
        difficulty = %config.difficulty,
        count = config.question_count,
    ))]
    pub async fn synthesize(&self, config: &QuizConfig) -> Result<Synthesis, QuizError> {
        config.validate()?;
        let (source, prompt) = prompt_for(config)?;

        let (questions, cached) = self
            .cache
            .get_or_try_insert(config, || self.generate(prompt, config.question_count))
            .await?;

        if cached {
            tracing::info!("serving {} cached questions", questions.len());
        }

        Ok(Synthesis {
            questions,
            source,
            cached,
        })
    }

    async fn generate(&self, prompt: String, requested: usize) -> Result<Vec<Question>, QuizError> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            prompt,
            system_prompt: Some(
                self.config
                    .system_prompt_override
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            ),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let start = Instant::now();
        let response = self.provider.complete(&request).await.map_err(|e| {
            tracing::error!("LLM call failed: {e:#}");
            QuizError::LlmInvocation(format!("{e:#}"))
        })?;
        tracing::debug!(
            model = %response.model,
            latency_ms = start.elapsed().as_millis() as u64,
            completion_tokens = response.token_usage.completion_tokens,
            "LLM replied"
        );

        let questions = parse_questions(&response.content).inspect_err(|e| {
            tracing::warn!("could not use LLM reply: {e}");
        })?;

        if questions.len() != requested {
            tracing::warn!(
                requested,
                returned = questions.len(),
                "model returned a different number of questions than requested"
            );
        }

        Ok(questions)
    }
}
