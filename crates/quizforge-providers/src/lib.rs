//! quizforge-providers: LLM provider integrations.
//!
//! Implements the `LlmProvider` trait for Gemini, OpenAI-compatible APIs,
//! and Ollama, plus a mock for tests, so quizzes can be generated from
//! multiple LLM backends.

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod ollama;
pub mod openai;

pub use config::{create_provider, load_config_from, ProviderConfig, QuizforgeConfig};
pub use error::ProviderError;
