//! quizforge-core: Question synthesis, response parsing, and scoring.
//!
//! This crate turns source text into validated multiple-choice questions via
//! an [`traits::LlmProvider`], and turns a user's answers into a
//! deterministic score and grade.

pub mod cache;
pub mod error;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod results;
pub mod scoring;
pub mod session;
pub mod synthesizer;
pub mod traits;

pub use error::QuizError;
