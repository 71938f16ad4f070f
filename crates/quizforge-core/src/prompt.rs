//! Prompt construction.
//!
//! Sparse inputs (a bare topic or a short phrase) are expanded into a topic
//! brief before prompting so the model has something to ask questions about.

use serde_json::{json, Value};

use crate::error::QuizError;
use crate::model::{Difficulty, QuizConfig, OPTION_LABELS};

/// Inputs with fewer words than this are expanded into a brief.
pub const SHORT_TEXT_WORDS: usize = 20;

/// How the source text was prepared for prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// A single word, expanded into a topic brief.
    SingleTopic,
    /// A short phrase, expanded into a subject brief.
    ShortPhrase,
    /// Enough text to use directly.
    FullText,
}

/// Source text ready to be embedded in a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSource {
    pub kind: SourceKind,
    /// The user's text, trimmed.
    pub original: String,
    /// What actually goes into the prompt.
    pub text: String,
}

impl PreparedSource {
    /// Whether the text was expanded into a brief.
    pub fn is_expanded(&self) -> bool {
        self.kind != SourceKind::FullText
    }
}

/// Validate and, if sparse, expand the user's source text.
pub fn prepare_source(source_text: &str) -> Result<PreparedSource, QuizError> {
    let trimmed = source_text.trim();
    if trimmed.is_empty() {
        return Err(QuizError::EmptyInput);
    }

    let word_count = trimmed.split_whitespace().count();
    let (kind, text) = if word_count == 1 {
        (SourceKind::SingleTopic, topic_brief(trimmed))
    } else if word_count < SHORT_TEXT_WORDS {
        (SourceKind::ShortPhrase, subject_brief(trimmed))
    } else {
        (SourceKind::FullText, trimmed.to_string())
    };

    Ok(PreparedSource {
        kind,
        original: trimmed.to_string(),
        text,
    })
}

fn topic_brief(topic: &str) -> String {
    format!(
        "Topic: {topic}\n\
         \n\
         This assessment will cover comprehensive knowledge about {topic}, including:\n\
         - Definition and basic concepts\n\
         - Key characteristics and properties\n\
         - Applications and real-world usage\n\
         - Related terminology and concepts\n\
         - Important facts and details\n\
         \n\
         Please generate questions that test understanding of this topic from multiple perspectives."
    )
}

fn subject_brief(subject: &str) -> String {
    format!(
        "Subject: {subject}\n\
         \n\
         This assessment focuses on {subject} and will test knowledge including:\n\
         - Core concepts and definitions\n\
         - Practical applications\n\
         - Key principles and theories\n\
         - Important details and facts\n\
         - Related topics and connections\n\
         \n\
         Generate comprehensive questions covering various aspects of this subject."
    )
}

/// The literal JSON example shown to the model: `{"mcqs": [...]}` with one
/// template object per requested question.
pub fn response_template(question_count: usize) -> Value {
    let mcqs: Vec<Value> = (1..=question_count)
        .map(|i| {
            let options: serde_json::Map<String, Value> = OPTION_LABELS
                .iter()
                .enumerate()
                .map(|(n, label)| (label.to_string(), json!(format!("choice here{}", n + 1))))
                .collect();
            json!({
                "mcq": format!("multiple choice question{i}"),
                "options": options,
                "correct": "correct choice option in the form of a, b, c or d",
                "explanation": "brief explanation of why this is the correct answer",
            })
        })
        .collect();
    json!({ "mcqs": mcqs })
}

/// Build the full generation prompt.
pub fn build_prompt(source: &PreparedSource, difficulty: Difficulty, question_count: usize) -> String {
    // Serializing a `json!` value cannot fail.
    let template = serde_json::to_string_pretty(&response_template(question_count))
        .unwrap_or_default();

    format!(
        "Text: {text}\n\
         \n\
         You are an expert quiz generator. Create exactly {question_count} multiple choice questions based on the provided text.\n\
         \n\
         Requirements:\n\
         - Difficulty level: {difficulty}\n\
         - Questions must be directly answerable from the text\n\
         - No repeated questions\n\
         - Each question should have 4 distinct options\n\
         - Include brief explanations for correct answers\n\
         - Ensure variety in question types (factual, conceptual, analytical)\n\
         \n\
         Response format (JSON only, no additional text):\n\
         {template}\n\
         \n\
         Important: Return ONLY valid JSON, no markdown formatting or additional text.",
        text = source.text,
    )
}

/// Prepare the source text and build the prompt for a config in one step.
pub fn prompt_for(config: &QuizConfig) -> Result<(PreparedSource, String), QuizError> {
    let source = prepare_source(&config.source_text)?;
    let prompt = build_prompt(&source, config.difficulty, config.question_count);
    Ok((source, prompt))
}
