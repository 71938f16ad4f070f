//! LLM reply parser.
//!
//! The model's reply is untrusted free text. A fixed, ordered list of
//! extraction strategies is tried until one yields JSON; the JSON is then
//! checked for the `{"mcqs": [...]}` shape and converted into validated
//! [`Question`]s. Either every question converts or the whole reply is
//! rejected.

use serde_json::{Map, Value};

use crate::error::QuizError;
use crate::model::{AnswerOption, Question};

/// A single extraction strategy: returns parsed JSON if it recognises the text.
pub type Strategy = fn(&str) -> Option<Value>;

/// Extraction strategies in the order they are attempted.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("direct", parse_direct),
    ("fenced", parse_fenced_block),
    ("brace_span", parse_brace_span),
];

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Parse the whole trimmed reply as JSON.
pub fn parse_direct(text: &str) -> Option<Value> {
    serde_json::from_str(text.trim()).ok()
}

/// Parse the interior of the first ```` ```json ```` fenced block.
///
/// The block ends at the next closing fence. A block that is never closed
/// does not match.
pub fn parse_fenced_block(text: &str) -> Option<Value> {
    let start = text.find(JSON_FENCE)? + JSON_FENCE.len();
    let rest = &text[start..];
    let end = rest.find(FENCE)?;
    serde_json::from_str(rest[..end].trim()).ok()
}

/// Parse the greedy span from the first `{` to the last `}`.
pub fn parse_brace_span(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Run the strategies in order and return the first JSON value recovered,
/// along with the name of the strategy that produced it.
pub fn extract_json(reply: &str) -> Option<(&'static str, Value)> {
    STRATEGIES
        .iter()
        .find_map(|(name, strategy)| strategy(reply).map(|value| (*name, value)))
}

/// Parse an LLM reply into an ordered list of validated questions.
pub fn parse_questions(reply: &str) -> Result<Vec<Question>, QuizError> {
    let Some((strategy, value)) = extract_json(reply) else {
        return Err(QuizError::ResponseParse(
            "reply does not contain any JSON".into(),
        ));
    };
    tracing::debug!(strategy, "extracted JSON from LLM reply");

    let mcqs = value
        .get("mcqs")
        .ok_or_else(|| QuizError::ResponseParse("reply has no top-level \"mcqs\" key".into()))?;
    let entries = mcqs
        .as_array()
        .ok_or_else(|| QuizError::ResponseParse("\"mcqs\" is not a list".into()))?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| parse_entry(i, entry))
        .collect()
}

fn parse_entry(index: usize, entry: &Value) -> Result<Question, QuizError> {
    let shape_error = |what: &str| QuizError::ResponseParse(format!("question {}: {what}", index + 1));

    let obj = entry
        .as_object()
        .ok_or_else(|| shape_error("entry is not an object"))?;
    let prompt = string_field(obj, "mcq").ok_or_else(|| shape_error("missing \"mcq\" text"))?;
    let options = obj
        .get("options")
        .and_then(Value::as_object)
        .ok_or_else(|| shape_error("missing \"options\" mapping"))?;
    let correct = string_field(obj, "correct")
        .ok_or_else(|| shape_error("missing \"correct\" label"))?;
    let explanation = string_field(obj, "explanation");

    let options = options
        .iter()
        .map(|(label, text)| {
            text.as_str()
                .map(|t| AnswerOption::new(normalize_label(label), t.trim()))
                .ok_or_else(|| shape_error(&format!("option '{label}' is not text")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Question::new(prompt, options, normalize_label(&correct), explanation)
}

/// Labels compare case-insensitively, so `"B"` and `" b "` both mean `b`.
fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
}
