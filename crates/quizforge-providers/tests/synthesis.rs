//! End-to-end synthesis against the mock provider.

use std::collections::HashMap;
use std::sync::Arc;

use quizforge_core::model::{AnswerSelection, Difficulty, QuizConfig};
use quizforge_core::prompt::SourceKind;
use quizforge_core::results::Grade;
use quizforge_core::scoring::score;
use quizforge_core::session::{Phase, QuizSession};
use quizforge_core::synthesizer::{QuestionSynthesizer, SynthesizerConfig};
use quizforge_core::QuizError;
use quizforge_providers::mock::MockProvider;

fn well_formed_reply(count: usize) -> String {
    let mcqs: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "mcq": format!("What does stage {i} of photosynthesis produce?"),
                "options": {
                    "a": format!("Oxygen {i}"),
                    "b": format!("Nitrogen {i}"),
                    "c": format!("Helium {i}"),
                    "d": format!("Argon {i}")
                },
                "correct": "a",
                "explanation": format!("Stage {i} splits water and releases oxygen.")
            })
        })
        .collect();
    format!(
        "Here is your quiz:\n```json\n{}\n```\nGood luck!",
        serde_json::json!({ "mcqs": mcqs })
    )
}

fn synthesizer(provider: Arc<MockProvider>) -> QuestionSynthesizer {
    QuestionSynthesizer::new(provider, SynthesizerConfig::default())
}

#[tokio::test]
async fn single_topic_is_expanded_and_generates_requested_count() {
    let provider = Arc::new(MockProvider::with_fixed_response(&well_formed_reply(3)));
    let synth = synthesizer(provider.clone());

    let config = QuizConfig::new("Photosynthesis", Difficulty::Beginner, 3).unwrap();
    let synthesis = synth.synthesize(&config).await.unwrap();

    assert_eq!(synthesis.source.kind, SourceKind::SingleTopic);
    assert!(synthesis.source.is_expanded());
    assert_eq!(synthesis.questions.len(), 3);
    assert!(!synthesis.cached);
    assert!(synthesis.questions[0].prompt.contains("stage 0"));

    let request = provider.last_request().unwrap();
    assert!(request.prompt.contains("Photosynthesis"));
    assert!(request.prompt.contains("beginner"));
    assert_eq!(request.model, "gemini-1.5-flash");
}

#[tokio::test]
async fn refusal_yields_parse_error_and_no_questions() {
    let provider = Arc::new(MockProvider::with_fixed_response(
        "Sorry, I cannot help with that.",
    ));
    let synth = synthesizer(provider);

    let config = QuizConfig::new("Photosynthesis", Difficulty::Intermediate, 3).unwrap();
    let err = synth.synthesize(&config).await.unwrap_err();

    assert!(matches!(err, QuizError::ResponseParse(_)));
    assert!(!err.to_string().is_empty());
    assert!(synth.cache().is_empty());
}

#[tokio::test]
async fn provider_failure_is_wrapped_as_invocation_error() {
    let provider = Arc::new(MockProvider::failing("connection refused"));
    let synth = synthesizer(provider.clone());

    let config = QuizConfig::new("Tectonic plates", Difficulty::Advanced, 4).unwrap();
    let err = synth.synthesize(&config).await.unwrap_err();

    assert_eq!(
        err,
        QuizError::LlmInvocation("connection refused".to_string())
    );

    // Failures are not memoized: the next request calls out again.
    let _ = synth.synthesize(&config).await;
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn identical_requests_hit_the_provider_once() {
    let provider = Arc::new(MockProvider::with_fixed_response(&well_formed_reply(5)));
    let synth = synthesizer(provider.clone());

    let config = QuizConfig::new("The water cycle", Difficulty::Intermediate, 5).unwrap();
    let first = synth.synthesize(&config).await.unwrap();
    let second = synth.synthesize(&config).await.unwrap();

    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(first.questions, second.questions);
    assert_eq!(provider.call_count(), 1);

    let harder = QuizConfig::new("The water cycle", Difficulty::Advanced, 5).unwrap();
    synth.synthesize(&harder).await.unwrap();
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn concurrent_identical_requests_share_one_call() {
    let provider = Arc::new(MockProvider::with_fixed_response(&well_formed_reply(3)));
    let synth = Arc::new(synthesizer(provider.clone()));
    let config = QuizConfig::new("Volcanoes", Difficulty::Beginner, 3).unwrap();

    let runs = (0..6).map(|_| {
        let synth = Arc::clone(&synth);
        let config = config.clone();
        async move { synth.synthesize(&config).await }
    });
    let results = futures::future::join_all(runs).await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn prompt_matched_replies_drive_a_full_session() {
    let mut replies = HashMap::new();
    replies.insert("Photosynthesis".to_string(), well_formed_reply(3));
    let provider = Arc::new(MockProvider::new(replies));
    let synth = synthesizer(provider);

    let config = QuizConfig::new("Photosynthesis", Difficulty::Intermediate, 3).unwrap();
    let mut session = QuizSession::new();
    session.apply_generation(synth.fetch(&config).await);
    assert_eq!(session.phase(), Phase::Answering);

    for i in 0..session.total() {
        session.select_label(i, "a").unwrap();
    }
    let outcome = session.submit().unwrap();
    assert_eq!(outcome.summary.correct_count, 3);
    assert_eq!(outcome.summary.grade, Grade::APlus);
}

#[tokio::test]
async fn unanswered_questions_score_as_wrong() {
    let provider = Arc::new(MockProvider::with_fixed_response(&well_formed_reply(4)));
    let synth = synthesizer(provider);

    let config = QuizConfig::new("Photosynthesis", Difficulty::Intermediate, 4).unwrap();
    let questions = synth.fetch(&config).await.unwrap();

    let mut answers = AnswerSelection::new();
    answers.select(0, "Oxygen 0");
    answers.select(1, "Helium 1");

    let (results, summary) = score(&questions, &answers).unwrap();
    assert_eq!(summary.correct_count, 1);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.percentage, 25.0);
    assert_eq!(summary.grade, Grade::F);
    assert!(results[3].selected_text.is_none());
}
