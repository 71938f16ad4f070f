//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizforge(home: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizforge").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("QUIZFORGE_GEMINI_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("QUIZFORGE_OPENAI_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn question_json(prompt: &str, correct: &str) -> serde_json::Value {
    serde_json::json!({
        "prompt": prompt,
        "options": [
            {"label": "a", "text": "Mercury"},
            {"label": "b", "text": "Venus"},
            {"label": "c", "text": "Earth"},
            {"label": "d", "text": "Mars"}
        ],
        "correct_label": correct,
        "explanation": "Count outward from the sun."
    })
}

fn write_json(dir: &TempDir, name: &str, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

#[test]
fn help_output() {
    let home = TempDir::new().unwrap();
    quizforge(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("multiple-choice quiz"));
}

#[test]
fn version_output() {
    let home = TempDir::new().unwrap();
    quizforge(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizforge"));
}

#[test]
fn init_creates_files() {
    let home = TempDir::new().unwrap();

    quizforge(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizforge.toml"))
        .stdout(predicate::str::contains("Created sample.txt"));

    assert!(home.path().join("quizforge.toml").exists());
    assert!(home.path().join("sample.txt").exists());
}

#[test]
fn init_skips_existing() {
    let home = TempDir::new().unwrap();

    quizforge(&home).arg("init").assert().success();

    quizforge(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn list_models_without_config() {
    let home = TempDir::new().unwrap();
    quizforge(&home)
        .arg("list-models")
        .assert()
        .success()
        .stdout(predicate::str::contains("No providers configured"));
}

#[test]
fn list_models_for_configured_provider() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("quizforge.toml"),
        "[providers.gemini]\ntype = \"gemini\"\napi_key = \"k\"\n",
    )
    .unwrap();

    quizforge(&home)
        .arg("list-models")
        .arg("--provider")
        .arg("gemini")
        .assert()
        .success()
        .stdout(predicate::str::contains("Provider: gemini"))
        .stdout(predicate::str::contains("gemini-1.5-flash"));
}

#[test]
fn take_requires_source_text() {
    let home = TempDir::new().unwrap();
    quizforge(&home)
        .arg("take")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--text"));
}

#[test]
fn take_rejects_out_of_range_question_count() {
    let home = TempDir::new().unwrap();
    quizforge(&home)
        .args(["take", "--text", "Volcanoes", "--questions", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 3 and 15"));
}

#[test]
fn take_without_configured_provider() {
    let home = TempDir::new().unwrap();
    quizforge(&home)
        .args(["take", "--text", "Volcanoes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("provider 'gemini' is not configured"));
}

#[test]
fn generate_missing_source_file() {
    let home = TempDir::new().unwrap();
    quizforge(&home)
        .args(["generate", "--file", "no_such_file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read source text"));
}

#[test]
fn grade_saved_answers() {
    let home = TempDir::new().unwrap();
    let questions = write_json(
        &home,
        "questions.json",
        &serde_json::json!([
            question_json("Which planet is closest to the sun?", "a"),
            question_json("Which planet is third from the sun?", "c"),
            question_json("Which planet is fourth from the sun?", "d")
        ]),
    );
    let answers = write_json(
        &home,
        "answers.json",
        &serde_json::json!({"0": "Mercury", "1": "Venus", "2": "Mars"}),
    );

    quizforge(&home)
        .arg("grade")
        .arg("--questions")
        .arg(&questions)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 2/3 (66.7%)"))
        .stdout(predicate::str::contains("Grade: C"));
}

#[test]
fn grade_as_json() {
    let home = TempDir::new().unwrap();
    let questions = write_json(
        &home,
        "questions.json",
        &serde_json::json!([
            question_json("Which planet is closest to the sun?", "a"),
            question_json("Which planet is second from the sun?", "b"),
            question_json("Which planet is third from the sun?", "c")
        ]),
    );
    let answers = write_json(&home, "answers.json", &serde_json::json!({}));

    let output = quizforge(&home)
        .arg("grade")
        .arg("--questions")
        .arg(&questions)
        .arg("--answers")
        .arg(&answers)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["summary"]["correct_count"], 0);
    assert_eq!(report["summary"]["grade"], "F");
    assert_eq!(report["results"][1]["selected_text"], serde_json::Value::Null);
}

#[test]
fn grade_rejects_unknown_correct_label() {
    let home = TempDir::new().unwrap();
    let questions = write_json(
        &home,
        "questions.json",
        &serde_json::json!([question_json("Which planet has rings?", "e")]),
    );
    let answers = write_json(&home, "answers.json", &serde_json::json!({"0": "Mars"}));

    quizforge(&home)
        .arg("grade")
        .arg("--questions")
        .arg(&questions)
        .arg("--answers")
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("question 1 is invalid"))
        .stderr(predicate::str::contains("correct label 'e'"));
}

#[test]
fn grade_nonexistent_files() {
    let home = TempDir::new().unwrap();
    quizforge(&home)
        .args([
            "grade",
            "--questions",
            "no_such_file.json",
            "--answers",
            "also_no_file.json",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
