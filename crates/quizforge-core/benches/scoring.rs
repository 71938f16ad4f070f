use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizforge_core::model::{AnswerOption, AnswerSelection, Question, OPTION_LABELS};
use quizforge_core::results::Grade;
use quizforge_core::scoring::{completion_fraction, score};

fn make_quiz(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| {
            let options = OPTION_LABELS
                .iter()
                .map(|l| AnswerOption::new(*l, format!("option {l} of {i}")))
                .collect();
            Question::new(format!("Question {i}?"), options, "c", None).unwrap()
        })
        .collect()
}

fn answers(questions: &[Question], correct_every: usize) -> AnswerSelection {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let label = if i % correct_every == 0 { "c" } else { "a" };
            (i, q.option_text(label).unwrap().to_string())
        })
        .collect()
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");

    let small = make_quiz(5);
    let small_answers = answers(&small, 1);
    let max = make_quiz(15);
    let max_answers = answers(&max, 2);
    let huge = make_quiz(1000);
    let huge_answers = answers(&huge, 3);

    group.bench_function("5_all_correct", |b| {
        b.iter(|| score(black_box(&small), black_box(&small_answers)))
    });
    group.bench_function("15_half_correct", |b| {
        b.iter(|| score(black_box(&max), black_box(&max_answers)))
    });
    group.bench_function("1000_third_correct", |b| {
        b.iter(|| score(black_box(&huge), black_box(&huge_answers)))
    });

    group.finish();
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    group.bench_function("from_percentage", |b| {
        b.iter(|| Grade::from_percentage(black_box(73.3)))
    });
    group.bench_function("completion_fraction", |b| {
        b.iter(|| completion_fraction(black_box(7), black_box(15)))
    });

    group.finish();
}

criterion_group!(benches, bench_score, bench_grade);
criterion_main!(benches);
