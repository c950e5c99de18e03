use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use markwise_core::parser::{parse_exam_str, parse_submission_str};

fn exam_toml(questions: usize) -> String {
    let mut s = String::from("[exam]\nid = \"bench\"\ntitle = \"Bench\"\n\n[[groups]]\nprompt = \"Shared prompt\"\n");
    for i in 0..questions {
        s.push_str(&format!(
            "\n[[groups.questions]]\nid = \"q{i}\"\ntext = \"Question {i}\"\ntype = \"objective\"\noptions = [\"a\", \"b\", \"c\", \"d\"]\naccepted_answers = [\"{}\"]\n",
            i % 4 + 1
        ));
    }
    s
}

fn submission_json(answers: usize) -> String {
    let entries: Vec<String> = (0..answers)
        .map(|i| format!(r#"{{"group": 0, "question": {i}, "values": ["{}"]}}"#, i % 4 + 1))
        .collect();
    format!(
        r#"{{"exam_id": "bench", "elapsed_secs": 10, "answers": [{}]}}"#,
        entries.join(", ")
    )
}

fn bench_parse_exam(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_exam");
    let path = PathBuf::from("bench.toml");

    for size in [10, 100] {
        let toml = exam_toml(size);
        group.bench_function(format!("questions={size}"), |b| {
            b.iter(|| parse_exam_str(black_box(&toml), &path))
        });
    }

    group.finish();
}

fn bench_parse_submission(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_submission");

    for size in [10, 100] {
        let json = submission_json(size);
        group.bench_function(format!("answers={size}"), |b| {
            b.iter(|| parse_submission_str(black_box(&json)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_exam, bench_parse_submission);
criterion_main!(benches);
