use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use gitpilot::assist::intent::IntentClassifier;
use gitpilot::assist::synthesizer::synthesize;
use gitpilot::git::RepositorySnapshot;
use gitpilot::git::snapshot::{ChangeKind, FileEntry};

// Sample queries for classification benchmarking
const QUERIES: &[&str] = &[
    "commit all my changes",
    "create a new branch called feature-x",
    "push to remote",
    "pull the latest updates",
    "merge the feature branch",
    "stash my work",
    "what's the current status?",
    "undo my last commit",
    "switch to branch develop",
    "something completely unrelated",
];

fn bench_classify(c: &mut Criterion) {
    let classifier = IntentClassifier::new();
    let mut group = c.benchmark_group("classify");

    for query in QUERIES {
        group.bench_with_input(BenchmarkId::from_parameter(query), query, |b, query| {
            b.iter(|| classifier.classify(black_box(query)))
        });
    }

    group.finish();
}

fn bench_synthesize(c: &mut Criterion) {
    let classifier = IntentClassifier::new();
    let mut group = c.benchmark_group("synthesize");

    let snapshot = dirty_snapshot(25);

    for query in QUERIES {
        let intent = classifier.classify(query);
        group.bench_with_input(BenchmarkId::from_parameter(query), query, |b, query| {
            b.iter(|| synthesize(black_box(&intent), black_box(&snapshot), query, "Update files"))
        });
    }

    group.finish();
}

fn bench_classify_and_synthesize(c: &mut Criterion) {
    let classifier = IntentClassifier::new();
    let snapshot = dirty_snapshot(100);

    c.bench_function("classify_and_synthesize", |b| {
        b.iter(|| {
            for query in QUERIES {
                let intent = classifier.classify(black_box(query));
                black_box(synthesize(&intent, &snapshot, query, "Update files"));
            }
        })
    });
}

fn dirty_snapshot(num_files: usize) -> RepositorySnapshot {
    RepositorySnapshot {
        current_branch: Some("main".to_string()),
        unstaged_files: (0..num_files)
            .map(|i| FileEntry::new(format!("src/module_{}/file_{}.rs", i / 10, i), ChangeKind::Modified))
            .collect(),
        ..Default::default()
    }
}

criterion_group!(
    benches,
    bench_classify,
    bench_synthesize,
    bench_classify_and_synthesize
);
criterion_main!(benches);
