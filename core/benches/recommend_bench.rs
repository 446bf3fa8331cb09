use criterion::{criterion_group, criterion_main, Criterion};
use jobmatch_core::{Posting, Recommender, RecommenderConfig};

const WORDS: &[&str] = &[
    "rust", "python", "kubernetes", "docker", "postgres", "react", "typescript", "machine", "learning",
    "statistics", "terraform", "aws", "linux", "networking", "security", "design", "testing", "golang",
];

fn synthetic_postings(n: usize) -> Vec<Posting> {
    (0..n)
        .map(|i| {
            let pick = |k: usize| WORDS[(i * 7 + k * 3) % WORDS.len()];
            Posting {
                id: i.to_string(),
                title: format!("{} engineer", pick(0)),
                company: "Acme".into(),
                location: "Remote".into(),
                description: (0..40).map(pick).collect::<Vec<_>>().join(" "),
                skills: format!("{}, {}; {}", pick(1), pick(2), pick(3)),
            }
        })
        .collect()
}

fn bench_recommend(c: &mut Criterion) {
    let rec = Recommender::new(synthetic_postings(2_000), RecommenderConfig::default());
    let resume = "Rust and python engineer with docker, kubernetes and postgres experience";
    c.bench_function("recommend_2000_postings", |b| b.iter(|| rec.recommend(resume, None, None)));
}

criterion_group!(benches, bench_recommend);
criterion_main!(benches);
