use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fortune_bot::{Advisor, Personality};
use fortune_core::model::category::Category;
use fortune_core::model::pattern::PuzzlePattern;
use fortune_core::model::snapshot::GameSnapshot;

fn snapshot(pattern: &str, guessed: &[char]) -> GameSnapshot {
    GameSnapshot::new(
        PuzzlePattern::parse(pattern).expect("pattern"),
        guessed.iter().copied(),
        vec![800, 600, 400],
        Some(Category::Phrase),
        0,
        8,
    )
    .expect("snapshot")
}

fn recommend_bench(c: &mut Criterion) {
    let advisor = Advisor::standard();
    let mut group = c.benchmark_group("recommend");
    let cases = [
        ("fresh", snapshot("____ _____ _____ ___", &[])),
        ("mid_game", snapshot("T_E _U_C_ _RO__ _O_", &['T', 'E', 'C', 'O'])),
        (
            "late_game",
            snapshot("TH_ QU_CK _RO_N _O_", &['T', 'H', 'Q', 'U', 'C', 'K', 'R', 'O', 'N']),
        ),
    ];
    for (name, snap) in cases {
        group.bench_function(name, |b| {
            b.iter(|| black_box(advisor.recommend(black_box(&snap), Personality::balanced())))
        });
    }
    group.finish();
}

criterion_group!(benches, recommend_bench);
criterion_main!(benches);
