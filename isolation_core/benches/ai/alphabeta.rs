//! `core::ai::alphabeta` の性能計測（固定深さ探索）。

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::black_box;
use isolation_core::{ai, engine};

/// `cargo bench` の引数を取り込みつつ `Criterion` を生成する。
fn criterion_configured() -> Criterion {
    let base = Criterion::default();
    base.configure_from_args()
}

/// ランダム同士で指定手数だけ進めた局面を返す（途中で終局した場合はその時点で止める）。
fn position_after_plies(plies: u16, seed: u64) -> engine::Position {
    let mut agent = ai::random::Agent::new(seed);
    let mut game = engine::Game::initial();

    for _turn in u16::MIN..plies {
        let Some(cell) = agent.choose(&game.position()) else {
            break;
        };
        match game.play(cell) {
            Ok(engine::GameStatus::InProgress) => {}
            Ok(_) | Err(_) => break,
        }
    }

    game.position()
}

/// `alphabeta::choose_move` を深さ別に計測する。
fn bench_choose_move(criterion: &mut Criterion) {
    let samples = [
        position_after_plies(2, 7),
        position_after_plies(10, 7),
        position_after_plies(24, 7),
    ];
    let mut group = criterion.benchmark_group("ai/alphabeta/choose_move");

    for depth in [1_u8, 3, 5] {
        for (index, position) in samples.iter().enumerate() {
            let bench_id = BenchmarkId::new(format!("depth{depth}"), index);
            let player = position.player();
            group.bench_with_input(bench_id, position, |bench, input| {
                bench.iter(|| black_box(ai::alphabeta::choose_move(input, player, depth)));
            });
        }
    }

    group.finish();
}

/// `alphabeta::score` を計測する。
fn bench_score(criterion: &mut Criterion) {
    let position = position_after_plies(10, 11);
    let player = position.player();

    criterion.bench_function("ai/alphabeta/score", |bench| {
        bench.iter(|| black_box(ai::alphabeta::score(black_box(&position), player)));
    });
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();

    bench_choose_move(&mut criterion);
    bench_score(&mut criterion);

    criterion.final_summary();
}
