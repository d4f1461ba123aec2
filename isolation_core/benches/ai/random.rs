//! `core::ai::random` の性能計測（1手選択）。

use criterion::BatchSize;
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
fn position_after_plies(plies: u16) -> engine::Position {
    let mut first_agent = ai::random::Agent::new(u64::MIN);
    let mut game = engine::Game::initial();
    let mut second_agent = ai::random::Agent::new(u64::MIN.wrapping_add(1));

    for _turn in u16::MIN..plies {
        let position = game.position();

        let choice = match game.player_to_move() {
            engine::Player::First => first_agent.choose(&position),
            _ => second_agent.choose(&position),
        };
        let Some(cell) = choice else {
            break;
        };

        match game.play(cell) {
            Ok(engine::GameStatus::InProgress) => {}
            Ok(_) | Err(_) => break,
        }
    }

    game.position()
}

/// ベンチ用に代表局面をいくつか用意する。
fn position_samples() -> [engine::Position; 3] {
    let p0 = engine::Position::initial();
    let p1 = position_after_plies(6);
    let p2 = position_after_plies(20);
    [p0, p1, p2]
}

/// `random::Agent::choose` を計測する。
fn bench_choose(criterion: &mut Criterion) {
    let samples = position_samples();
    let mut group = criterion.benchmark_group("ai/random/choose");

    for (index, position) in samples.iter().enumerate() {
        let bench_id = BenchmarkId::new("pos", index);
        group.bench_with_input(bench_id, position, |bench, input| {
            bench.iter_batched(
                || ai::random::Agent::new(u64::MIN),
                |mut agent| black_box(agent.choose(input)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

/// ベンチマークのエントリーポイント。
fn main() {
    let mut criterion = criterion_configured();
    bench_choose(&mut criterion);
    criterion.final_summary();
}
