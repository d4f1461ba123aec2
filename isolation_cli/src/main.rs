//! 持ち時間つきで AI 同士を対局させる CLI。

use core::time::Duration;

use anyhow::{Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use isolation_core::ai::types::{ActionSink, Ai};
use isolation_core::ai::{self, CancelToken};
use isolation_core::{arena, engine};
use tracing_subscriber::EnvFilter;

/// 対局させる AI の種類。
#[derive(Clone, Copy, Debug, ValueEnum)]
enum AgentKind {
    /// 固定深さのアルファベータ探索。
    Alphabeta,
    /// 合法手から一様ランダム。
    Random,
}

/// ログの出力形式。
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    /// 1行 1 イベントの JSON。
    Json,
    /// 人間向けの整形出力。
    Pretty,
}

/// Knight's Isolation の AI 同士を対局させる。
#[derive(Debug, Parser)]
#[command(name = "isolation", version, long_about = None)]
struct Cli {
    /// 1手あたりの探索深さ（alphabeta のみ）。
    #[arg(long, default_value_t = ai::alphabeta::DEFAULT_DEPTH)]
    depth: u8,

    /// 先手の AI。
    #[arg(long, value_enum, default_value_t = AgentKind::Alphabeta)]
    first: AgentKind,

    /// 対局数。
    #[arg(long, short = 'g', default_value_t = 10)]
    games: u32,

    /// ログの出力形式（フィルタは `RUST_LOG`、既定は info）。
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// 後手の AI。
    #[arg(long, value_enum, default_value_t = AgentKind::Random)]
    second: AgentKind,

    /// 乱数の種（対局ごとにずらして使う）。
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// 各対局の終局図を表示する。
    #[arg(long)]
    show_board: bool,

    /// 1手あたりの持ち時間（ミリ秒）。
    #[arg(long, default_value_t = arena::DEFAULT_TIME_LIMIT_MS)]
    time_limit_ms: u64,
}

/// 席ごとの AI。
#[derive(Debug)]
enum Controller {
    Alphabeta(ai::alphabeta::Agent),
    Random(ai::random::Agent),
}

impl Controller {
    fn new(kind: AgentKind, player: engine::Player, depth: u8, seed: u64) -> Self {
        match kind {
            AgentKind::Alphabeta => {
                Self::Alphabeta(ai::alphabeta::Agent::new(player, seed).with_depth(depth))
            }
            AgentKind::Random => Self::Random(ai::random::Agent::new(seed)),
        }
    }
}

impl Ai<engine::Position> for Controller {
    fn get_action(
        &mut self,
        state: &engine::Position,
        sink: &mut dyn ActionSink<engine::Cell>,
        cancel: &CancelToken,
    ) {
        match self {
            Self::Alphabeta(agent) => agent.get_action(state, sink, cancel),
            Self::Random(agent) => agent.get_action(state, sink, cancel),
        }
    }
}

/// 勝敗の集計。
#[derive(Debug, Default)]
struct Tally {
    first_wins: u32,
    forfeits: u32,
    second_wins: u32,
}

impl Tally {
    fn record(&mut self, record: &arena::MatchRecord) {
        match record.winner() {
            engine::Player::First => self.first_wins = self.first_wins.saturating_add(1),
            _ => self.second_wins = self.second_wins.saturating_add(1),
        }
        if matches!(record.outcome(), arena::Outcome::Forfeit(_)) {
            self.forfeits = self.forfeits.saturating_add(1);
        }
    }
}

fn init_tracing(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    if cli.games == 0 {
        bail!("--games must be at least 1");
    }
    if cli.time_limit_ms == 0 {
        bail!("--time-limit-ms must be at least 1");
    }

    let config = arena::MatchConfig::new(Duration::from_millis(cli.time_limit_ms));
    let mut tally = Tally::default();

    for game in 0..cli.games {
        let base_seed = cli.seed.wrapping_add(u64::from(game).wrapping_mul(2));
        let mut first = Controller::new(cli.first, engine::Player::First, cli.depth, base_seed);
        let mut second = Controller::new(
            cli.second,
            engine::Player::Second,
            cli.depth,
            base_seed.wrapping_add(1),
        );

        let span = tracing::info_span!("game", number = game.wrapping_add(1));
        let _entered = span.enter();

        let record = arena::play_match(&mut first, &mut second, config);
        println!(
            "game {:>3}: {} wins after {} plies ({:?})",
            game.wrapping_add(1),
            record.winner(),
            record.history().len(),
            record.outcome()
        );
        if cli.show_board {
            println!("{}", record.position());
        }
        tally.record(&record);
    }

    println!(
        "{:?} (first) {} - {} {:?} (second), {} forfeit(s)",
        cli.first, tally.first_wins, tally.second_wins, cli.second, tally.forfeits
    );

    Ok(())
}
