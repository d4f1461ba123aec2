//! 持ち時間つきの対局進行。
//!
//! 1手ごとに AI をワーカースレッドで動かし、受け渡しチャネルに届いた最後の手を
//! 採用する。持ち時間が切れたら `CancelToken` で探索を打ち切る。

use core::time::Duration;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use crate::ai::types::{Ai, CancelToken};
use crate::engine::game::{Game, PlayError, Status};
use crate::engine::position::Position;
use crate::engine::types::{Cell, Player};

/// 既定の1手あたりの持ち時間（ミリ秒）。
pub const DEFAULT_TIME_LIMIT_MS: u64 = 150;

/// 対局の設定。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatchConfig {
    /// 1手あたりの持ち時間。
    time_limit: Duration,
}

impl MatchConfig {
    /// 持ち時間を指定して生成する。
    #[inline]
    #[must_use]
    pub const fn new(time_limit: Duration) -> Self {
        Self { time_limit }
    }

    /// 1手あたりの持ち時間を返す。
    #[inline]
    #[must_use]
    pub const fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl Default for MatchConfig {
    #[inline]
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TIME_LIMIT_MS))
    }
}

/// 反則負けの理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Forfeit {
    /// 持ち時間内に手が届かなかった。
    NoMove,
    /// 合法手でない手が届いた。
    IllegalMove(Cell),
}

/// 対局の決着のつき方。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Outcome {
    /// 相手が動けなくなった。
    Isolated,
    /// 相手が反則負けした。
    Forfeit(Forfeit),
}

/// 1局の記録。
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchRecord {
    /// 指された手（先手から交互）。
    history: Vec<Cell>,
    /// 決着のつき方。
    outcome: Outcome,
    /// 終局時の局面。
    position: Position,
    /// 勝者。
    winner: Player,
}

impl MatchRecord {
    /// 指された手を返す。
    #[inline]
    #[must_use]
    pub fn history(&self) -> &[Cell] {
        &self.history
    }

    /// 決着のつき方を返す。
    #[inline]
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// 終局時の局面を返す。
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// 勝者を返す。
    #[inline]
    #[must_use]
    pub const fn winner(&self) -> Player {
        self.winner
    }
}

/// `agent` に1手考えさせ、持ち時間内に届いた最後の手を返す。
///
/// 持ち時間が切れると打ち切りを要求し、ワーカーの終了を待ってから戻る。
/// 打ち切り後に届いた手は採用しない。
#[inline]
pub fn take_turn<A>(agent: &mut A, position: Position, time_limit: Duration) -> Option<Cell>
where
    A: Ai<Position> + Send + ?Sized,
{
    let (sender, receiver) = mpsc::channel::<Cell>();
    let cancel = CancelToken::new();
    let started = Instant::now();

    thread::scope(|scope| {
        let worker_cancel = cancel.clone();
        let worker = scope.spawn(move || {
            let mut sink = sender;
            agent.get_action(&position, &mut sink, &worker_cancel);
        });

        let mut last = None;
        loop {
            let remaining = time_limit.saturating_sub(started.elapsed());
            match receiver.recv_timeout(remaining) {
                Ok(cell) => last = Some(cell),
                Err(RecvTimeoutError::Timeout) => {
                    tracing::debug!(?time_limit, "time limit reached; cancelling agent");
                    cancel.cancel();
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        if worker.join().is_err() {
            tracing::warn!("agent panicked while choosing a move");
        }

        last
    })
}

/// 2つの AI を初期局面から対局させる。
///
/// 手が届かない、または合法手でない手が届いた側は反則負け。
#[inline]
pub fn play_match<A, B>(first: &mut A, second: &mut B, config: MatchConfig) -> MatchRecord
where
    A: Ai<Position> + Send + ?Sized,
    B: Ai<Position> + Send + ?Sized,
{
    let mut game = Game::initial();
    let mut history = Vec::new();

    loop {
        let position = game.position();
        let player = position.player();
        let choice = match player {
            Player::First => take_turn(first, position, config.time_limit()),
            Player::Second => take_turn(second, position, config.time_limit()),
        };

        let Some(cell) = choice else {
            tracing::warn!(%player, ply = position.ply_count(), "no move delivered in time");
            return forfeit(history, position, player, Forfeit::NoMove);
        };

        match game.play(cell) {
            Ok(Status::InProgress) => history.push(cell),
            Ok(Status::GameOver { winner }) => {
                history.push(cell);
                tracing::info!(%winner, plies = history.len(), "game over");
                return MatchRecord {
                    history,
                    outcome: Outcome::Isolated,
                    position: game.position(),
                    winner,
                };
            }
            Err(PlayError::IllegalMove) => {
                tracing::warn!(%player, %cell, "illegal move delivered");
                return forfeit(history, position, player, Forfeit::IllegalMove(cell));
            }
            Err(PlayError::GameOver) => {
                // 手番側が動けない局面から始まった場合のみ。
                return MatchRecord {
                    history,
                    outcome: Outcome::Isolated,
                    position,
                    winner: player.opponent(),
                };
            }
        }
    }
}

/// `loser` の反則負けとして記録を作る。
fn forfeit(history: Vec<Cell>, position: Position, loser: Player, reason: Forfeit) -> MatchRecord {
    MatchRecord {
        history,
        outcome: Outcome::Forfeit(reason),
        position,
        winner: loser.opponent(),
    }
}
