use crate::engine::position::{ApplyMoveError, Position};
use crate::engine::types::{Cell, Player};

/// ゲームの状態。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Status {
    /// 終局（手番プレイヤーが動けない）。
    GameOver {
        /// 勝者（最後に指したプレイヤー）。
        winner: Player,
    },
    /// 進行中。
    InProgress,
}

/// 手の適用に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum PlayError {
    /// すでに終局している。
    GameOver,
    /// 指定マスが合法手ではない。
    IllegalMove,
}

/// 1ゲームの進行を管理する構造体。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Game {
    /// 現在の局面。
    position: Position,
}

impl Game {
    /// 任意の局面からゲームを再開する。
    #[inline]
    #[must_use]
    pub const fn from_position(position: Position) -> Self {
        Self { position }
    }

    /// 初期局面からゲームを開始する。
    #[inline]
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            position: Position::initial(),
        }
    }

    /// 終局しているかどうかを返す。
    #[inline]
    #[must_use]
    pub fn is_game_over(self) -> bool {
        self.position.terminal_test()
    }

    /// 1手を適用する。
    ///
    /// # Errors
    ///
    /// 次の場合にエラーを返す：
    /// - `PlayError::GameOver`: すでにゲームが終局している場合
    /// - `PlayError::IllegalMove`: 指定されたマスが合法手でない場合
    ///
    #[inline]
    pub fn play(&mut self, cell: Cell) -> Result<Status, PlayError> {
        if self.is_game_over() {
            return Err(PlayError::GameOver);
        }

        self.position = match self.position.apply_move(cell) {
            Ok(next_position) => next_position,
            Err(err) => {
                return Err(match err {
                    ApplyMoveError::IllegalMove => PlayError::IllegalMove,
                });
            }
        };

        Ok(self.status())
    }

    /// 手番プレイヤーを返す。
    #[inline]
    #[must_use]
    pub const fn player_to_move(self) -> Player {
        self.position.player()
    }

    /// 現在の局面を返す。
    #[inline]
    #[must_use]
    pub const fn position(self) -> Position {
        self.position
    }

    /// 現在のゲーム状態を返す。
    #[inline]
    #[must_use]
    pub fn status(self) -> Status {
        match self.position.winner() {
            Some(winner) => Status::GameOver { winner },
            None => Status::InProgress,
        }
    }
}
