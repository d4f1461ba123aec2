use core::fmt::Debug;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::sync::mpsc::Sender;

use crate::engine::position::Position;
use crate::engine::types::{Cell, Player};

/// AI が局面に要求する最小限のインターフェース。
///
/// 探索は局面を書き換えず、`result` で新しい局面を得るだけ。
pub trait State: Sized {
    /// 合法手。
    type Action: Copy + Debug + Eq;
    /// プレイヤーの位置。
    type Loc: Copy + Debug + Eq;

    /// 手番プレイヤーの合法手を返す（順序は探索順・タイブレークに使われる）。
    fn actions(&self) -> Vec<Self::Action>;

    /// `loc` から移動できる手を返す。
    fn liberties(&self, loc: Option<Self::Loc>) -> Vec<Self::Action>;

    /// 指定プレイヤーの現在位置を返す。
    fn loc(&self, player: Player) -> Option<Self::Loc>;

    /// 開始局面からの手数を返す。
    fn ply_count(&self) -> u32;

    /// `action` を適用した局面を返す（`action` は `actions()` の要素であること）。
    fn result(&self, action: Self::Action) -> Self;

    /// 手番プレイヤーに合法手が無いかを返す。
    fn terminal_test(&self) -> bool;
}

impl State for Position {
    type Action = Cell;
    type Loc = Cell;

    #[inline]
    fn actions(&self) -> Vec<Cell> {
        Self::actions(*self)
    }

    #[inline]
    fn liberties(&self, loc: Option<Cell>) -> Vec<Cell> {
        Self::liberties(*self, loc)
    }

    #[inline]
    fn loc(&self, player: Player) -> Option<Cell> {
        Self::loc(*self, player)
    }

    #[inline]
    fn ply_count(&self) -> u32 {
        Self::ply_count(*self)
    }

    #[inline]
    fn result(&self, action: Cell) -> Self {
        self.advance(action)
    }

    #[inline]
    fn terminal_test(&self) -> bool {
        Self::terminal_test(*self)
    }
}

/// 選んだ手の受け渡し先。
///
/// 何度 `put` してもよく、打ち切られた時点で最後に渡した手が採用される。
pub trait ActionSink<A> {
    /// 候補手を1つ渡す。
    fn put(&mut self, action: A);
}

impl<A> ActionSink<A> for Vec<A> {
    #[inline]
    fn put(&mut self, action: A) {
        self.push(action);
    }
}

impl<A: Debug> ActionSink<A> for Sender<A> {
    #[inline]
    fn put(&mut self, action: A) {
        if let Err(err) = self.send(action) {
            tracing::trace!(action = ?err.0, "receiver dropped; action discarded");
        }
    }
}

/// 外部から探索を打ち切るためのトークン。
///
/// クローンは同じフラグを共有する。
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    /// 打ち切り要求フラグ。
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// 打ち切りを要求する。
    #[inline]
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// 打ち切りが要求されているかを返す。
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// 未要求のトークンを生成する。
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// 手を選択するAI。
pub trait Ai<S: State> {
    /// 現在局面から手を選び、`sink` へ1回以上渡す。
    ///
    /// `cancel` が立ったら速やかに戻ること。それまでに渡した手は有効なまま。
    fn get_action(&mut self, state: &S, sink: &mut dyn ActionSink<S::Action>, cancel: &CancelToken);
}
