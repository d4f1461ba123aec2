use crate::ai::types::State;

use super::INF;
use super::eval::score;
use super::limits::{SearchAbort, SearchContext, SearchStats};

/// 探索結果。
#[derive(Clone, Copy, Debug)]
pub struct SearchResult<A> {
    /// ルートで選択した最善手（合法手なしなら `None`）。
    best_move: Option<A>,
    /// `best_move` の評価値。
    best_score: i32,
    /// 探索統計。
    stats: SearchStats,
}

impl<A: Copy> SearchResult<A> {
    /// ルートで選択した最善手を返す。
    #[inline]
    #[must_use]
    pub const fn best_move(&self) -> Option<A> {
        self.best_move
    }

    /// `best_move` の評価値を返す。
    #[inline]
    #[must_use]
    pub const fn best_score(&self) -> i32 {
        self.best_score
    }

    /// 探索統計を返す。
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// 探索深さを正規化する（0の場合は1にする）。
#[inline]
pub(super) const fn normalize_depth(depth: u8) -> u8 {
    if depth == u8::MIN {
        u8::MIN.wrapping_add(1)
    } else {
        depth
    }
}

/// ルート探索（固定深さ、ルートは最大化ノード）。
///
/// 窓は毎回 (-INF, INF) から始める。同点の手は `actions()` の先に出た方を残す。
/// ルートの子は `depth - 1` で探索する。
pub(super) fn search_root<S: State>(
    state: &S,
    depth: u8,
    ctx: &mut SearchContext<'_>,
) -> Result<SearchResult<S::Action>, SearchAbort> {
    if let Err(err) = ctx.enter_node() {
        return Err(err);
    }

    let mut alpha = -INF;
    let beta = INF;
    let mut best_score = -INF;
    let mut best_move: Option<S::Action> = None;
    let next_depth = depth.saturating_sub(1);

    for action in state.actions() {
        let value = match min_value(&state.result(action), next_depth, alpha, beta, ctx) {
            Ok(value) => value,
            Err(err) => return Err(err),
        };
        if value > alpha {
            alpha = value;
        }
        // 全手が -INF でも先頭の手は必ず返す。
        if value > best_score || best_move.is_none() {
            best_score = value;
            best_move = Some(action);
        }
    }

    Ok(SearchResult {
        best_move,
        best_score,
        stats: ctx.stats(),
    })
}

/// 葉（終局または深さ切れ）を評価する。
fn evaluate_leaf<S: State>(state: &S, ctx: &mut SearchContext<'_>) -> i32 {
    ctx.stats_mut().inc_evaluations();
    score(state, ctx.root_player())
}

/// 最大化ノード。
pub(super) fn max_value<S: State>(
    state: &S,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> Result<i32, SearchAbort> {
    if let Err(err) = ctx.enter_node() {
        return Err(err);
    }

    if state.terminal_test() || depth == u8::MIN {
        return Ok(evaluate_leaf(state, ctx));
    }

    let actions = state.actions();
    if actions.is_empty() {
        return Err(SearchAbort::NoLegalMoves);
    }

    let next_depth = depth.saturating_sub(1);
    let mut value = -INF;

    for action in actions {
        let child = match min_value(&state.result(action), next_depth, alpha, beta, ctx) {
            Ok(child) => child,
            Err(err) => return Err(err),
        };
        if child > value {
            value = child;
        }
        if value >= beta {
            ctx.stats_mut().inc_cutoffs();
            return Ok(value);
        }
        if value > alpha {
            alpha = value;
        }
    }

    Ok(value)
}

/// 最小化ノード。
pub(super) fn min_value<S: State>(
    state: &S,
    depth: u8,
    alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext<'_>,
) -> Result<i32, SearchAbort> {
    if let Err(err) = ctx.enter_node() {
        return Err(err);
    }

    if state.terminal_test() || depth == u8::MIN {
        return Ok(evaluate_leaf(state, ctx));
    }

    let actions = state.actions();
    if actions.is_empty() {
        return Err(SearchAbort::NoLegalMoves);
    }

    let next_depth = depth.saturating_sub(1);
    let mut value = INF;

    for action in actions {
        let child = match max_value(&state.result(action), next_depth, alpha, beta, ctx) {
            Ok(child) => child,
            Err(err) => return Err(err),
        };
        if child < value {
            value = child;
        }
        if value <= alpha {
            ctx.stats_mut().inc_cutoffs();
            return Ok(value);
        }
        if value < beta {
            beta = value;
        }
    }

    Ok(value)
}

/// 枝刈りなしのミニマックス値（テスト用の基準実装）。
///
/// `maximizing` はこのノードが最大化側かどうか。深さの数え方と評価関数は
/// アルファベータ探索と同じ。
#[cfg(test)]
pub(super) fn minimax_value<S: State>(
    state: &S,
    depth: u8,
    maximizing: bool,
    root_player: crate::engine::types::Player,
) -> i32 {
    if state.terminal_test() || depth == u8::MIN {
        return score(state, root_player);
    }

    let values = state
        .actions()
        .into_iter()
        .map(|action| {
            minimax_value(
                &state.result(action),
                depth.saturating_sub(1),
                !maximizing,
                root_player,
            )
        });

    if maximizing {
        values.fold(-INF, i32::max)
    } else {
        values.fold(INF, i32::min)
    }
}
