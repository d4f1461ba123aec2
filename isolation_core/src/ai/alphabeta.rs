use crate::ai::random;
use crate::ai::types::{ActionSink, Ai, CancelToken, State};
use crate::engine::types::Player;

mod eval;
mod limits;
mod search;

pub use eval::score;
pub use limits::{SearchAbort, SearchLimits, SearchStats};
pub use search::SearchResult;

use limits::SearchContext;
use search::{normalize_depth, search_root};

/// 探索で使う無限大（負値は `-INF`）。
pub const INF: i32 = i32::MAX;

/// 既定の探索深さ。
pub const DEFAULT_DEPTH: u8 = 3;

/// この手数未満（双方の初手）はまずランダムな手を渡しておく。
const OPENING_PLIES: u32 = 2;

/// 固定深さのアルファベータ探索で手を選ぶAI。
///
/// 初手ではランダムな手を先に渡し、探索が間に合えば探索結果で上書きする。
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Agent {
    /// 探索深さ。
    depth: u8,
    /// ノード上限。
    node_budget: u64,
    /// 初手用のランダムAI。
    opening: random::Agent,
    /// このAIのプレイヤー（評価の視点）。
    player: Player,
}

impl Agent {
    /// 探索深さを返す。
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// `player` として、初手の乱数 `seed` を指定して初期化する（深さは `DEFAULT_DEPTH`）。
    #[inline]
    #[must_use]
    pub const fn new(player: Player, seed: u64) -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            node_budget: u64::MAX,
            opening: random::Agent::new(seed),
            player,
        }
    }

    /// このAIのプレイヤーを返す。
    #[inline]
    #[must_use]
    pub const fn player(&self) -> Player {
        self.player
    }

    /// 探索深さを変更する。
    #[inline]
    #[must_use]
    pub const fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// ノード上限を変更する。
    #[inline]
    #[must_use]
    pub const fn with_node_budget(mut self, node_budget: u64) -> Self {
        self.node_budget = node_budget;
        self
    }
}

impl<S: State> Ai<S> for Agent {
    #[inline]
    fn get_action(&mut self, state: &S, sink: &mut dyn ActionSink<S::Action>, cancel: &CancelToken) {
        if state.ply_count() < OPENING_PLIES {
            if let Some(action) = self.opening.choose(state) {
                tracing::trace!(?action, ply = state.ply_count(), "opening move submitted");
                sink.put(action);
            }
        }

        let limits = SearchLimits::new(self.depth, self.node_budget);
        match search(state, self.player, limits, cancel) {
            Ok(result) => {
                let stats = result.stats();
                tracing::debug!(
                    player = %self.player,
                    best_move = ?result.best_move(),
                    best_score = result.best_score(),
                    nodes = stats.nodes(),
                    cutoffs = stats.cutoffs(),
                    evaluations = stats.evaluations(),
                    "search finished"
                );
                if let Some(action) = result.best_move() {
                    sink.put(action);
                }
            }
            Err(abort) => {
                tracing::debug!(player = %self.player, ?abort, "search aborted");
            }
        }
    }
}

/// `player` 視点で深さ `depth` のアルファベータ探索を行い、最善手を返す。
///
/// 合法手が無ければ `Ok(None)`。打ち切りは無い。
///
/// # Errors
///
/// 終局でない局面に合法手が無い場合、`SearchAbort::NoLegalMoves` を返す。
///
#[inline]
pub fn choose_move<S: State>(
    state: &S,
    player: Player,
    depth: u8,
) -> Result<Option<S::Action>, SearchAbort> {
    let limits = SearchLimits::new(depth, u64::MAX);
    match search(state, player, limits, &CancelToken::new()) {
        Ok(result) => Ok(result.best_move()),
        Err(err) => Err(err),
    }
}

/// 制限と打ち切りトークンを指定して探索する。
///
/// 深さ 0 は 1 として扱う。
///
/// # Errors
///
/// - `SearchAbort::Cancelled`: `cancel` が立った場合
/// - `SearchAbort::NodeBudget`: ノード上限に達した場合
/// - `SearchAbort::NoLegalMoves`: 終局でない局面に合法手が無い場合
///
#[inline]
pub fn search<S: State>(
    state: &S,
    player: Player,
    limits: SearchLimits,
    cancel: &CancelToken,
) -> Result<SearchResult<S::Action>, SearchAbort> {
    let depth = normalize_depth(limits.max_depth());
    let mut ctx = SearchContext::new(limits, player, cancel);
    search_root(state, depth, &mut ctx)
}
