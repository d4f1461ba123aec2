use crate::ai::types::CancelToken;
use crate::engine::types::Player;

/// 探索の制限。
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchLimits {
    /// 探索の最大深さ（ply、ルートの1手を含む）。
    max_depth: u8,
    /// 探索のノード上限。
    node_budget: u64,
}

impl SearchLimits {
    /// 探索の最大深さ（ply）を返す。
    #[inline]
    #[must_use]
    pub const fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// 探索制限を生成する。
    ///
    /// - `max_depth`: 探索の最大深さ（ply）
    /// - `node_budget`: 探索のノード上限（`u64::MAX` で無制限扱い）
    #[inline]
    #[must_use]
    pub const fn new(max_depth: u8, node_budget: u64) -> Self {
        Self {
            max_depth,
            node_budget,
        }
    }

    /// 探索のノード上限を返す。
    #[inline]
    #[must_use]
    pub const fn node_budget(&self) -> u64 {
        self.node_budget
    }
}

/// 探索統計。
#[derive(Default, Clone, Copy, Debug)]
pub struct SearchStats {
    /// アルファ/ベータカットで枝刈りした回数。
    cutoffs: u64,
    /// 評価関数を呼んだ回数。
    evaluations: u64,
    /// 探索したノード数。
    nodes: u64,
}

impl SearchStats {
    /// 枝刈りの回数を返す。
    #[inline]
    #[must_use]
    pub const fn cutoffs(&self) -> u64 {
        self.cutoffs
    }

    /// 評価関数の呼び出し回数を返す。
    #[inline]
    #[must_use]
    pub const fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// 枝刈りの回数を加算する。
    pub(super) const fn inc_cutoffs(&mut self) {
        self.cutoffs = self.cutoffs.wrapping_add(1);
    }

    /// 評価関数の呼び出し回数を加算する。
    pub(super) const fn inc_evaluations(&mut self) {
        self.evaluations = self.evaluations.wrapping_add(1);
    }

    /// 探索ノード数を加算する。
    pub(super) const fn inc_nodes(&mut self) {
        self.nodes = self.nodes.wrapping_add(1);
    }

    /// 探索ノード数を返す。
    #[inline]
    #[must_use]
    pub const fn nodes(&self) -> u64 {
        self.nodes
    }
}

/// 探索を中断した理由。
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[non_exhaustive]
pub enum SearchAbort {
    /// 外部から打ち切りを要求された。
    Cancelled,
    /// 終局でない局面に合法手が無かった（`State` 実装の不整合）。
    NoLegalMoves,
    /// ノード上限に達した。
    NodeBudget,
}

/// 1回の探索で共有するコンテキスト。
pub(super) struct SearchContext<'ctx> {
    /// 打ち切り要求。
    cancel: &'ctx CancelToken,
    /// 探索制限。
    limits: SearchLimits,
    /// 評価の視点となるプレイヤー（探索を始めたプレイヤー）。
    root_player: Player,
    /// 探索統計。
    stats: SearchStats,
}

impl<'ctx> SearchContext<'ctx> {
    /// ノードに入るたびに呼び、打ち切り要求とノード上限を確認する。
    pub(super) fn enter_node(&mut self) -> Result<(), SearchAbort> {
        if self.cancel.is_cancelled() {
            return Err(SearchAbort::Cancelled);
        }

        self.stats.inc_nodes();
        if self.stats.nodes() > self.limits.node_budget() {
            return Err(SearchAbort::NodeBudget);
        }

        Ok(())
    }

    /// 探索コンテキストを生成する。
    pub(super) const fn new(
        limits: SearchLimits,
        root_player: Player,
        cancel: &'ctx CancelToken,
    ) -> Self {
        Self {
            cancel,
            limits,
            root_player,
            stats: SearchStats {
                cutoffs: 0,
                evaluations: 0,
                nodes: 0,
            },
        }
    }

    /// 評価の視点となるプレイヤーを返す。
    pub(super) const fn root_player(&self) -> Player {
        self.root_player
    }

    /// 探索統計を返す。
    pub(super) const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// 探索統計への可変参照を返す。
    pub(super) const fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }
}
