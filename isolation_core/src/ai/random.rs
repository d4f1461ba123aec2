use crate::ai::types::{ActionSink, Ai, CancelToken, State};

/// 64-bit 線形合同法 (LCG) の簡易 RNG。
/// - rand クレート不使用
/// - `seed` で決定的に再現可能
#[derive(Debug, Clone, Copy)]
struct Lcg64 {
    /// 内部状態。
    state: u64,
}

impl Lcg64 {
    /// LCG の内部状態を `seed` から初期化する。
    #[inline]
    const fn new(seed: u64) -> Self {
        // seed が 0 でも動くように軽く攪拌
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    /// 次の u32 を生成する（上位 32bit を返す）。
    #[inline]
    fn next_u32(&mut self) -> u32 {
        // PCG 系で採用される LCG 定数
        const LCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
        const LCG_INCREMENT: u64 = 1_442_695_040_888_963_407;

        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);

        u32::try_from(self.state >> 32).unwrap_or(u32::MAX)
    }
}

/// 合法手から一様ランダムに1手を選択するAI。
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Agent {
    /// 乱数生成器。
    rng: Lcg64,
}

impl Agent {
    /// 合法手から一様に1手選ぶ（合法手なしなら `None`）。
    #[inline]
    pub fn choose<S: State>(&mut self, state: &S) -> Option<S::Action> {
        let actions = state.actions();
        let index = pick_index(actions.len(), self.rng.next_u32());
        actions.get(index).copied()
    }

    /// `seed` を用いて初期化する。
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            rng: Lcg64::new(seed),
        }
    }
}

impl<S: State> Ai<S> for Agent {
    #[inline]
    fn get_action(
        &mut self,
        state: &S,
        sink: &mut dyn ActionSink<S::Action>,
        _cancel: &CancelToken,
    ) {
        if let Some(action) = self.choose(state) {
            sink.put(action);
        }
    }
}

/// `len` 個の候補から `random` に基づき1つのインデックスを選ぶ。
///
/// `random * len` の上位 32bit を使うので、剰余より偏りが小さい。
fn pick_index(len: usize, random: u32) -> usize {
    let len_u64 = u64::try_from(len).unwrap_or(u64::MAX);
    let product = u64::from(random).wrapping_mul(len_u64);
    usize::try_from(product.wrapping_shr(32)).unwrap_or(usize::MIN)
}

#[cfg(test)]
mod tests {
    use super::{Agent, pick_index};
    use crate::ai::types::{Ai as _, CancelToken};
    use crate::engine::position::Position;
    use crate::engine::types::Cell;

    #[test]
    fn pick_index_stays_in_range() {
        assert_eq!(pick_index(1, u32::MAX), 0);
        assert_eq!(pick_index(10, u32::MAX), 9);
        assert_eq!(pick_index(10, 0), 0);
        assert_eq!(pick_index(0, 12345), 0);
    }

    #[test]
    fn same_seed_gives_same_choices() {
        let position = Position::initial();
        let mut a = Agent::new(7);
        let mut b = Agent::new(7);

        for _ in 0..16 {
            assert_eq!(a.choose(&position), b.choose(&position));
        }
    }

    #[test]
    fn delivers_exactly_one_legal_move() {
        let position = Position::initial();
        let mut agent = Agent::new(3);
        let mut sink: Vec<Cell> = Vec::new();

        agent.get_action(&position, &mut sink, &CancelToken::new());

        assert_eq!(sink.len(), 1);
        assert!(sink.iter().all(|mv| position.actions().contains(mv)));
    }

    #[test]
    fn choices_spread_over_the_board() {
        let position = Position::initial();
        let mut agent = Agent::new(11);
        let mut seen = Vec::new();

        for _ in 0..200 {
            if let Some(cell) = agent.choose(&position) {
                if !seen.contains(&cell) {
                    seen.push(cell);
                }
            }
        }

        assert!(seen.len() > 50, "only {} distinct cells drawn", seen.len());
    }
}
