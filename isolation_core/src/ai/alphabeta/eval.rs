use crate::ai::types::State;
use crate::engine::types::Player;

/// `player` 視点のモビリティ評価。
///
/// 自分の合法手数 `own` と相手の合法手数 `opp` から
/// - `own < opp` なら `2 * own - opp`（劣勢側は自分の手数を重く見る）
/// - それ以外なら `own - 2 * opp`（優勢側は相手を縛る手を重く見る）
///
/// 終局局面にも同じ式を使う（動けない側の手数が 0 になるだけ）。
#[inline]
pub fn score<S: State>(state: &S, player: Player) -> i32 {
    let own = liberty_count(state, player);
    let opp = liberty_count(state, player.opponent());
    mobility_score(own, opp)
}

/// 非対称モビリティ式。
pub(super) const fn mobility_score(own: i32, opp: i32) -> i32 {
    if own < opp {
        own.wrapping_mul(2).wrapping_sub(opp)
    } else {
        own.wrapping_sub(opp.wrapping_mul(2))
    }
}

/// 指定プレイヤーの現在位置からの合法手数。
fn liberty_count<S: State>(state: &S, player: Player) -> i32 {
    let liberties = state.liberties(state.loc(player));
    i32::try_from(liberties.len()).unwrap_or(i32::MAX)
}
