use core::fmt;

use crate::engine::types::{Cell, Player};

/// 1行ぶんの盤面マスク（番兵ビットを除く 11 ビット）。
const ROW_MASK: u128 = 0x7FF;

/// 盤面全体（全マスが空いている状態）のマスク。
const BOARD_MASK: u128 = board_mask();

/// ナイトの跳躍（dx, dy）= (±1, ±2) / (±2, ±1) に対応するインデックス差。
const KNIGHT_SHIFTS: [u32; 4] = [11, 15, 25, 27];

/// 局面（空きマス、各プレイヤーの位置、手数）。
///
/// 訪れたマスは二度と空かない。プレイヤーが立っているマスも塞がっている。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    /// 各プレイヤーの現在位置（未配置なら `None`）。
    locs: [Option<Cell>; 2],
    /// 空きマスのビットボード。
    open: u128,
    /// 開始局面からの手数。
    ply_count: u32,
}

/// 着手の適用に失敗した理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ApplyMoveError {
    /// 指定マスが合法手ではない。
    IllegalMove,
}

/// `Position::from_parts` に渡された盤面が矛盾している理由。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum PositionError {
    /// プレイヤーの位置が空きマスとして指定されている。
    LocationOpen,
    /// 配置済みプレイヤーの有無が手数と合わない。
    PlyMismatch,
    /// 2人が同じマスにいる。
    SharedLocation,
}

impl Position {
    /// 手番プレイヤーの合法手（行き先マス）をインデックス昇順で返す。
    #[inline]
    #[must_use]
    pub fn actions(self) -> Vec<Cell> {
        self.liberties(self.loc(self.player()))
    }

    /// 合法性を検査せずに着手を適用する（crate 内部向け）。
    ///
    /// 行き先を塞ぎ、手番プレイヤーをそこへ移し、手数を1つ進める。
    #[inline]
    pub(crate) fn advance(self, cell: Cell) -> Self {
        let mut locs = self.locs;
        if let Some(slot) = locs.get_mut(self.player().index()) {
            *slot = Some(cell);
        }

        Self {
            locs,
            open: self.open & !cell.bit(),
            ply_count: self.ply_count.wrapping_add(1),
        }
    }

    /// 着手を適用する。
    ///
    /// # Errors
    ///
    /// 指定されたマスが合法手でない場合、`ApplyMoveError::IllegalMove` を返す。
    ///
    #[inline]
    pub fn apply_move(self, cell: Cell) -> Result<Self, ApplyMoveError> {
        let legal = self.liberty_mask(self.loc(self.player()));
        if legal & cell.bit() == u128::MIN {
            return Err(ApplyMoveError::IllegalMove);
        }

        Ok(self.advance(cell))
    }

    /// 空きマス・位置・手数から局面を組み立てる。
    ///
    /// 縮小盤面（一部のマスだけ空いた盤面）を作る用途を想定している。
    ///
    /// # Errors
    ///
    /// - `PositionError::LocationOpen`: プレイヤーの位置が `open` に含まれる場合
    /// - `PositionError::SharedLocation`: 2人の位置が同じ場合
    /// - `PositionError::PlyMismatch`: 先手は1手目以降、後手は2手目以降に配置済みでない場合
    ///
    #[inline]
    pub fn from_parts(
        open: &[Cell],
        locs: [Option<Cell>; 2],
        ply_count: u32,
    ) -> Result<Self, PositionError> {
        let open_mask = open
            .iter()
            .fold(u128::MIN, |mask, cell| mask | cell.bit())
            & BOARD_MASK;

        for cell in locs.iter().flatten() {
            if open_mask & cell.bit() != u128::MIN {
                return Err(PositionError::LocationOpen);
            }
        }

        if let [Some(first), Some(second)] = locs {
            if first == second {
                return Err(PositionError::SharedLocation);
            }
        }

        let [first, second] = locs;
        if first.is_some() != (ply_count >= 1) || second.is_some() != (ply_count >= 2) {
            return Err(PositionError::PlyMismatch);
        }

        Ok(Self {
            locs,
            open: open_mask,
            ply_count,
        })
    }

    /// 指定プレイヤーに合法手があるかを返す。
    #[inline]
    #[must_use]
    pub fn has_liberties(self, player: Player) -> bool {
        self.liberty_mask(self.loc(player)) != u128::MIN
    }

    /// 初期局面（全マスが空き、双方未配置）を返す。
    #[inline]
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            locs: [None, None],
            open: BOARD_MASK,
            ply_count: u32::MIN,
        }
    }

    /// 指定マスが空いているかを返す。
    #[inline]
    #[must_use]
    pub fn is_open(self, cell: Cell) -> bool {
        self.open & cell.bit() != u128::MIN
    }

    /// `loc` から移動できるマスをインデックス昇順で返す。
    ///
    /// `loc` が `None`（未配置）の場合は空きマスすべてを返す。
    #[inline]
    #[must_use]
    pub fn liberties(self, loc: Option<Cell>) -> Vec<Cell> {
        cells_from_mask(self.liberty_mask(loc))
    }

    /// `loc` から移動できるマスのビットボードを返す。
    fn liberty_mask(self, loc: Option<Cell>) -> u128 {
        match loc {
            Some(cell) => knight_targets(cell.bit()) & self.open,
            None => self.open,
        }
    }

    /// 指定プレイヤーの現在位置を返す。
    #[inline]
    #[must_use]
    pub fn loc(self, player: Player) -> Option<Cell> {
        self.locs.get(player.index()).copied().flatten()
    }

    /// 空きマス数を返す。
    #[inline]
    #[must_use]
    pub const fn open_count(self) -> u32 {
        self.open.count_ones()
    }

    /// 手番プレイヤーを返す。
    #[inline]
    #[must_use]
    pub const fn player(self) -> Player {
        Player::from_ply(self.ply_count)
    }

    /// 開始局面からの手数を返す。
    #[inline]
    #[must_use]
    pub const fn ply_count(self) -> u32 {
        self.ply_count
    }

    /// 手番プレイヤーに合法手が無い（終局）かを返す。
    #[inline]
    #[must_use]
    pub fn terminal_test(self) -> bool {
        !self.has_liberties(self.player())
    }

    /// 終局していれば勝者（直前に指したプレイヤー）を返す。
    #[inline]
    #[must_use]
    pub fn winner(self) -> Option<Player> {
        if self.terminal_test() {
            Some(self.player().opponent())
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    /// 上の行から順に `.`（空き）、`#`（塞がり）、`1`/`2`（プレイヤー）で描画する。
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..Cell::BOARD_HEIGHT).rev() {
            for x in 0..Cell::BOARD_WIDTH {
                let glyph = match Cell::from_xy(x, y) {
                    Some(cell) if self.loc(Player::First) == Some(cell) => '1',
                    Some(cell) if self.loc(Player::Second) == Some(cell) => '2',
                    Some(cell) if self.is_open(cell) => '.',
                    _ => '#',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// 全マスが空いた盤面マスクを組み立てる。
const fn board_mask() -> u128 {
    let mut mask = u128::MIN;
    let mut y = 0_u32;
    while y < Cell::BOARD_HEIGHT as u32 {
        let shift = y.wrapping_mul(Cell::ROW_STRIDE as u32);
        mask |= match ROW_MASK.checked_shl(shift) {
            Some(value) => value,
            None => u128::MIN,
        };
        y = y.wrapping_add(1);
    }
    mask
}

/// ビットボードの立っているビットをインデックス昇順の `Cell` 列にする。
fn cells_from_mask(mask: u128) -> Vec<Cell> {
    let cap = usize::try_from(mask.count_ones()).unwrap_or(usize::MIN);
    let mut cells = Vec::with_capacity(cap);
    let mut bb = mask;

    while bb != u128::MIN {
        if let Ok(index) = u8::try_from(bb.trailing_zeros()) {
            cells.push(Cell::from_index_unchecked(index));
        }
        bb &= bb.wrapping_sub(1);
    }

    cells
}

/// ナイトの跳躍先のビットボードを返す（空き判定なし）。
///
/// 行をまたぐ跳躍は番兵ビットに落ちるため、呼び出し側で空きマスと
/// 論理積を取れば盤外は自然に除かれる。
fn knight_targets(bits: u128) -> u128 {
    KNIGHT_SHIFTS.iter().fold(u128::MIN, |acc, &shift| {
        acc | bits.wrapping_shl(shift) | bits.wrapping_shr(shift)
    })
}
