use core::fmt;

/// プレイヤー（席）。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Player {
    /// 先手（player id 0）。
    First,
    /// 後手（player id 1）。
    Second,
}

impl Player {
    /// 手数から手番のプレイヤーを返す（偶数手目は先手）。
    #[inline]
    #[must_use]
    pub const fn from_ply(ply_count: u32) -> Self {
        if ply_count & 1 == u32::MIN {
            Self::First
        } else {
            Self::Second
        }
    }

    /// player id（0 または 1）を返す。
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// 相手側のプレイヤーを返す。
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl fmt::Display for Player {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::First => f.write_str("player 1"),
            Self::Second => f.write_str("player 2"),
        }
    }
}

/// 盤面上のマス。
///
/// 内部表現は `y * ROW_STRIDE + x` のビット位置。各行の右端 2 ビットは
/// 常に塞がった番兵で、ナイトの跳躍が行をまたいで折り返すのを防ぐ。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Cell(
    /// ビットボード上のインデックス。
    u8,
);

impl Cell {
    /// 盤の縦の長さ。
    pub const BOARD_HEIGHT: u8 = 9;

    /// 盤の横の長さ。
    pub const BOARD_WIDTH: u8 = 11;

    /// 1行あたりのビット数（横の長さ + 番兵 2 ビット）。
    pub const ROW_STRIDE: u8 = 13;

    /// そのマスを表すビット（`u128`）を返す。
    #[inline]
    #[must_use]
    pub fn bit(self) -> u128 {
        let one = u128::MIN.wrapping_add(1);
        let shift = u32::from(self.0);

        one.checked_shl(shift).unwrap_or(u128::MIN)
    }

    /// インデックスから `Cell` を生成する（範囲チェックなし）。
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Self {
        Self(index)
    }

    /// 盤面座標（x, y）から `Cell` を生成する。
    #[inline]
    #[must_use]
    pub const fn from_xy(x: u8, y: u8) -> Option<Self> {
        if x >= Self::BOARD_WIDTH || y >= Self::BOARD_HEIGHT {
            return None;
        }

        let mut idx = match y.checked_mul(Self::ROW_STRIDE) {
            Some(value) => value,
            None => return None,
        };

        idx = match idx.checked_add(x) {
            Some(value) => value,
            None => return None,
        };

        Some(Self(idx))
    }

    /// ビットボード上のインデックスを返す。
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// x 座標（0..=10）を返す。
    #[inline]
    #[must_use]
    pub const fn x(self) -> u8 {
        match self.0.checked_rem(Self::ROW_STRIDE) {
            Some(value) => value,
            None => u8::MIN,
        }
    }

    /// y 座標（0..=8）を返す。
    #[inline]
    #[must_use]
    pub const fn y(self) -> u8 {
        match self.0.checked_div(Self::ROW_STRIDE) {
            Some(value) => value,
            None => u8::MIN,
        }
    }
}

impl fmt::Display for Cell {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}
