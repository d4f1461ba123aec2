//! Knight's Isolation core logic.
//!
//! このクレートは盤面と対局進行を管理する `engine`、手を選択する `ai`、
//! 持ち時間つきで AI 同士を対局させる `arena` を提供します。
//! CLI（`isolation_cli`）から利用されることを想定しています。

#![forbid(unsafe_code)]

/// ゲームルール・局面・進行を提供するモジュール。
pub mod engine;

/// AI（手選択アルゴリズム）を提供するモジュール。
pub mod ai;

/// 持ち時間つきの対局進行を提供するモジュール。
pub mod arena;
