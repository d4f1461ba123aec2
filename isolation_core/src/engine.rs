/// ゲーム進行（手番、終局判定など）の実装。
pub mod game;
/// 局面（ビットボード）とナイトの移動の実装。
pub mod position;
pub mod types;

pub type Position = position::Position;
pub type Game = game::Game;
pub type Player = types::Player;
pub type Cell = types::Cell;
pub type GameStatus = game::Status;
pub type PlayError = game::PlayError;
pub type PositionError = position::PositionError;
