pub mod agent;
pub mod game_repr;

pub use agent::ai::{AiPlayer, Decision, Metrics};
pub use game_repr::{Action, BackgammonGame, BackgammonState, Legality, Player};
