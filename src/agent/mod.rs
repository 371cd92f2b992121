pub mod ai;
pub use ai::{AiPlayer, Decision, Metrics};
