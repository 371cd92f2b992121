// AI Agent - Iterative Deepening Expectimax with Alpha-Beta Pruning
//
// This module implements the automated Backgammon opponent: a depth-limited
// adversarial search over player decisions interleaved with chance nodes for
// the unknown dice rolls.
//
// Key features:
// - Iterative deepening under a wall-clock budget
// - Alpha-beta pruning at player decision nodes
// - Expectation over all 21 distinct dice outcomes at turn boundaries
// - Principal-variation-first reordering between depth iterations
// - Per-depth diagnostics returned as a value, never shared mutable state

mod metrics;
mod search;

#[cfg(test)]
mod tests;

pub use metrics::Metrics;
pub use search::{AiPlayer, Decision};
