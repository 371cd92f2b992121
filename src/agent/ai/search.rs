// Iterative Deepening Expectimax Search Orchestrator
//
// Searches progressively deeper depth limits until the wall-clock budget
// runs out, a proven win is found, or one move is clearly best. Player
// decision nodes use alpha-beta pruning; whenever the turn passes to the
// other player the next dice roll is unknown, so the child value is the
// probability-weighted expectation over all 21 distinct dice pairs
// (1/18 for mixed rolls, 1/36 for doubles) rather than a plain min/max.

use super::metrics::Metrics;
use crate::game_repr::{Action, BackgammonGame, BackgammonState, Player};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;
use std::time::{Duration, Instant};

/// Margin by which one utility must beat another to count as clearly
/// better, both for the early-exit check and for keeping the partial
/// results of a deadline-cut iteration.
const SIGNIFICANCE_MARGIN: f64 = 0.03;

/// Defensive hard cap on the iterative-deepening ply limit.
const MAX_DEPTH_LIMIT: u32 = 64;

/// Result of one `propose_move` invocation.
#[derive(Debug, Clone)]
pub struct Decision {
    /// The chosen action code (`-1`, `0..=25`, or `50..=75`).
    pub action: Action,
    /// Per-depth value lines plus summary counters, keyed for display.
    pub metrics: Metrics,
    /// States expanded across the whole invocation.
    pub expanded_nodes: u64,
    /// Deepest ply actually reached.
    pub max_depth: u32,
}

/// The automated opponent: owns its time budget and a seedable RNG so
/// decisions are reproducible under fixed seeds and fixed dice.
pub struct AiPlayer {
    game: BackgammonGame,
    time_budget: Duration,
    rng: StdRng,
}

impl AiPlayer {
    pub fn new(time_budget: Duration) -> Self {
        Self {
            game: BackgammonGame,
            time_budget,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for tests and reproducible games.
    pub fn with_seed(time_budget: Duration, seed: u64) -> Self {
        Self {
            game: BackgammonGame,
            time_budget,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }

    pub fn set_time_budget(&mut self, budget: Duration) {
        self.time_budget = budget;
    }

    /// Picks an action for the player to move in `state`.
    ///
    /// Iterative deepening: each iteration re-searches the full root action
    /// list one ply deeper, with the previous iteration's best action(s)
    /// moved to the front. The deadline is checked once per root action, so
    /// the search may overrun the budget by one root subtree; that is the
    /// accepted latency bound. A zero budget still evaluates at least one
    /// root action and returns its depth-limited choice.
    pub fn propose_move(&mut self, state: &BackgammonState) -> Decision {
        let deadline = Instant::now() + self.time_budget;
        let player = state.player_to_move();
        let mut metrics = Metrics::new();

        let mut search = Search {
            game: &self.game,
            player,
            rng: &mut self.rng,
            depth_limit: 0,
            expanded_nodes: 0,
            max_depth: 0,
            cutoff_hit: false,
        };

        let mut actions: Vec<Action> = search.game.actions(state).into_vec();
        let mut results: Vec<Action> = Vec::new();
        let mut result_value = f64::NEG_INFINITY;
        let mut exit = false;

        loop {
            search.depth_limit += 1;
            search.cutoff_hit = false;
            let mut new_results: Vec<Action> = Vec::new();
            let mut new_result_value = f64::NEG_INFINITY;
            let mut second_best = f64::NEG_INFINITY;
            let mut alpha = f64::NEG_INFINITY;
            let mut log_line = format!("depth {}:", search.depth_limit);

            // previous iteration's best action(s) first, for better pruning
            for &best in &results {
                if let Some(pos) = actions.iter().position(|&a| a == best) {
                    actions.remove(pos);
                    actions.insert(0, best);
                }
            }

            for &action in &actions {
                // deadline checked at root-action granularity only; the
                // first root action of the first iteration always runs
                if Instant::now() > deadline && !(results.is_empty() && new_results.is_empty()) {
                    exit = true;
                    break;
                }

                let mut next = search.game.apply(state, action, true, &mut *search.rng);
                let value = if next.player_to_move() == player {
                    search.max_value(&next, alpha, f64::INFINITY, 1)
                } else {
                    search.expected_min(&mut next, alpha, f64::INFINITY, 1)
                };
                // suppress floating-point jitter when comparing candidates
                let value = round_value(value);

                let _ = write!(log_line, " {}->{}", action.code(), value);
                if value >= new_result_value {
                    if value > new_result_value {
                        second_best = new_result_value;
                        new_result_value = value;
                        alpha = value;
                        new_results.clear();
                    }
                    new_results.push(action);
                } else if value > second_best {
                    second_best = value;
                }
            }

            debug!("{log_line}");
            metrics.set(search.depth_limit.to_string(), log_line.as_str());

            // a mid-iteration cutoff discards its partial results unless
            // they beat the previous completed depth by a clear margin
            if !exit || significantly_better(new_result_value, result_value) {
                results = new_results;
                result_value = new_result_value;
            }

            // one clearly-best move ends the deepening early
            if results.len() == 1 && significantly_better(result_value, second_best) {
                break;
            }
            if exit
                || !search.cutoff_hit
                || result_value == 1.0
                || search.depth_limit >= MAX_DEPTH_LIMIT
            {
                break;
            }
        }

        metrics.set_u64("expanded nodes", search.expanded_nodes);
        metrics.set_u64("max depth", u64::from(search.max_depth));

        Decision {
            action: break_tie(player, &results),
            metrics,
            expanded_nodes: search.expanded_nodes,
            max_depth: search.max_depth,
        }
    }
}

/// Bookkeeping for a single `propose_move` invocation.
struct Search<'a, R: Rng> {
    game: &'a BackgammonGame,
    /// The player whose utility is being maximized.
    player: Player,
    rng: &'a mut R,
    depth_limit: u32,
    expanded_nodes: u64,
    max_depth: u32,
    /// Set when a non-terminal leaf was evaluated, i.e. deepening can
    /// still change the result.
    cutoff_hit: bool,
}

impl<R: Rng> Search<'_, R> {
    fn eval(&mut self, state: &BackgammonState) -> f64 {
        let utility = state.utility();
        if utility != 1.0 && utility != 0.0 {
            self.cutoff_hit = true;
        }
        self.game.utility(state, self.player)
    }

    /// Best obtainable value when the maximizing player is to move.
    fn max_value(&mut self, state: &BackgammonState, mut alpha: f64, beta: f64, depth: u32) -> f64 {
        self.expanded_nodes += 1;
        self.max_depth = self.max_depth.max(depth);
        if depth >= self.depth_limit || state.utility() == 1.0 || state.utility() == 0.0 {
            return self.eval(state);
        }

        let mut value: f64 = 0.0;
        for action in self.game.actions(state) {
            let mut next = self.game.apply(state, action, true, &mut *self.rng);
            let new_value = if next.player_to_move() == self.player {
                // same player continues (doubles sub-move)
                self.max_value(&next, alpha, beta, depth + 1)
            } else {
                self.expected_min(&mut next, alpha, beta, depth + 1)
            };
            if new_value >= beta {
                return new_value;
            }
            value = value.max(new_value);
            alpha = alpha.max(value);
        }
        value
    }

    /// Worst obtainable value when the opponent is to move.
    fn min_value(&mut self, state: &BackgammonState, alpha: f64, mut beta: f64, depth: u32) -> f64 {
        self.expanded_nodes += 1;
        self.max_depth = self.max_depth.max(depth);
        if depth >= self.depth_limit || state.utility() == 1.0 || state.utility() == 0.0 {
            return self.eval(state);
        }

        let mut value: f64 = 1.0;
        for action in self.game.actions(state) {
            let mut next = self.game.apply(state, action, true, &mut *self.rng);
            let new_value = if next.player_to_move() == self.player {
                self.expected_max(&mut next, alpha, beta, depth + 1)
            } else {
                self.min_value(&next, alpha, beta, depth + 1)
            };
            if new_value <= alpha {
                return new_value;
            }
            value = value.min(new_value);
            beta = beta.min(value);
        }
        value
    }

    /// Chance node entered when the turn passed to the opponent: the next
    /// roll is unknown, so sum `min_value` over every distinct dice pair.
    fn expected_min(
        &mut self,
        state: &mut BackgammonState,
        alpha: f64,
        beta: f64,
        depth: u32,
    ) -> f64 {
        let mut value = 0.0;
        for i in 1..=6u8 {
            for j in i..=6 {
                state.set_dice(i, j);
                let weight = if i == j { 36.0 } else { 18.0 };
                value += self.min_value(state, alpha, beta, depth) / weight;
            }
        }
        value
    }

    /// Chance node entered when the turn passed back to the maximizer.
    fn expected_max(
        &mut self,
        state: &mut BackgammonState,
        alpha: f64,
        beta: f64,
        depth: u32,
    ) -> f64 {
        let mut value = 0.0;
        for i in 1..=6u8 {
            for j in i..=6 {
                state.set_dice(i, j);
                let weight = if i == j { 36.0 } else { 18.0 };
                value += self.max_value(state, alpha, beta, depth) / weight;
            }
        }
        value
    }
}

/// Among value-tied actions: if the tied disks are all in the mover's home
/// quadrant, advance the one closest to bearing off; otherwise advance the
/// one furthest from it (the most vulnerable disk).
fn break_tie(player: Player, results: &[Action]) -> Action {
    let mut points: Vec<i32> = results.iter().map(|a| a.code() % 50).collect();
    points.sort_unstable();
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Action::PASS;
    };

    let chosen = if (player == Player::Black && first > 18) || (player == Player::White && last > 6)
    {
        last
    } else {
        first
    };

    // the same point may be tied under both dice; prefer the bare encoding
    if results.contains(&Action::from_code(chosen)) {
        Action::from_code(chosen)
    } else {
        Action::from_code(chosen + 50)
    }
}

fn significantly_better(new_value: f64, old_value: f64) -> bool {
    new_value - old_value > SIGNIFICANCE_MARGIN
}

/// Round to 9 decimal digits.
fn round_value(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}
