use crate::agent::ai::AiPlayer;
use crate::game_repr::tests::{empty_state, place, rng};
use crate::game_repr::{Action, BackgammonGame, BackgammonState, Player};
use std::time::Duration;

fn budget(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

#[test]
fn forced_move_is_found_with_any_nonzero_budget() {
    // one Black disk left, doubles: exactly one legal action
    let mut state = empty_state(2, 2);
    place(&mut state, 23, Player::Black, 1);
    place(&mut state, 1, Player::White, 2);

    let mut ai = AiPlayer::with_seed(budget(50), 1);
    let decision = ai.propose_move(&state);

    assert_eq!(decision.action, Action::with_selected_die(23));
    assert!(decision.expanded_nodes > 0);
}

#[test]
fn zero_budget_still_returns_a_legal_action() {
    let game = BackgammonGame;
    let mut rng = rng();
    let mut state = BackgammonState::initial(&mut rng);
    state.set_dice(6, 5);

    let mut ai = AiPlayer::with_seed(budget(0), 1);
    let decision = ai.propose_move(&state);

    assert!(game.actions(&state).contains(&decision.action));
    assert!(decision.expanded_nodes >= 1);
    assert!(decision.max_depth >= 1);
}

#[test]
fn expansion_grows_with_the_time_budget() {
    let mut rng = rng();
    let mut state = BackgammonState::initial(&mut rng);
    state.set_dice(6, 5);

    let starved = AiPlayer::with_seed(budget(0), 1).propose_move(&state);
    let fed = AiPlayer::with_seed(budget(30), 1).propose_move(&state);

    assert!(fed.expanded_nodes >= starved.expanded_nodes);
    assert!(fed.max_depth >= starved.max_depth);
}

#[test]
fn blocked_player_proposes_the_pass_sentinel() {
    let mut state = empty_state(3, 4);
    place(&mut state, 0, Player::Black, 1);
    place(&mut state, 3, Player::White, 2);
    place(&mut state, 4, Player::White, 2);

    let mut ai = AiPlayer::with_seed(budget(10), 1);
    let decision = ai.propose_move(&state);

    assert_eq!(decision.action, Action::PASS);
}

#[test]
fn proven_win_ends_the_search_and_breaks_ties_toward_the_edge() {
    // both disks can start bearing off; either order wins next turn
    let mut state = empty_state(2, 5);
    place(&mut state, 23, Player::Black, 1);
    place(&mut state, 20, Player::Black, 1);
    place(&mut state, 1, Player::White, 2);

    let mut ai = AiPlayer::with_seed(budget(200), 1);
    let decision = ai.propose_move(&state);

    // 23 and 20 tie at a certain win; the disk closest to bearing off goes
    assert_eq!(decision.action, Action::with_selected_die(23));
    assert!(decision.max_depth >= 2);
}

#[test]
fn diagnostics_cover_every_completed_depth() {
    let mut rng = rng();
    let mut state = BackgammonState::initial(&mut rng);
    state.set_dice(6, 5);

    let mut ai = AiPlayer::with_seed(budget(20), 1);
    let decision = ai.propose_move(&state);

    let first_depth = decision.metrics.get("1").expect("depth 1 always runs");
    assert!(first_depth.starts_with("depth 1:"));
    assert!(first_depth.contains("->"));
    assert_eq!(
        decision.metrics.get("expanded nodes"),
        Some(decision.expanded_nodes.to_string().as_str())
    );
    assert_eq!(
        decision.metrics.get("max depth"),
        Some(decision.max_depth.to_string().as_str())
    );
}

#[test]
fn decisions_are_reproducible_under_a_fixed_seed() {
    let mut state = empty_state(2, 2);
    place(&mut state, 23, Player::Black, 1);
    place(&mut state, 20, Player::Black, 2);
    place(&mut state, 1, Player::White, 2);

    let first = AiPlayer::with_seed(budget(20), 7).propose_move(&state);
    let second = AiPlayer::with_seed(budget(20), 7).propose_move(&state);

    assert_eq!(first.action, second.action);
}
