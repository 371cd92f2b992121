use super::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ==================== HELPER FUNCTIONS ====================

/// Deterministic RNG for tests that roll dice.
pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0xBACC)
}

/// A state with an empty board, fixed dice, Black to move, utility 0.5.
/// Tests place disks explicitly, so conservation does not hold for these
/// synthetic positions.
pub fn empty_state(first_die: u8, second_die: u8) -> BackgammonState {
    BackgammonState {
        board: [PointState::default(); 26],
        dice: [first_die, second_die],
        used_dice: [0, 0],
        selected_die: 0,
        move_count: 0,
        borne_off: [0, 0],
        utility: 0.5,
    }
}

pub fn place(state: &mut BackgammonState, point: usize, owner: Player, count: u8) {
    state.board[point] = PointState {
        owner: Some(owner),
        count,
    };
}

/// Hands the turn to White (parity flip only; dice are left as set).
pub fn white_to_move(state: &mut BackgammonState) {
    state.move_count += 1;
}

/// Disks of `player` on the board (bar included) plus its borne-off count.
pub fn total_disks(state: &BackgammonState, player: Player) -> u32 {
    let on_board: u32 = (0..26)
        .filter(|&p| state.owner(p) == Some(player))
        .map(|p| u32::from(state.count(p)))
        .sum();
    on_board + u32::from(state.borne_off(player))
}

// ==================== TEST MODULES ====================

mod legality;
