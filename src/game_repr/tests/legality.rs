use super::*;

#[test]
fn cannot_move_from_empty_or_opposing_point() {
    let mut state = empty_state(3, 4);
    place(&mut state, 5, Player::Black, 1);
    place(&mut state, 10, Player::White, 2);

    assert_eq!(state.legality(7), Legality::Illegal); // empty
    assert_eq!(state.legality(10), Legality::Illegal); // opponent's disks
    assert_eq!(state.legality(5), Legality::Simple);
}

#[test]
fn move_to_open_or_friendly_point_is_simple() {
    let mut state = empty_state(3, 4);
    place(&mut state, 5, Player::Black, 2);
    place(&mut state, 8, Player::Black, 1);

    // 5 + 3 lands on our own point 8
    assert_eq!(state.legality(5), Legality::Simple);
    // 8 + 3 lands on the empty point 11
    assert_eq!(state.legality(8), Legality::Simple);
}

#[test]
fn lone_opposing_disk_can_be_hit() {
    let mut state = empty_state(3, 4);
    place(&mut state, 5, Player::Black, 1);
    place(&mut state, 8, Player::White, 1);

    assert_eq!(state.legality(5), Legality::CaptureOrBearOff);
}

#[test]
fn two_opposing_disks_block_the_point() {
    let mut state = empty_state(3, 4);
    place(&mut state, 5, Player::Black, 1);
    place(&mut state, 8, Player::White, 2);

    assert_eq!(state.legality(5), Legality::Illegal);
}

#[test]
fn barred_disk_must_move_first() {
    let mut state = empty_state(3, 4);
    place(&mut state, 0, Player::Black, 1); // Black's bar
    place(&mut state, 12, Player::Black, 2);

    assert_eq!(state.legality(12), Legality::Illegal);
    // entering from the bar lands on the empty point 3
    assert_eq!(state.legality(0), Legality::Simple);
}

#[test]
fn bar_entry_blocked_by_opposing_stack() {
    let mut state = empty_state(3, 4);
    place(&mut state, 0, Player::Black, 1);
    place(&mut state, 3, Player::White, 2);

    assert_eq!(state.legality(0), Legality::Illegal);
}

#[test]
fn bar_entry_can_hit_a_blot() {
    let mut state = empty_state(3, 4);
    place(&mut state, 0, Player::Black, 1);
    place(&mut state, 3, Player::White, 1);

    assert_eq!(state.legality(0), Legality::CaptureOrBearOff);
}

#[test]
fn white_moves_in_the_opposite_direction() {
    let mut state = empty_state(3, 4);
    white_to_move(&mut state);
    place(&mut state, 20, Player::White, 1);
    place(&mut state, 17, Player::Black, 1);

    // 20 - 3 hits the Black blot at 17
    assert_eq!(state.legality(20), Legality::CaptureOrBearOff);

    place(&mut state, 17, Player::Black, 2);
    assert_eq!(state.legality(20), Legality::Illegal);
}

#[test]
fn white_bar_is_point_25() {
    let mut state = empty_state(3, 4);
    white_to_move(&mut state);
    place(&mut state, 25, Player::White, 1);
    place(&mut state, 13, Player::White, 3);

    assert_eq!(state.legality(13), Legality::Illegal);
    // 25 - 3 enters at the empty point 22
    assert_eq!(state.legality(25), Legality::Simple);
}
