use super::{Action, Player, DIE_SWAP_OFFSET};
use rand::Rng;

/*
 * MODULE IS RESPONSIBLE FOR
 * BOARD + DICE + TURN BOOKKEEPING
 */

/// Classification of a candidate move, used for move ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legality {
    Illegal,
    /// Plain advance to an open or friendly point.
    Simple,
    /// Hits a lone opposing disk or bears the disk off; searched first.
    CaptureOrBearOff,
}

/// One addressable point of the track.
///
/// Invariant: `owner` is `Some` iff `count > 0`, and a point never holds
/// disks of both players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointState {
    pub owner: Option<Player>,
    pub count: u8,
}

/// Full game state: 26 points (0 and 25 double as the bars / off-board
/// ends), two dice with per-die use counters, the selected-die index, the
/// turn counter, and the utility for the player to move.
///
/// The search clones a state at every node, so the whole struct is a flat
/// `Copy` value with no heap storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgammonState {
    pub(crate) board: [PointState; 26],
    pub(crate) dice: [u8; 2],
    pub(crate) used_dice: [u8; 2],
    pub(crate) selected_die: usize,
    pub(crate) move_count: u32,
    pub(crate) borne_off: [u8; 2],
    pub(crate) utility: f64,
}

impl BackgammonState {
    /// The canonical starting position, with dice rolled and utility 0.5.
    pub fn initial<R: Rng>(rng: &mut R) -> Self {
        let mut state = BackgammonState {
            board: [PointState::default(); 26],
            dice: [1, 1],
            used_dice: [0, 0],
            selected_die: 0,
            move_count: 0,
            borne_off: [0, 0],
            // roll_dice flips this back to 0.5
            utility: 0.5,
        };
        state.roll_dice(rng);

        state.place(1, Player::Black, 2);
        state.place(12, Player::Black, 5);
        state.place(17, Player::Black, 3);
        state.place(19, Player::Black, 5);

        state.place(6, Player::White, 5);
        state.place(8, Player::White, 3);
        state.place(13, Player::White, 5);
        state.place(24, Player::White, 2);

        state
    }

    fn place(&mut self, point: usize, owner: Player, count: u8) {
        self.board[point] = PointState {
            owner: Some(owner),
            count,
        };
    }

    /*-------READ ACCESSORS--------*/

    pub fn owner(&self, point: usize) -> Option<Player> {
        self.board[point].owner
    }

    pub fn count(&self, point: usize) -> u8 {
        self.board[point].count
    }

    /// Face value of die 0 or 1.
    pub fn die(&self, die: usize) -> u8 {
        self.dice[die]
    }

    pub fn selected_die(&self) -> usize {
        self.selected_die
    }

    /// How many times a die has been used this turn (0..=2; two uses only
    /// on a doubles roll).
    pub fn die_uses(&self, die: usize) -> u8 {
        self.used_dice[die]
    }

    pub fn is_doubles(&self) -> bool {
        self.dice[0] == self.dice[1]
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Disks this player has removed from play.
    pub fn borne_off(&self, player: Player) -> u8 {
        self.borne_off[player as usize]
    }

    /// Estimated win probability for the player to move, in [0,1].
    /// Exactly 1.0 / 0.0 are absorbing terminal values.
    pub fn utility(&self) -> f64 {
        self.utility
    }

    /// Player-to-move follows the turn counter's parity; Black moves first.
    pub fn player_to_move(&self) -> Player {
        if self.move_count % 2 == 0 {
            Player::Black
        } else {
            Player::White
        }
    }

    /// The winner, once one side has no disks left on the board. Any disk
    /// still on the board belongs to the loser.
    pub fn winner(&self) -> Option<Player> {
        for point in &self.board {
            match point.owner {
                Some(Player::Black) => return Some(Player::White),
                Some(Player::White) => return Some(Player::Black),
                None => {}
            }
        }
        None
    }

    /*-------DICE--------*/

    /// Starts a new turn: both dice re-rolled and unused, die 0 selected,
    /// utility flipped to the new mover's perspective.
    pub fn roll_dice<R: Rng>(&mut self, rng: &mut R) {
        self.dice[0] = rng.gen_range(1..=6);
        self.dice[1] = rng.gen_range(1..=6);
        self.used_dice = [0, 0];
        self.selected_die = 0;
        self.utility = 1.0 - self.utility;
    }

    /// Forces specific dice faces. Used by the search to enumerate chance
    /// outcomes and by tests; use counters are left untouched.
    pub fn set_dice(&mut self, first: u8, second: u8) {
        self.dice[0] = first;
        self.dice[1] = second;
    }

    /// Toggles the selected die if the other die still has a use left this
    /// turn (doubles grant two uses per die). Returns whether it toggled.
    pub fn change_selected_die(&mut self) -> bool {
        let other = 1 - self.selected_die;
        if self.used_dice[other] == 0 || (self.is_doubles() && self.used_dice[other] == 1) {
            self.selected_die = other;
            return true;
        }
        false
    }

    /*-------LEGALITY--------*/

    /// Whether the disk at `point`, moved by the selected die, is legal,
    /// and if so whether it hits or bears off (those are searched first).
    ///
    /// Legality requires: the point is owned by the player to move; a
    /// barred disk, if any, moves before all others; the destination is
    /// open, friendly, a lone opposing disk, or past the edge with the
    /// bear-off precondition satisfied.
    pub fn legality(&self, point: usize) -> Legality {
        let mover = self.player_to_move();
        let die = self.dice[self.selected_die] as i32;
        let dest = (point as i32 + mover.direction() * die).clamp(0, 25) as usize;
        let dest_owner = self.owner(dest);

        let valid = self.owner(point) == Some(mover)
            && (point == 0 || point == 25 || self.count(mover.bar()) == 0)
            && (dest_owner == Some(mover)
                || (dest_owner.is_none() && dest != 0 && dest != 25)
                || (dest_owner == Some(mover.opponent())
                    && self.count(dest) == 1
                    && dest != 0
                    && dest != 25)
                || ((dest == 0 || dest == 25) && self.can_bear_off(point)));

        if !valid {
            Legality::Illegal
        } else if dest_owner == Some(mover.opponent()) || dest == 0 || dest == 25 {
            Legality::CaptureOrBearOff
        } else {
            Legality::Simple
        }
    }

    /// Bear-off precondition for the disk at `point`: every disk of the
    /// mover is in the home quadrant, and either the selected die matches
    /// the remaining distance exactly, or it overshoots with no disk left
    /// on a farther point that an exact match would have to move instead.
    fn can_bear_off(&self, point: usize) -> bool {
        let die = self.dice[self.selected_die] as usize;
        match self.player_to_move() {
            Player::Black => {
                for i in 0..19 {
                    if self.owner(i) == Some(Player::Black) {
                        return false;
                    }
                }
                if point == 25 - die {
                    return true;
                }
                for i in 19..point {
                    if self.owner(i) == Some(Player::Black) {
                        return false;
                    }
                }
                true
            }
            Player::White => {
                for i in 7..26 {
                    if self.owner(i) == Some(Player::White) {
                        return false;
                    }
                }
                if point == die {
                    return true;
                }
                for i in (point + 1)..=6 {
                    if self.owner(i) == Some(Player::White) {
                        return false;
                    }
                }
                true
            }
        }
    }

    /// True when no disk of the mover can be moved with either die.
    pub(crate) fn no_legal_moves(&mut self) -> bool {
        let bar = self.player_to_move().bar();
        if self.count(bar) != 0 {
            // only the barred disk may move
            if self.legality(bar) != Legality::Illegal {
                return false;
            }
            if self.change_selected_die() {
                let found = self.legality(bar) != Legality::Illegal;
                self.change_selected_die();
                if found {
                    return false;
                }
            }
        } else {
            for point in 1..25 {
                if self.legality(point) != Legality::Illegal {
                    return false;
                }
            }
            if self.change_selected_die() {
                for point in 1..25 {
                    if self.legality(point) != Legality::Illegal {
                        self.change_selected_die();
                        return false;
                    }
                }
                self.change_selected_die();
            }
        }
        true
    }

    /*-------MUTATION--------*/

    /// Applies one action in place.
    ///
    /// `trusted` skips legality re-validation (engine-originated actions
    /// are legal by construction); untrusted submissions are re-validated
    /// and an illegal or out-of-range code is a no-op, except that when no
    /// legal move exists at all the turn is skipped and dice re-rolled.
    pub(crate) fn play<R: Rng>(&mut self, action: Action, trusted: bool, rng: &mut R) {
        let mut point = action.code();
        if trusted && point > 40 {
            point -= DIE_SWAP_OFFSET;
            self.selected_die = 1 - self.selected_die;
        }

        let movable = (0..=25).contains(&point)
            && (trusted || self.legality(point as usize) != Legality::Illegal);

        if movable {
            self.move_disk(point as usize, rng);
        } else if action.is_pass() || self.no_legal_moves() {
            self.move_count += 1;
            self.roll_dice(rng);
        }
    }

    fn move_disk<R: Rng>(&mut self, point: usize, rng: &mut R) {
        let mover = self.player_to_move();
        self.used_dice[self.selected_die] += 1;

        // non-doubles: the turn ends once both dice have moved;
        // doubles: four sub-moves, two per die
        let end_turn = (!self.is_doubles() && self.used_dice[1 - self.selected_die] == 1)
            || (self.used_dice[0] == 2 && self.used_dice[1] == 2);

        self.board[point].count -= 1;
        if self.board[point].count == 0 {
            self.board[point] = PointState::default();
        }

        let die = self.dice[self.selected_die];
        let dest = point as i32 + mover.direction() * die as i32;

        if dest <= 0 || dest >= 25 {
            // borne off; the tiny constant nudges the search toward
            // actually removing disks over shuffling them
            let remaining = if dest <= 0 { point } else { 25 - point };
            self.borne_off[mover as usize] += 1;
            self.utility += 0.00001 + remaining as f64 / 500.0;
            if self.has_no_disks(mover) {
                self.utility = 1.0;
            }
        } else {
            let dest = dest as usize;
            if self.owner(dest) == Some(mover.opponent()) {
                // hit: the lone opposing disk goes to its bar, credited by
                // how far it had traveled
                let opponent = mover.opponent();
                let bar = opponent.bar();
                self.board[bar].owner = Some(opponent);
                self.board[bar].count += 1;
                let progress = match mover {
                    Player::White => dest,
                    Player::Black => 25 - dest,
                };
                self.utility += progress as f64 / 500.0;
                self.board[dest] = PointState {
                    owner: Some(mover),
                    count: 1,
                };
            } else {
                self.board[dest].owner = Some(mover);
                self.board[dest].count += 1;
            }
            self.utility += die as f64 / 500.0;
        }

        if end_turn {
            self.move_count += 1;
            self.roll_dice(rng);
        } else {
            self.selected_die = 1 - self.selected_die;
        }
    }

    fn has_no_disks(&self, player: Player) -> bool {
        self.board.iter().all(|p| p.owner != Some(player))
    }
}
