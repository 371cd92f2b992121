use super::{Action, BackgammonState, Legality, Player};
use rand::Rng;
use smallvec::SmallVec;

/// Ordered action list for one state. 32 slots cover every position the
/// reduced generator can produce without spilling to the heap.
pub type ActionList = SmallVec<[Action; 32]>;

/// Rules facade between states, the search, and the external collaborator.
///
/// Stateless: every operation takes the state it works on, and resulting
/// states are produced by cloning (states are plain `Copy` values).
#[derive(Debug, Default, Clone, Copy)]
pub struct BackgammonGame;

impl BackgammonGame {
    pub fn initial_state<R: Rng>(&self, rng: &mut R) -> BackgammonState {
        BackgammonState::initial(rng)
    }

    /// Clones `state` and applies `action` to the clone.
    ///
    /// `trusted` marks engine-originated actions whose legality was already
    /// established; human submissions pass `false` and are re-validated
    /// (an illegal code leaves the state unchanged unless no legal move
    /// exists at all, in which case the turn is skipped).
    pub fn apply<R: Rng>(
        &self,
        state: &BackgammonState,
        action: Action,
        trusted: bool,
        rng: &mut R,
    ) -> BackgammonState {
        let mut next = *state;
        next.play(action, trusted, rng);
        next
    }

    /// The reduced, ordered action set the search considers from `state`.
    /// Never empty: with no legal move it is the singleton `[PASS]`.
    ///
    /// Hits and bear-offs are prepended so the search visits likely-best
    /// moves first. The second die's plain moves are filtered against the
    /// first die's, and exactly-paired duplicates are dropped from
    /// whichever die offers more options. That pruning trades some
    /// completeness of the enumeration for a smaller branching factor; it
    /// must stay as-is to reproduce search behavior and timing.
    pub fn actions(&self, state: &BackgammonState) -> ActionList {
        let mut state = *state;
        let mut result = ActionList::new();
        let mut could_capture = false;

        for point in 0..26 {
            match state.legality(point) {
                Legality::Simple => result.push(Action::with_selected_die(point)),
                Legality::CaptureOrBearOff => {
                    result.insert(0, Action::with_selected_die(point));
                    could_capture = true;
                }
                Legality::Illegal => {}
            }
        }

        // doubles repeat the same face, so scanning the other die would
        // only duplicate states
        if !state.is_doubles() && state.change_selected_die() {
            let first_die_count = result.len();
            let mut could_capture2 = false;

            for point in 0..26 {
                match state.legality(point) {
                    Legality::CaptureOrBearOff => {
                        result.insert(0, Action::with_other_die(point));
                        could_capture2 = true;
                    }
                    Legality::Simple => {
                        // once the first die can hit or bear off, admit the
                        // second die's plain moves only when blocked for the
                        // first die or moving a barred disk
                        if !could_capture
                            || !result.contains(&Action::with_selected_die(point))
                            || point == 0
                            || point == 25
                        {
                            result.push(Action::with_other_die(point));
                        }
                    }
                    Legality::Illegal => {}
                }
            }
            state.change_selected_die();

            if !could_capture {
                // drop moves of the die with fewer options when the other
                // die already reaches the same disk (points 0/25 exempt)
                let offset = if could_capture2 || result.len() > 2 * first_die_count {
                    -super::DIE_SWAP_OFFSET
                } else {
                    super::DIE_SWAP_OFFSET
                };
                let mut i = 0;
                while i < result.len() {
                    let paired = result[i].code() + offset;
                    if paired != 0 && paired != 25 {
                        if let Some(pos) = result.iter().position(|a| a.code() == paired) {
                            result.remove(pos);
                            if pos < i {
                                i -= 1;
                            }
                            continue;
                        }
                    }
                    i += 1;
                }
            }
        }

        if result.is_empty() {
            result.push(Action::PASS);
        }
        result
    }

    /// Utility of `state` for `player`: the stored value if `player` is to
    /// move, otherwise the zero-sum complement.
    pub fn utility(&self, state: &BackgammonState, player: Player) -> f64 {
        if player == state.player_to_move() {
            state.utility()
        } else {
            1.0 - state.utility()
        }
    }

    /// Terminal states carry an absorbing utility of exactly 1.0 or 0.0.
    pub fn is_terminal(&self, state: &BackgammonState) -> bool {
        state.utility() == 1.0 || state.utility() == 0.0
    }

    pub fn winner(&self, state: &BackgammonState) -> Option<Player> {
        state.winner()
    }

    /// Display name of the winning player, once the game is over.
    pub fn winner_name(&self, state: &BackgammonState) -> Option<&'static str> {
        state.winner().map(Player::name)
    }
}
