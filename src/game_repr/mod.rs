mod game;
mod player;
mod state;

#[cfg(test)]
pub(crate) mod tests;

pub use game::*;
pub use player::*;
pub use state::*;

/*-------ACTION ENCODING--------*/

// Single-integer wire format shared with the external collaborator:
//
//   -1        no legal move; applying it ends the turn
//    0..=25   move the disk at this point with the selected die
//   50..=75   swap the selected die, then move the disk at (code - 50)

/// Offset added to a point to encode "swap the selected die first".
pub const DIE_SWAP_OFFSET: i32 = 50;

/// A single move submission, wrapping the integer wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action(i32);

impl Action {
    /// The no-legal-move sentinel; applying it only advances the turn.
    pub const PASS: Action = Action(-1);

    /// Move the disk at `point` with the currently selected die.
    pub fn with_selected_die(point: usize) -> Action {
        debug_assert!(point <= 25);
        Action(point as i32)
    }

    /// Swap the selected die, then move the disk at `point`.
    pub fn with_other_die(point: usize) -> Action {
        debug_assert!(point <= 25);
        Action(point as i32 + DIE_SWAP_OFFSET)
    }

    /// Wraps an arbitrary wire code. Codes outside the legal/sentinel set
    /// stay representable; applying them untrusted is a no-op.
    pub fn from_code(code: i32) -> Action {
        Action(code)
    }

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_pass(self) -> bool {
        self.0 == -1
    }

    /// True for the `50..=75` range that plays the unselected die.
    pub fn swaps_die(self) -> bool {
        self.0 > 40
    }

    /// The board point this action moves from, if the code decodes to one.
    pub fn point(self) -> Option<usize> {
        let p = if self.0 > 40 { self.0 - DIE_SWAP_OFFSET } else { self.0 };
        if (0..=25).contains(&p) {
            Some(p as usize)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
