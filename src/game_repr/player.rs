/// One of the two fixed player identities.
///
/// Black moves clockwise (ascending points, bearing off past 24), White
/// counterclockwise (descending points, bearing off past 1). Black moves
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Travel direction along the point indices.
    pub fn direction(self) -> i32 {
        match self {
            Player::Black => 1,
            Player::White => -1,
        }
    }

    /// The bar point holding this player's captured disks. A barred disk
    /// must re-enter before any other disk may move.
    pub fn bar(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 25,
        }
    }

    /// Display name for the external collaborator.
    pub fn name(self) -> &'static str {
        match self {
            Player::Black => "Black (Clockwise)",
            Player::White => "White (Counterclockwise)",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
