//! Table position.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A player's fixed position in the turn rotation, counted from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat(usize);

impl Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

impl From<usize> for Seat {
    fn from(index: usize) -> Self {
        Seat(index)
    }
}

impl Seat {
    /// The seat that opens every round.
    pub const FIRST: Seat = Seat(0);

    /// Returns the index of this seat.
    pub fn index(self) -> usize {
        self.0
    }

    /// The next seat in turn order, without wrapping.
    pub fn next(self) -> Seat {
        Seat(self.0 + 1)
    }

    /// Returns true if this is the last seat at a table of `seats` players.
    pub fn is_last(self, seats: usize) -> bool {
        self.0 + 1 >= seats
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_seat_rotation() {
        let seat = Seat::FIRST;
        assert!(!seat.is_last(3));
        assert!(seat.next().next().is_last(3));
        assert!(seat.is_last(1));
        assert_eq!(seat.next().to_string(), "P2");
    }
}
