//! Cells in the cellular automaton.

use rand::{distributions::Distribution, Rng};
use std::ops::Not;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The state of a cell.
///
/// A cell has no identity beyond its position on the board,
/// so the board stores nothing but its state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum State {
    Dead,
    Alive,
}

/// Flips the state.
impl Not for State {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        match self {
            State::Alive => State::Dead,
            State::Dead => State::Alive,
        }
    }
}

impl State {
    /// Index of the state in a rule table row.
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            State::Dead => 0,
            State::Alive => 1,
        }
    }
}

/// The coordinates of a cell.
///
/// `(x-coordinate, y-coordinate)`, both 0-indexed.
/// Signed so that positions left of or above the board can still be
/// represented, and rejected.
pub type Coord = (isize, isize);

/// A cell whose state changed as a direct result of an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Delta {
    /// Where the cell is.
    pub coord: Coord,
    /// The new state of the cell.
    pub state: State,
}

impl Delta {
    #[inline]
    pub(crate) fn new(coord: Coord, state: State) -> Self {
        Delta { coord, state }
    }
}

/// How a fresh board is seeded.
///
/// Each cell draws uniformly from `{0, 1, 2}` and is [`State::Alive`]
/// on `0`, so roughly a third of the board starts alive.
#[derive(Clone, Copy, Debug, Default)]
pub struct Seeding;

impl Distribution<State> for Seeding {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> State {
        match rng.gen_range(0..3) {
            0 => State::Alive,
            _ => State::Dead,
        }
    }
}
