//! Transition rules.
//!
//! For the notations of rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

mod life;

use crate::{cells::State, error::Error};
use std::cell::Cell;

/// The largest number of neighbors a cell can have.
pub const MAX_NEIGHBORS: usize = 8;

/// A table mapping `(state, live neighbor count)` to the next state.
///
/// Every entry of the `2 × 9` domain is always defined.
///
/// Entries live in [`Cell`]s, so the table can be edited through a shared
/// reference while a [`Board`](crate::Board) borrows it. Edits are picked up
/// by the next [`step`](crate::Board::step); nothing is notified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleTable {
    /// `table[state][count]`, indexed by [`State::index`].
    table: [[Cell<State>; MAX_NEIGHBORS + 1]; 2],
}

impl RuleTable {
    /// Creates a rule table from the neighbor counts that cause a birth
    /// and the neighbor counts that let a living cell survive.
    ///
    /// Counts greater than [`MAX_NEIGHBORS`] are ignored.
    pub fn new(birth: &[u8], survival: &[u8]) -> Self {
        let table = [(); 2].map(|_| [(); MAX_NEIGHBORS + 1].map(|_| Cell::new(State::Dead)));
        let rules = RuleTable { table };
        for &n in birth.iter().filter(|&&n| n as usize <= MAX_NEIGHBORS) {
            rules.table[State::Dead.index()][n as usize].set(State::Alive);
        }
        for &n in survival.iter().filter(|&&n| n as usize <= MAX_NEIGHBORS) {
            rules.table[State::Alive.index()][n as usize].set(State::Alive);
        }
        rules
    }

    /// The state of a cell in the next generation, given its current state
    /// and the number of its living neighbors.
    #[inline]
    pub fn get_next_state(&self, state: State, neighbor_count: usize) -> Result<State, Error> {
        Ok(self.entry(state, neighbor_count)?.get())
    }

    /// Overwrites one entry of the table.
    pub fn set_rule(
        &self,
        state: State,
        neighbor_count: usize,
        new_state: State,
    ) -> Result<(), Error> {
        self.entry(state, neighbor_count)?.set(new_state);
        log::trace!(
            "Rule for {:?} with {} neighbors set to {:?}",
            state,
            neighbor_count,
            new_state
        );
        Ok(())
    }

    /// Flips one entry between [`State::Dead`] and [`State::Alive`],
    /// and returns the new value.
    pub fn toggle_rule(&self, state: State, neighbor_count: usize) -> Result<State, Error> {
        let new_state = !self.get_next_state(state, neighbor_count)?;
        self.set_rule(state, neighbor_count, new_state)?;
        Ok(new_state)
    }

    /// Overwrites every entry with the corresponding entry of `other`.
    pub fn copy_from(&self, other: &RuleTable) {
        for (row, other_row) in self.table.iter().zip(&other.table) {
            for (entry, other_entry) in row.iter().zip(other_row) {
                entry.set(other_entry.get());
            }
        }
        log::trace!("Rule set to {}", self);
    }

    /// Neighbor counts at which a dead cell becomes alive.
    pub fn birth(&self) -> Vec<u8> {
        self.counts(State::Dead)
    }

    /// Neighbor counts at which a living cell stays alive.
    pub fn survival(&self) -> Vec<u8> {
        self.counts(State::Alive)
    }

    fn counts(&self, state: State) -> Vec<u8> {
        self.table[state.index()]
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.get() == State::Alive)
            .map(|(n, _)| n as u8)
            .collect()
    }

    fn entry(&self, state: State, neighbor_count: usize) -> Result<&Cell<State>, Error> {
        self.table[state.index()]
            .get(neighbor_count)
            .ok_or(Error::RuleDomainError(neighbor_count))
    }
}

/// Conway's Game of Life, `B3/S23`.
impl Default for RuleTable {
    fn default() -> Self {
        RuleTable::new(&[3], &[2, 3])
    }
}
