//! A two-state cellular automaton on a bounded rectangular grid.
//!
//! A [`Board`] steps every cell at once according to a [`RuleTable`],
//! and reports only the cells that changed, as a list of [`Delta`]s.

mod board;
mod cells;
mod config;
mod error;
pub mod rules;
mod topology;

pub use board::{Board, Info};
pub use cells::{Coord, Delta, Seeding, State};
pub use config::{Config, ConfigChange, MAX_FPS};
pub use error::Error;
pub use rules::RuleTable;
pub use topology::Topology;
