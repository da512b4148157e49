//! All kinds of errors in this crate.

use crate::cells::Coord;
use ca_rules::ParseRuleError;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Width and height should be positive, got {0} x {1}.
    InvalidDimension(isize, isize),
    /// Cell at {0:?} is outside the board.
    OutOfBounds(Coord),
    /// Neighbor count {0} is outside 0..=8.
    RuleDomainError(usize),
    /// Invalid rule: {0:?}.
    ParseRuleError(#[from] ParseRuleError),
}
