//! Life-like rule strings.

use super::RuleTable;
use crate::error::Error;
use ca_rules::ParseLife;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// A parser for the rule.
impl ParseLife for RuleTable {
    fn from_bs(b: Vec<u8>, s: Vec<u8>) -> Self {
        Self::new(&b, &s)
    }
}

/// Parses totalistic Life-like rule strings, e.g. `B3/S23` or `23/3`.
impl FromStr for RuleTable {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rule: RuleTable = ParseLife::parse_rule(input).map_err(Error::ParseRuleError)?;
        Ok(rule)
    }
}

/// Writes the rule in `B.../S...` notation.
impl Display for RuleTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in self.birth() {
            write!(f, "{}", n)?;
        }
        write!(f, "/S")?;
        for n in self.survival() {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}
