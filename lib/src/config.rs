//! Board configuration.

use crate::{board::Board, error::Error, rules::RuleTable};
use educe::Educe;
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The largest number of frames per second.
///
/// The shortest delay between two frames is one millisecond.
pub const MAX_FPS: isize = 1000;

/// What a caller has to do after a configuration value is updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigChange {
    /// Nothing changed.
    Unchanged,
    /// The board has to be rebuilt with the new dimensions.
    Rebuild,
    /// The delay between two steps changed.
    ///
    /// A running simulation keeps its old delay until it is restarted.
    Retime,
}

/// Board configuration.
///
/// The board will be generated from this configuration.
#[derive(Clone, Debug, Educe, PartialEq, Eq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Size of a cell on the screen.
    #[educe(Default = 16)]
    pub scale: isize,

    /// Number of cells along the x-axis.
    #[educe(Default = 50)]
    pub width: isize,

    /// Number of cells along the y-axis.
    #[educe(Default = 50)]
    pub height: isize,

    /// Steps per second when the simulation is running.
    #[educe(Default = 30)]
    pub fps: isize,

    /// The rule string of the cellular automaton.
    #[educe(Default(expression = "String::from(\"B3/S23\")"))]
    pub rule_string: String,

    /// Seed for the random number generator.
    ///
    /// `None` means that the board is seeded from the system's entropy.
    pub seed: Option<u64>,
}

impl Config {
    /// Sets up a new configuration with given size.
    pub fn new(width: isize, height: isize) -> Self {
        Config {
            width,
            height,
            ..Config::default()
        }
    }

    /// Sets the scale.
    pub fn set_scale(mut self, scale: isize) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the number of steps per second.
    pub fn set_fps(mut self, fps: isize) -> Self {
        self.fps = fps;
        self
    }

    /// Sets the rule string.
    pub fn set_rule_string<S: ToString>(mut self, rule_string: S) -> Self {
        self.rule_string = rule_string.to_string();
        self
    }

    /// Sets the seed of the random number generator.
    pub fn set_seed<T: Into<Option<u64>>>(mut self, seed: T) -> Self {
        self.seed = seed.into();
        self
    }

    /// Updates the scale. Values below 1 are raised to 1.
    ///
    /// Any value other than the current one asks for a rebuild,
    /// even if it is raised to the current one.
    pub fn update_scale(&mut self, scale: isize) -> ConfigChange {
        update(&mut self.scale, scale, scale.max(1), ConfigChange::Rebuild)
    }

    /// Updates the width. Values below 1 are raised to 1.
    pub fn update_width(&mut self, width: isize) -> ConfigChange {
        update(&mut self.width, width, width.max(1), ConfigChange::Rebuild)
    }

    /// Updates the height. Values below 1 are raised to 1.
    pub fn update_height(&mut self, height: isize) -> ConfigChange {
        update(&mut self.height, height, height.max(1), ConfigChange::Rebuild)
    }

    /// Updates the number of steps per second, clamped to `1..=1000`.
    pub fn update_fps(&mut self, fps: isize) -> ConfigChange {
        update(
            &mut self.fps,
            fps,
            fps.clamp(1, MAX_FPS),
            ConfigChange::Retime,
        )
    }

    /// Raises the scale to at least 1 and clamps the fps to `1..=1000`,
    /// e.g. after reading the configuration from a file.
    pub fn clamp_values(&mut self) {
        self.scale = self.scale.max(1);
        self.fps = self.fps.clamp(1, MAX_FPS);
    }

    /// Updates the rule string.
    ///
    /// The configuration is left as it was if the rule string is invalid.
    pub fn update_rule_string(&mut self, rule_string: &str) -> Result<RuleTable, Error> {
        let rules: RuleTable = rule_string.parse()?;
        self.rule_string = rule_string.to_string();
        Ok(rules)
    }

    /// Delay between two steps.
    pub fn delay(&self) -> Duration {
        Duration::from_millis((1000 / self.fps.clamp(1, MAX_FPS)) as u64)
    }

    /// Parses the rule string.
    pub fn rules(&self) -> Result<RuleTable, Error> {
        self.rule_string.parse()
    }

    /// Creates a new randomly seeded board from the configuration.
    ///
    /// Returns an error if the width or the height is not positive.
    pub fn board<'a>(&self, rules: &'a RuleTable) -> Result<Board<'a>, Error> {
        Board::with_rng(self.width, self.height, rules, self.rng())
    }

    /// A random number generator for seeding boards.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Compares the value as entered, and stores it clamped.
fn update(field: &mut isize, value: isize, clamped: isize, change: ConfigChange) -> ConfigChange {
    if *field == value {
        ConfigChange::Unchanged
    } else {
        *field = clamped;
        change
    }
}
