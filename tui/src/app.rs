//! A simulation session: the board, its configuration, and the play loop.
#![cfg_attr(not(feature = "tui"), allow(dead_code))]

use lifeboard_lib::{Board, Config, ConfigChange, Delta, Error, RuleTable, State};
use std::{
    str::FromStr,
    time::{Duration, Instant},
};

/// A configuration change typed at the prompt, e.g. `width 80`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Scale(isize),
    Width(isize),
    Height(isize),
    Fps(isize),
    Rule(String),
}

impl FromStr for Command {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let name = words.next().ok_or_else(|| String::from("Empty command"))?;
        let value = words
            .next()
            .ok_or_else(|| format!("Missing value for `{}`", name))?;
        if words.next().is_some() {
            return Err(format!("Too many values for `{}`", name));
        }
        let number = || {
            value
                .parse::<isize>()
                .map_err(|e| format!("Invalid value for `{}`: {}", name, e))
        };
        match name {
            "scale" => Ok(Command::Scale(number()?)),
            "width" | "x" => Ok(Command::Width(number()?)),
            "height" | "y" => Ok(Command::Height(number()?)),
            "fps" => Ok(Command::Fps(number()?)),
            "rule" => Ok(Command::Rule(value.to_string())),
            _ => Err(format!("Unknown command `{}`", name)),
        }
    }
}

/// What has to be redrawn after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Redraw {
    /// Nothing.
    Nothing,
    /// Only the status bar.
    Status,
    /// These cells changed.
    Cells(Vec<Delta>),
    /// The whole board: all cells are dead except these.
    Board(Vec<Delta>),
}

/// A simulation session.
///
/// Plays the part of the driving loop: it decides when the board steps,
/// and forwards edits of the configuration and the rules.
pub(crate) struct App<'a> {
    config: Config,
    board: Board<'a>,
    playing: bool,
    /// Delay between two frames, fixed when the play loop starts.
    delay: Duration,
    next_frame: Instant,
}

impl<'a> App<'a> {
    pub(crate) fn new(config: Config, rules: &'a RuleTable) -> Result<Self, Error> {
        let board = config.board(rules)?;
        let delay = config.delay();
        Ok(App {
            config,
            board,
            playing: false,
            delay,
            next_frame: Instant::now(),
        })
    }

    pub(crate) fn board(&self) -> &Board<'a> {
        &self.board
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.playing
    }

    /// Starts or stops the play loop.
    ///
    /// A new fps only takes effect when the loop is started again.
    pub(crate) fn play_pause(&mut self, now: Instant) {
        if self.playing {
            self.stop();
        } else {
            self.playing = true;
            self.delay = self.config.delay();
            self.next_frame = now;
        }
    }

    pub(crate) fn stop(&mut self) {
        self.playing = false;
    }

    /// Time left until the next frame is due, or `None` when paused.
    pub(crate) fn timeout(&self, now: Instant) -> Option<Duration> {
        self.playing
            .then(|| self.next_frame.saturating_duration_since(now))
    }

    /// Steps the board if the play loop is running and a frame is due.
    pub(crate) fn tick(&mut self, now: Instant) -> Result<Redraw, Error> {
        if !self.playing || now < self.next_frame {
            return Ok(Redraw::Nothing);
        }
        self.next_frame = now + self.delay;
        self.advance()
    }

    /// Steps the board once.
    pub(crate) fn advance(&mut self) -> Result<Redraw, Error> {
        Ok(Redraw::Cells(self.board.step()?))
    }

    pub(crate) fn clear(&mut self) -> Redraw {
        self.board.clear();
        Redraw::Board(Vec::new())
    }

    pub(crate) fn reset(&mut self) -> Redraw {
        self.board.reset();
        Redraw::Board(self.board.initial_deltas().to_vec())
    }

    pub(crate) fn toggle(&mut self, x: isize, y: isize) -> Result<Redraw, Error> {
        Ok(Redraw::Cells(vec![self.board.toggle(x, y)?]))
    }

    /// Toggles a birth rule (for a dead cell) or a survival rule (for a living cell).
    pub(crate) fn toggle_rule(&mut self, state: State, count: usize) -> Result<Redraw, Error> {
        self.board.rules().toggle_rule(state, count)?;
        Ok(Redraw::Status)
    }

    /// Applies a configuration change, rebuilding the board if needed.
    pub(crate) fn execute(&mut self, command: Command) -> Result<Redraw, Error> {
        let change = match command {
            Command::Scale(scale) => self.config.update_scale(scale),
            Command::Width(width) => self.config.update_width(width),
            Command::Height(height) => self.config.update_height(height),
            Command::Fps(fps) => self.config.update_fps(fps),
            Command::Rule(rule_string) => {
                let rules = self.config.update_rule_string(&rule_string)?;
                self.board.rules().copy_from(&rules);
                return Ok(Redraw::Status);
            }
        };
        match change {
            ConfigChange::Unchanged => Ok(Redraw::Nothing),
            ConfigChange::Retime => Ok(Redraw::Status),
            ConfigChange::Rebuild => {
                self.stop();
                self.board.resize(self.config.width, self.config.height)?;
                Ok(Redraw::Board(self.board.initial_deltas().to_vec()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{App, Command, Redraw};
    use lifeboard_lib::{Config, Error, RuleTable, State};
    use std::time::{Duration, Instant};

    fn config() -> Config {
        Config::new(10, 6).set_fps(10).set_seed(1)
    }

    #[test]
    fn parse_commands() {
        assert_eq!("width 80".parse(), Ok(Command::Width(80)));
        assert_eq!(" y  -3 ".parse(), Ok(Command::Height(-3)));
        assert_eq!("fps 60".parse(), Ok(Command::Fps(60)));
        assert_eq!(
            "rule B36/S23".parse(),
            Ok(Command::Rule(String::from("B36/S23")))
        );
        assert!("width".parse::<Command>().is_err());
        assert!("width ten".parse::<Command>().is_err());
        assert!("depth 3".parse::<Command>().is_err());
        assert!("fps 1 2".parse::<Command>().is_err());
    }

    #[test]
    fn play_loop() -> Result<(), Error> {
        let rules = RuleTable::default();
        let mut app = App::new(config(), &rules)?;
        let start = Instant::now();
        assert_eq!(app.tick(start)?, Redraw::Nothing);
        assert_eq!(app.timeout(start), None);

        app.play_pause(start);
        assert!(matches!(app.tick(start)?, Redraw::Cells(_)));
        assert_eq!(app.board().info().generation, 1);
        assert_eq!(app.tick(start + Duration::from_millis(50))?, Redraw::Nothing);
        assert_eq!(
            app.timeout(start + Duration::from_millis(50)),
            Some(Duration::from_millis(50))
        );
        assert!(matches!(
            app.tick(start + Duration::from_millis(100))?,
            Redraw::Cells(_)
        ));
        assert_eq!(app.board().info().generation, 2);

        app.play_pause(start);
        assert!(!app.is_playing());
        assert_eq!(app.tick(start + Duration::from_secs(1))?, Redraw::Nothing);
        Ok(())
    }

    #[test]
    fn fps_waits_for_restart() -> Result<(), Error> {
        let rules = RuleTable::default();
        let mut app = App::new(config(), &rules)?;
        let start = Instant::now();
        app.play_pause(start);
        app.tick(start)?;

        assert_eq!(app.execute(Command::Fps(1))?, Redraw::Status);
        assert!(app.is_playing());
        assert!(matches!(
            app.tick(start + Duration::from_millis(100))?,
            Redraw::Cells(_)
        ));

        app.play_pause(start);
        app.play_pause(start);
        app.tick(start)?;
        assert_eq!(app.timeout(start), Some(Duration::from_secs(1)));
        Ok(())
    }

    #[test]
    fn rebuild() -> Result<(), Error> {
        let rules = RuleTable::default();
        let mut app = App::new(config(), &rules)?;
        app.play_pause(Instant::now());
        app.advance()?;

        assert_eq!(app.execute(Command::Width(10))?, Redraw::Nothing);
        let redraw = app.execute(Command::Width(4))?;
        assert!(!app.is_playing());
        assert_eq!((app.board().width(), app.board().height()), (4, 6));
        assert_eq!(app.board().info().generation, 0);
        assert_eq!(
            redraw,
            Redraw::Board(app.board().initial_deltas().to_vec())
        );

        app.execute(Command::Height(0))?;
        assert_eq!(app.board().height(), 1);
        assert_eq!(app.config().height, 1);
        Ok(())
    }

    #[test]
    fn rule_edits() -> Result<(), Error> {
        let rules = RuleTable::default();
        let mut app = App::new(config(), &rules)?;
        app.toggle_rule(State::Dead, 6)?;
        assert_eq!(rules.to_string(), "B36/S23");

        app.execute(Command::Rule(String::from("B2/S")))?;
        assert_eq!(rules.to_string(), "B2/S");
        assert_eq!(app.config().rule_string, "B2/S");

        assert!(app.execute(Command::Rule(String::from("B9"))).is_err());
        assert_eq!(rules.to_string(), "B2/S");
        Ok(())
    }

    #[test]
    fn clear_and_toggle() -> Result<(), Error> {
        let rules = RuleTable::default();
        let mut app = App::new(config(), &rules)?;
        assert_eq!(app.clear(), Redraw::Board(Vec::new()));
        assert_eq!(app.board().info().live_count, 0);
        assert!(matches!(app.toggle(2, 3)?, Redraw::Cells(deltas) if deltas.len() == 1));
        assert_eq!(app.board().info().live_count, 1);
        assert!(app.toggle(10, 0).is_err());

        let redraw = app.reset();
        assert_eq!(
            redraw,
            Redraw::Board(app.board().initial_deltas().to_vec())
        );
        Ok(())
    }
}
