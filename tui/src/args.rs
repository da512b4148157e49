//! Parsing command-line arguments.

use clap::{command, error::ErrorKind, value_parser, Arg, Command, Error};
use lifeboard_lib::{Config, RuleTable};
use std::{ffi::OsString, fmt::Display, fs, path::Path};

/// A struct to store the parse results.
#[derive(Debug)]
pub(crate) struct Args {
    pub(crate) config: Config,
    pub(crate) generations: u64,
    #[cfg(feature = "tui")]
    pub(crate) no_tui: bool,
}

fn app() -> Command {
    let app = command!()
        .long_about(
            "A two-state cellular automaton on a bounded grid\n\
             \n\
             Cells outside the board are always dead. Every cell is updated \n\
             at the same time, according to a rule which can be changed \n\
             while the simulation is running.\n\
             \n\
             Keys in the TUI:\n\
             * [space] play / pause, [n] advance one generation;\n\
             * [c] clear, [r] reset, [q] quit;\n\
             * [b] or [s] followed by a digit toggles a birth or survival rule;\n\
             * [:] opens a prompt for `width N`, `height N`, `scale N`, \
             `fps N` or `rule RULE`;\n\
             * clicking a cell toggles it.\n",
        )
        .arg(
            Arg::new("X")
                .help("Width of the board")
                .index(1)
                .value_parser(value_parser!(i64).range(1..)),
        )
        .arg(
            Arg::new("Y")
                .help("Height of the board")
                .index(2)
                .value_parser(value_parser!(i64).range(1..)),
        )
        .arg(
            Arg::new("RULE")
                .help("Rule of the cellular automaton")
                .long_help(
                    "Rule of the cellular automaton\n\
                     Supports totalistic Life-like rules, e.g. B3/S23 or 23/3.\n",
                )
                .short('r')
                .long("rule")
                .value_parser(|s: &str| {
                    s.parse::<RuleTable>()
                        .map(|_| s.to_string())
                        .map_err(|e| e.to_string())
                }),
        )
        .arg(
            Arg::new("FPS")
                .help("Generations per second when running")
                .long("fps")
                .value_parser(value_parser!(i64).range(1..=1000)),
        )
        .arg(
            Arg::new("SCALE")
                .help("Size of a cell, in pixels")
                .long("scale")
                .value_parser(value_parser!(i64).range(1..)),
        )
        .arg(
            Arg::new("SEED")
                .help("Seed for the random initial board")
                .long("seed")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("CONFIG")
                .help("Reads the configuration from a JSON, YAML or TOML file")
                .long_help(
                    "Reads the configuration from a JSON, YAML or TOML file\n\
                     The format is chosen by the file extension. \
                     Other command-line arguments override the values in the file.\n",
                )
                .long("config")
                .value_parser(value_parser!(OsString)),
        )
        .arg(
            Arg::new("GENERATIONS")
                .help("Number of generations to run without the TUI")
                .short('g')
                .long("generations")
                .default_value("100")
                .value_parser(value_parser!(u64)),
        );

    #[cfg(feature = "tui")]
    let app = app.arg(
        Arg::new("NOTUI")
            .help("Runs without entering the TUI, and prints the last generation")
            .short('n')
            .long("no-tui")
            .action(clap::ArgAction::SetTrue),
    );

    app
}

fn invalid_config(path: &Path, e: impl Display) -> Error {
    Error::raw(
        ErrorKind::InvalidValue,
        format!("Invalid config file {}: {}\n", path.display(), e),
    )
}

/// Reads a configuration file, choosing the format by its extension.
fn read_config(path: &Path) -> Result<Config, Error> {
    let text = fs::read_to_string(path).map_err(|e| {
        Error::raw(
            ErrorKind::Io,
            format!("Unable to read {}: {}\n", path.display(), e),
        )
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&text).map_err(|e| invalid_config(path, e)),
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text).map_err(|e| invalid_config(path, e)),
        Some("toml") => toml::from_str(&text).map_err(|e| invalid_config(path, e)),
        _ => Err(Error::raw(
            ErrorKind::InvalidValue,
            format!(
                "Unknown config format for {}, expected .json, .yaml or .toml\n",
                path.display()
            ),
        )),
    }
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> Result<Self, Error> {
        Self::parse_from(std::env::args_os())
    }

    pub(crate) fn parse_from<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().try_get_matches_from(args)?;

        let mut config = match matches.get_one::<OsString>("CONFIG") {
            Some(path) => read_config(Path::new(path))?,
            None => Config::default(),
        };

        if let Some(&width) = matches.get_one::<i64>("X") {
            config.width = width as isize;
        }
        if let Some(&height) = matches.get_one::<i64>("Y") {
            config.height = height as isize;
        }
        if let Some(rule_string) = matches.get_one::<String>("RULE") {
            config.rule_string = rule_string.clone();
        }
        if let Some(&fps) = matches.get_one::<i64>("FPS") {
            config.fps = fps as isize;
        }
        if let Some(&scale) = matches.get_one::<i64>("SCALE") {
            config.scale = scale as isize;
        }
        if let Some(&seed) = matches.get_one::<u64>("SEED") {
            config.seed = Some(seed);
        }

        config.clamp_values();
        if config.width <= 0 || config.height <= 0 {
            return Err(Error::raw(
                ErrorKind::InvalidValue,
                format!(
                    "Width and height should be positive, got {} x {}\n",
                    config.width, config.height
                ),
            ));
        }
        if let Err(e) = config.rules() {
            return Err(Error::raw(ErrorKind::InvalidValue, format!("{}\n", e)));
        }

        let generations = matches.get_one::<u64>("GENERATIONS").copied().unwrap_or(100);

        Ok(Args {
            config,
            generations,
            #[cfg(feature = "tui")]
            no_tui: matches.get_flag("NOTUI"),
        })
    }
}
