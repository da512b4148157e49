mod app;
mod args;
#[cfg(feature = "tui")]
mod tui;

use app::App;
use args::Args;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse().unwrap_or_else(|e| e.exit());
    let rules = args.config.rules()?;
    let mut app = App::new(args.config, &rules)?;

    #[cfg(feature = "tui")]
    if !args.no_tui {
        return tui::run(app);
    }

    for _ in 0..args.generations {
        app.advance()?;
    }
    print!("{}", app.board());
    println!("{}", app.board().info());
    Ok(())
}
