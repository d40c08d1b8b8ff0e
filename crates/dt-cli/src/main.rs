//! Terminal front end for the Dice Todo engine.

mod repl;

use std::io::IsTerminal;
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use dt_core::{Controller, FixedDice, NullBackend, ThemeId, TodoConfig, TodoSession};

#[derive(Parser)]
#[command(
    name = "dt",
    about = "Dice Todo: gamified goals with a roll of the dice",
    version
)]
struct Cli {
    /// RNG seed for reproducible rolls
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start on a fixed theme (1-6) instead of rolling one
    #[arg(short, long)]
    theme: Option<u32>,

    /// Start with sound off
    #[arg(long)]
    mute: bool,

    /// Scripted die faces, e.g. "3,1,4" (cycled when exhausted)
    #[arg(long)]
    dice: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = TodoConfig::default().with_sound(!cli.mute);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(theme) = cli.theme {
        config = config.with_theme(ThemeId::new(theme).map_err(|e| e.to_string())?);
    }

    match cli.dice {
        Some(list) => {
            let dice = FixedDice::parse(&list).map_err(|e| e.to_string())?;
            let mut session = TodoSession::new(Controller::new(config, dice, NullBackend));
            repl::run(&mut session)
        }
        None => {
            let mut session = TodoSession::from_config(config);
            repl::run(&mut session)
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` picks the level. Logs go to stderr.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let init = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
}
