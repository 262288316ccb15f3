mod cli;
mod config;
mod error;
mod fame;
mod files;
mod git;
mod language;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;
use config::Settings;

fn init_logging(verbose: bool) {
    // RUST_LOG directives win; --verbose only changes the fallback level.
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = Settings::from_cli(&cli).and_then(|settings| fame::run(&settings)) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
