mod commands;
mod config;
mod telemetry;

use crate::{
    config::{CliArgs, Config},
    telemetry::init_tracing,
};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Missing .env is fine; flags and the process environment still apply.
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    let config = Config::try_from(args)?;

    init_tracing();

    let stdout = std::io::stdout();
    commands::run(&config.descriptor(), &config.command, &mut stdout.lock())
}
