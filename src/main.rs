//! Touch Gesture Automaton Compiler

use clap::Parser;
use gesture_dfa::{Config, Result, VERSION, cli, init_logging};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // The log level lives in the config, so the file is read before logging starts
    let (config, config_path) = Config::resolve(args.config.clone())?;
    init_logging(&config.logging.level);

    tracing::info!("Touch gesture automaton compiler v{}", VERSION);
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults"),
    }
    tracing::debug!("Parsed arguments: {:?}", args);
    tracing::debug!("Loaded configuration: {:?}", config);

    cli::execute(args, config)?;

    Ok(())
}
