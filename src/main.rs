/// ndview entry point
use std::process::ExitCode;

use clap::Parser;
use ndview::cli::{self, CliArgs};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let config = cli::load_config(&args);

    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    match cli::run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
