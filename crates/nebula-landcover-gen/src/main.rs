//! Command-line land cover shader generator.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p nebula-landcover-gen -- --manifest landcover.ron --out-dir shaders`.

mod generate;

use std::process::ExitCode;

use clap::Parser;
use nebula_config::{CliArgs, Config};
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(Config::default_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    nebula_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match generate::run(&config.generator) {
        Ok(report) => {
            let warnings = report.warning_count();
            if warnings > 0 {
                warn!("{warnings} configuration warning(s); see log for details");
            }
            info!(
                "Generated {} shader(s) into {}",
                report.written.len(),
                config.generator.output_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
