//! Command-line arguments for the land cover shader generator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Land cover shader generator arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "nebula-landcover-gen", about = "Generate land cover GLSL from a manifest")]
pub struct CliArgs {
    /// Land cover manifest (RON).
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Output directory for generated shaders.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// GLSL `#version` of generated sources.
    #[arg(long)]
    pub glsl_version: Option<u32>,

    /// Prefix for every generated identifier.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Exit with an error if any configuration warning was raised.
    #[arg(long)]
    pub deny_warnings: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref manifest) = args.manifest {
            self.generator.manifest = Some(manifest.clone());
        }
        if let Some(ref dir) = args.out_dir {
            self.generator.output_dir = dir.clone();
        }
        if let Some(version) = args.glsl_version {
            self.generator.glsl_version = version;
        }
        if let Some(ref prefix) = args.prefix {
            self.generator.symbol_prefix = prefix.clone();
        }
        if args.deny_warnings {
            self.generator.deny_warnings = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
