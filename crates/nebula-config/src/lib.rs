//! Configuration for the Nebula land cover shader generator.
//!
//! Settings persist to disk as RON files and can be overridden from the
//! command line via clap. Missing fields fall back to their defaults, so older
//! config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, GeneratorConfig};
pub use error::ConfigError;
