//! Command-line front end for sessionseek.
//!
//! The binary reads candidate lists, settings stores, constraint lists and
//! search requests from JSON or YAML files and prints results as text, JSON
//! or YAML. The pieces are exposed as a library so they can be tested
//! without spawning the binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
pub mod parse;

pub use cli::Cli;
pub use commands::run;
pub use config::ConfigError;
pub use output::OutputMode;
pub use parse::ParseError;
