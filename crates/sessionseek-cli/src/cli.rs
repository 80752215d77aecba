//! Command-line definition.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use sessionseek::{FilterConstraint, PropertyEntry};

use crate::output::OutputMode;
use crate::parse::{parse_constraint, parse_entry};

/// Filter, merge and query typed session settings.
#[derive(Debug, Parser)]
#[command(name = "sessionseek", version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputMode::Text, global = true)]
    pub output: OutputMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Keep the candidates that satisfy every constraint
    Filter(FilterArgs),
    /// Merge updates into a settings store
    Merge(MergeArgs),
    /// Read one setting with an expected kind
    Get(GetArgs),
    /// Run a session search against a file of results
    #[command(alias = "query")]
    Search(SearchArgs),
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Candidate list (JSON or YAML)
    pub candidates: PathBuf,

    /// File holding a list of constraints
    #[arg(short, long)]
    pub filters: Option<PathBuf>,

    /// Constraint expression, e.g. "Slots >= 2"; repeatable
    #[arg(short = 'w', long = "where", value_parser = parse_constraint)]
    pub constraints: Vec<FilterConstraint>,

    /// Reject constraints whose comparator cannot apply to their value
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Base settings store
    pub base: PathBuf,

    /// File holding the updates
    #[arg(short, long)]
    pub updates: Option<PathBuf>,

    /// Update expression, e.g. "Map=Harbor"; applied after the file
    #[arg(short, long = "set", value_parser = parse_entry)]
    pub set: Vec<PropertyEntry>,
}

/// Kinds accepted by `get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// An int32 setting narrowed to its low eight bits
    Byte,
    Bool,
    Int32,
    Int64,
    Float,
    Double,
    String,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Settings store
    pub store: PathBuf,

    /// Setting name
    pub key: String,

    /// Expected kind
    #[arg(short, long, value_enum, default_value_t = KindArg::String)]
    pub kind: KindArg,

    /// Fail unless the setting exists with the expected kind
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search results the backend returns (JSON or YAML)
    pub results: PathBuf,

    /// Search request file
    #[arg(short, long)]
    pub request: Option<PathBuf>,

    /// Extra filter expression; repeatable
    #[arg(short = 'w', long = "where", value_parser = parse_constraint)]
    pub constraints: Vec<FilterConstraint>,

    /// Maximum number of results, overriding the request file
    #[arg(short, long)]
    pub max_results: Option<usize>,

    /// Search LAN sessions
    #[arg(long)]
    pub lan: bool,

    /// Id of the searching player
    #[arg(long, default_value = "local-player")]
    pub player: String,
}
