//! Output mode control.
//!
//! [`OutputMode`] is the value of the `--output` flag. Text output uses the
//! report's `Display` impl; structured modes serialize the report directly.

use std::fmt::{self, Display};

use clap::ValueEnum;
use serde::Serialize;
use sessionseek::{LookupStatus, PropertyStore, SearchCandidate, TypedValue, ValueKind};
use sessionseek_online::SessionSearchResult;
use thiserror::Error;

/// Controls how command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Human-readable lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

impl OutputMode {
    /// Returns true for modes that serialize data instead of formatting it.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml)
    }
}

/// Errors that can occur during serialization.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Renders `data` in the given mode.
pub fn render<T: Serialize + Display>(data: &T, mode: OutputMode) -> Result<String, SerializeError> {
    match mode {
        OutputMode::Text => Ok(data.to_string()),
        OutputMode::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputMode::Yaml => Ok(serde_yaml::to_string(data)?),
    }
}

/// Result of a typed lookup, as printed by `get`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupReport {
    pub key: String,
    pub kind: ValueKind,
    pub status: LookupStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<TypedValue>,
}

/// Data produced by a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Candidates(Vec<SearchCandidate>),
    Store(PropertyStore),
    Lookup(LookupReport),
    Sessions(Vec<SessionSearchResult>),
}

fn write_properties(f: &mut fmt::Formatter<'_>, store: &PropertyStore, indent: &str) -> fmt::Result {
    for entry in store {
        writeln!(
            f,
            "{indent}{} = {} ({})",
            entry.key,
            entry.value,
            entry.value.kind()
        )?;
    }
    Ok(())
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Candidates(candidates) => {
                for candidate in candidates {
                    writeln!(f, "{}", candidate.id)?;
                    write_properties(f, &candidate.properties, "  ")?;
                }
                write!(f, "{} candidate(s)", candidates.len())
            }
            Report::Store(store) => {
                write_properties(f, store, "")?;
                write!(f, "{} setting(s)", store.len())
            }
            Report::Lookup(report) => match &report.value {
                Some(value) => write!(f, "{} = {} ({})", report.key, value, report.kind),
                None => write!(f, "{}: {} (expected {})", report.key, report.status, report.kind),
            },
            Report::Sessions(sessions) => {
                for session in sessions {
                    writeln!(
                        f,
                        "{}  owner={} ({})  ping={}ms  open={}/{}",
                        session.session_id,
                        session.owner_name,
                        session.owner_id.display_name(),
                        session.ping_ms,
                        session.open_public_connections,
                        session.settings.num_public_connections
                    )?;
                    write_properties(f, &session.settings.extra, "  ")?;
                }
                write!(f, "{} session(s)", sessions.len())
            }
        }
    }
}
