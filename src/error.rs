//! Library error type and the structured error surfaced by the CLI.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while loading, validating or rendering a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset is not a discoveries array, report object or discoveries-data.js file")]
    UnrecognizedDataset,

    #[error("Record #{index} ({owner}/{name}) has score {score}, expected an integer in [0, 10]")]
    DataContract {
        index: usize,
        owner: String,
        name: String,
        score: i64,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CatalogError {
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::Read { .. } | CatalogError::Write { .. } => "io",
            CatalogError::Json(_) | CatalogError::UnrecognizedDataset => "parse",
            CatalogError::DataContract { .. } => "data-contract",
            CatalogError::Config(_) => "config",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CatalogError::Config(_) => 3,
            CatalogError::Json(_)
            | CatalogError::UnrecognizedDataset
            | CatalogError::DataContract { .. } => 4,
            CatalogError::Read { .. } | CatalogError::Write { .. } => 5,
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            CatalogError::Read { .. } => {
                Some("Pass --data <path> or set CATALOG_DATA to an existing discoveries.json")
            }
            CatalogError::DataContract { .. } => {
                Some("Set score_policy = \"clamp\" in config.toml to saturate out-of-range scores")
            }
            CatalogError::Config(_) => Some("Check config.toml or pass --config <path>"),
            _ => None,
        }
    }
}

/// Error shape printed by the binary, mirrored as JSON in `--json` mode.
#[derive(Debug, Clone, Serialize)]
pub struct CliError {
    pub code: i32,
    pub kind: &'static str,
    pub message: String,
    pub hint: Option<String>,
    pub retryable: bool,
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            code: 2,
            kind: "usage",
            message: message.into(),
            hint: None,
            retryable: false,
        }
    }
}

impl From<CatalogError> for CliError {
    fn from(err: CatalogError) -> Self {
        Self {
            code: err.exit_code(),
            kind: err.kind(),
            hint: err.hint().map(str::to_string),
            message: err.to_string(),
            retryable: false,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CatalogError::from(err).into()
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_contract_maps_to_exit_code_4() {
        let err = CatalogError::DataContract {
            index: 2,
            owner: "a".into(),
            name: "b".into(),
            score: 11,
        };
        let cli: CliError = err.into();
        assert_eq!(cli.code, 4);
        assert_eq!(cli.kind, "data-contract");
        assert!(cli.message.contains("a/b"));
        assert!(cli.hint.is_some());
    }

    #[test]
    fn test_usage_error() {
        let err = CliError::usage("bad flag");
        assert_eq!(err.code, 2);
        assert_eq!(err.to_string(), "bad flag");
    }
}
