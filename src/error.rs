use std::path::PathBuf;

use thiserror::Error;

use crate::model::NodeKind;

/// Precondition violations found while building or validating a model tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{kind} requires a name")]
    MissingName { kind: NodeKind },
    #[error("`{name}` is not a valid name for {kind}")]
    InvalidIdentifier { kind: NodeKind, name: String },
    #[error("`{0}` is not a valid type name")]
    InvalidTypeName(String),
}

/// Errors emitted while loading [`crate::settings::Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid ignore pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
