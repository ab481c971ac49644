// src/error.rs

//! Error types for the bootstrap-in-place augmenter
//!
//! Every error is fatal to a run. Each variant carries the path, rule or
//! version string an operator needs to diagnose the failure.

use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for a bootstrap-in-place run
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize ignition config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Invalid asset manifest: {0}")]
    Manifest(String),
}

impl Error {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Problems with the inputs of a run: the document bytes or the asset tree
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Ignition config is empty")]
    EmptyInput,

    #[error("Ignition config not found: {0}")]
    MissingConfig(PathBuf),

    #[error("Failed to read asset {path} ({rule}): {source}")]
    UnreadableAsset {
        rule: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read systemd unit {path}: {source}")]
    UnreadableUnit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to search {root} ({rule}): {source}")]
    AssetWalk {
        rule: String,
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Matched file {path} is not under gather root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Destination path must be absolute: {0}")]
    RelativeDestination(PathBuf),
}

/// Problems decoding the document against its declared schema revision
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Invalid or missing ignition.version: {0}")]
    MalformedVersionField(String),

    #[error("Unsupported ignition config version: {version}")]
    UnsupportedVersion { version: String },

    #[error("Config does not match schema {version}: {source}")]
    MalformedField {
        version: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Problems moving a decoded document between schema revisions
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("No newer schema revision after {version}")]
    NoSuccessor { version: String },
}
