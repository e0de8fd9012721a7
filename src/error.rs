//! Error types for loading pecks, validating configuration and driving a run.
//!
//! Per-request failures are not errors: the executor records them as failed hits.
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating peck definitions.
#[derive(Debug, Error)]
pub enum PeckError {
    /// The pecks directory could not be listed.
    #[error("failed to read pecks directory '{}': {source}", dir.display())]
    ReadDir {
        /// Directory being walked.
        dir: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A peck file could not be read.
    #[error("failed to read peck file '{}': {source}", path.display())]
    ReadFile {
        /// Offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A TOML peck file is malformed.
    #[error("failed to parse peck file '{}': {source}", path.display())]
    ParseToml {
        /// Offending file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// A JSON peck file is malformed.
    #[error("failed to parse peck file '{}': {source}", path.display())]
    ParseJson {
        /// Offending file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A peck file is neither `.toml` nor `.json`.
    #[error("unsupported peck file '{}', expected a .toml or .json extension", path.display())]
    UnsupportedExtension {
        /// Offending file.
        path: PathBuf,
    },

    /// A peck file passed parsing but failed validation.
    #[error("invalid peck file '{}': {source}", path.display())]
    Invalid {
        /// Offending file.
        path: PathBuf,
        /// The validation failure.
        #[source]
        source: Box<PeckError>,
    },

    /// Firing chance above 100.
    #[error("chance must be within 0..=100, got {chance}")]
    ChanceOutOfRange {
        /// The rejected value.
        chance: u8,
    },

    /// Target path does not start with `/`.
    #[error("target path must start with '/', got '{path}'")]
    InvalidPath {
        /// The rejected path.
        path: String,
    },

    /// The stats token could not be derived from the definition.
    #[error("failed to serialize peck identity: {source}")]
    Token {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors in the run configuration, detected before any peck runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Base URL is empty once trailing slashes are stripped.
    #[error("missing base URL, check `woodpecker --help`")]
    MissingBaseUrl,

    /// Base URL is not a valid absolute URL.
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// Base URL carries a query or fragment, which target paths cannot be appended to.
    #[error("base URL '{url}' must not contain a query or fragment")]
    BaseUrlQuery {
        /// The rejected URL.
        url: String,
    },

    /// Base URL does not use http or https.
    #[error("unsupported scheme '{scheme}' in base URL, expected http or https")]
    UnsupportedScheme {
        /// The rejected scheme.
        scheme: String,
    },
}

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The runner already left the idle phase.
    #[error("run already started (phase: {phase})")]
    AlreadyStarted {
        /// The phase the runner was in.
        phase: crate::runner::RunPhase,
    },

    /// A `prepare` hook failed.
    #[error("prepare hook failed for {peck}: {source}")]
    Prepare {
        /// `METHOD /path` of the failing peck.
        peck: String,
        /// The hook's error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A `cleanup` hook failed.
    #[error("cleanup hook failed for {peck}: {source}")]
    Cleanup {
        /// `METHOD /path` of the failing peck.
        peck: String,
        /// The hook's error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
