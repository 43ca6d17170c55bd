//! Error types
//!
//! One enum per subsystem. The binary wraps these in `anyhow` at the edges.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from running git or locating the repository
#[derive(Error, Debug)]
pub enum GitError {
    #[error("not in a git repository: {0}")]
    NotARepository(#[source] git2::Error),

    #[error("repository has no working tree")]
    Bare,

    #[error("failed to run `git {command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`git {command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from loading or saving the settings file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("error reading config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("error serializing config: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("error writing config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid provider: {0} (valid options: openai, claude, google, groq)")]
    InvalidProvider(String),
}

/// Errors from the remote text-generation call
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("no API key configured for {0}. Run 'commet config set' first")]
    MissingApiKey(String),

    #[error("request to {provider} failed: {source}")]
    Http {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API request failed with status {status}: {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("no response text from {0}")]
    EmptyResponse(String),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),
}

/// Errors from building the file selector
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectorError {
    #[error("no files with changes found")]
    NoChanges,
}
