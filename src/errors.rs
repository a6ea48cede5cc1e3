// src/errors.rs

//! Crate-wide error type and the mapping from errors to process exit codes.

use thiserror::Error;

/// Exit code used when readiness polling runs out of time.
pub const TIMEOUT_EXIT_CODE: i32 = 2;

/// Exit code used when a command could not be spawned at all.
pub const SPAWN_EXIT_CODE: i32 = 127;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("refusing to run an empty command")]
    EmptyCommand,

    #[error("failed to spawn `{cmd}`: {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command `{cmd}` exited with code {code}")]
    ProcessFailed {
        cmd: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("could not enumerate compose services: {0}")]
    ServiceListUnavailable(String),

    #[error("services not ready after {timeout_secs}s")]
    ReadinessTimeout { timeout_secs: u64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DeployError {
    /// Exit code the top-level binary should terminate with for this error.
    ///
    /// A failed fatal command propagates the child's own code; a readiness
    /// timeout is always `2`; anything else is a generic `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::ProcessFailed { code, .. } => *code,
            DeployError::ReadinessTimeout { .. } => TIMEOUT_EXIT_CODE,
            DeployError::Spawn { .. } => SPAWN_EXIT_CODE,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
