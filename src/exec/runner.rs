// src/exec/runner.rs

//! Pluggable command runner abstraction.
//!
//! Everything that talks to the outside world (the compose wrapper, the
//! readiness poller, the deployment driver) goes through a `CommandRunner`
//! instead of spawning processes directly. Production code uses
//! [`super::ProcessRunner`]; tests provide a scripted fake that returns canned
//! output and records what would have been run.

use std::future::Future;
use std::pin::Pin;

use tracing::warn;

use crate::errors::{DeployError, Result};

/// How a single command should be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Capture stdout/stderr instead of inheriting the caller's streams.
    pub capture: bool,
    /// Treat a non-zero exit as fatal (`ProcessFailed`).
    pub check: bool,
}

impl RunOptions {
    /// Captured and fatal: used for queries whose output we parse.
    pub const fn captured() -> Self {
        Self {
            capture: true,
            check: true,
        }
    }

    /// Inherited streams and fatal: used for deployment steps.
    pub const fn inherited() -> Self {
        Self {
            capture: false,
            check: true,
        }
    }

    /// Same options with a different fatality policy.
    pub const fn check(self, check: bool) -> Self {
        Self {
            capture: self.capture,
            check,
        }
    }
}

/// What a finished command left behind.
///
/// `stdout`/`stderr` are empty when the command ran with inherited streams.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Captured stdout split into lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines()
    }
}

/// Trait abstracting how external commands are executed.
pub trait CommandRunner: Send {
    /// Run `argv` to completion.
    ///
    /// Implementations must reject an empty `argv` with
    /// [`DeployError::EmptyCommand`] and honour `opts.check` via
    /// [`apply_check_policy`].
    fn run<'a>(
        &'a mut self,
        argv: &'a [String],
        opts: RunOptions,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + 'a>>;
}

/// Render an argument vector the way it is shown to the operator.
pub fn display_command(argv: &[String]) -> String {
    argv.join(" ")
}

/// Turn a finished command into the runner's result.
///
/// A non-zero exit becomes `ProcessFailed` when `opts.check` is set; with
/// `check = false` it is only logged.
pub fn apply_check_policy(
    argv: &[String],
    opts: RunOptions,
    output: CommandOutput,
) -> Result<CommandOutput> {
    if output.success() {
        return Ok(output);
    }

    let cmd = display_command(argv);
    if opts.check {
        return Err(DeployError::ProcessFailed {
            cmd,
            code: output.code,
            stdout: output.stdout,
            stderr: output.stderr,
        });
    }

    warn!(cmd = %cmd, exit_code = output.code, "command failed (non-fatal)");
    Ok(output)
}
