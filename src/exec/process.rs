// src/exec/process.rs

//! Real command runner backed by `tokio::process::Command`.

use std::future::Future;
use std::pin::Pin;
use std::process::ExitStatus;

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{DeployError, Result};
use crate::exec::runner::{
    CommandOutput, CommandRunner, RunOptions, apply_check_policy, display_command,
};

/// Runner that spawns one OS process per call.
///
/// - The command line is logged before the process starts.
/// - With `capture = false` the child inherits stdin/stdout/stderr, so its
///   output is visible live.
/// - With `capture = true` stdout and stderr are collected as (lossy) UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run<'a>(
        &'a mut self,
        argv: &'a [String],
        opts: RunOptions,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + 'a>> {
        Box::pin(async move {
            let (program, args) = argv.split_first().ok_or(DeployError::EmptyCommand)?;
            let shown = display_command(argv);

            info!(cmd = %shown, capture = opts.capture, "$ {shown}");

            let mut cmd = Command::new(program);
            cmd.args(args).kill_on_drop(true);

            let output = if opts.capture {
                let out = cmd.output().await.map_err(|source| DeployError::Spawn {
                    cmd: shown.clone(),
                    source,
                })?;
                CommandOutput {
                    code: exit_code(out.status),
                    stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                }
            } else {
                let status = cmd.status().await.map_err(|source| DeployError::Spawn {
                    cmd: shown.clone(),
                    source,
                })?;
                CommandOutput {
                    code: exit_code(status),
                    ..Default::default()
                }
            };

            debug!(cmd = %shown, exit_code = output.code, "process exited");

            apply_check_policy(argv, opts, output)
        })
    }
}

/// Exit code of a finished child.
///
/// Children killed by a signal report `128 + signal` on Unix, like a shell.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
