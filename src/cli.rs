// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every option that can also come from the config file is parsed so that
//! "not given" stays distinguishable from "given"; [`CliArgs::overrides`]
//! turns the parsed flags into the top layer of the settings stack.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ConfigOverrides;

/// Command-line arguments for `compose-deploy`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "compose-deploy",
    version,
    about = "Pull, start and wait for docker-compose services, then run post-deploy commands.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the deploy config file (TOML).
    ///
    /// If omitted, `Deploy.toml` in the current directory is used when it
    /// exists.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the docker-compose file.
    #[arg(long, value_name = "PATH")]
    pub compose_file: Option<PathBuf>,

    /// Pull images before starting.
    #[arg(long, overrides_with = "no_pull")]
    pub pull: bool,

    /// Do not pull images, even if the config file asks for it.
    #[arg(long, overrides_with = "pull")]
    pub no_pull: bool,

    /// Build images before starting (`up -d --build`).
    #[arg(long, overrides_with = "no_build")]
    pub build: bool,

    /// Do not build images, even if the config file asks for it.
    #[arg(long, overrides_with = "build")]
    pub no_build: bool,

    /// Seconds to wait for services to become ready.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Seconds to sleep between two status queries.
    #[arg(long, value_name = "SECS")]
    pub poll_interval: Option<u64>,

    /// Command to run after deployment (repeatable).
    ///
    /// When given at least once, replaces `post_cmds` from the config file.
    #[arg(long = "post-cmd", value_name = "CMD")]
    pub post_cmd: Vec<String>,

    /// Start the test launcher script after deployment.
    #[arg(long, overrides_with = "no_start_tests")]
    pub start_tests: bool,

    /// Do not start test scripts after deploy.
    #[arg(long, overrides_with = "start_tests")]
    pub no_start_tests: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `COMPOSE_DEPLOY_LOG` or a default level will be used.
    /// Each command line (`$ cmd`) is logged at `info`, so `warn` and `error`
    /// hide them.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve settings and print the planned commands without running them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl CliArgs {
    /// Flags the user actually passed, as an override layer.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            compose_file: self.compose_file.clone(),
            pull: flag_pair(self.pull, self.no_pull),
            build: flag_pair(self.build, self.no_build),
            timeout: self.timeout,
            start_tests: flag_pair(self.start_tests, self.no_start_tests),
            post_cmds: if self.post_cmd.is_empty() {
                None
            } else {
                Some(self.post_cmd.clone())
            },
            poll_interval: self.poll_interval,
            compose_command: None,
            test_script: None,
        }
    }
}

/// `--x` / `--no-x` pair: `None` unless one of them was given.
fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
