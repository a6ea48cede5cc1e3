// src/deploy.rs

//! Deployment driver.
//!
//! Sequences one deployment through a [`CommandRunner`]:
//!
//! 1. optional `pull`
//! 2. `up -d` (optionally `--build`)
//! 3. enumerate services and wait for them to be ready
//! 4. post-deploy commands (non-fatal)
//! 5. optional test launcher (non-fatal)
//!
//! Steps 1-3 are fail-fast. Nothing already started is rolled back.

use std::path::Path;

use tracing::{info, warn};

use crate::compose::{ComposeCli, enumerate_services};
use crate::config::DeploySettings;
use crate::errors::{DeployError, Result};
use crate::exec::{CommandRunner, RunOptions, display_command};
use crate::readiness::ReadinessPoller;
use crate::types::{PollOutcome, ServiceName};

/// What a completed deployment did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploySummary {
    /// Services that were waited for; empty when polling was skipped.
    pub services: Vec<ServiceName>,
    pub readiness_skipped: bool,
    /// Post-deploy commands that failed or could not be started.
    pub post_cmd_failures: usize,
    pub tests_started: bool,
}

pub struct Deployment<'r, R: CommandRunner + ?Sized> {
    runner: &'r mut R,
    settings: DeploySettings,
    compose: ComposeCli,
}

impl<'r, R: CommandRunner + ?Sized> Deployment<'r, R> {
    pub fn new(runner: &'r mut R, settings: DeploySettings) -> Self {
        let compose = ComposeCli::from_settings(&settings);
        Self {
            runner,
            settings,
            compose,
        }
    }

    /// Run the whole deployment.
    ///
    /// Returns `ProcessFailed` if pull/up/status fails, and
    /// `ReadinessTimeout` if services do not become ready in time.
    pub async fn run(&mut self) -> Result<DeploySummary> {
        let mut summary = DeploySummary::default();

        if self.settings.pull {
            let argv = self.compose.pull();
            self.runner.run(&argv, RunOptions::inherited()).await?;
        }

        let argv = self.compose.up(self.settings.build);
        self.runner.run(&argv, RunOptions::inherited()).await?;

        self.wait_for_services(&mut summary).await?;
        self.run_post_cmds(&mut summary).await;

        if self.settings.start_tests {
            self.start_tests(&mut summary).await;
        }

        info!(
            services = summary.services.len(),
            post_cmd_failures = summary.post_cmd_failures,
            "deployment completed"
        );
        Ok(summary)
    }

    async fn wait_for_services(&mut self, summary: &mut DeploySummary) -> Result<()> {
        let services = match enumerate_services(&mut *self.runner, &self.compose).await {
            Ok(services) if !services.is_empty() => services,
            Ok(_) => {
                warn!("compose file declares no services; skipping readiness wait");
                summary.readiness_skipped = true;
                return Ok(());
            }
            Err(err) => {
                warn!(error = %err, "could not enumerate compose services; skipping readiness wait");
                summary.readiness_skipped = true;
                return Ok(());
            }
        };

        let mut poller = ReadinessPoller::new(&mut *self.runner, self.compose.ps())
            .with_interval(self.settings.poll_interval());

        match poller.poll(&services, self.settings.timeout()).await? {
            PollOutcome::AllReady => {
                summary.services = services;
                Ok(())
            }
            PollOutcome::TimedOut => Err(DeployError::ReadinessTimeout {
                timeout_secs: self.settings.timeout_secs,
            }),
        }
    }

    async fn run_post_cmds(&mut self, summary: &mut DeploySummary) {
        for cmd in &self.settings.post_cmds {
            info!(cmd = %cmd, "running post-deploy command");
            let argv = split_command(cmd);
            let opts = RunOptions::inherited().check(false);
            match self.runner.run(&argv, opts).await {
                Ok(out) if out.success() => {}
                Ok(_) => summary.post_cmd_failures += 1,
                Err(err) => {
                    warn!(cmd = %cmd, error = %err, "post-deploy command could not be run");
                    summary.post_cmd_failures += 1;
                }
            }
        }
    }

    async fn start_tests(&mut self, summary: &mut DeploySummary) {
        info!(script = ?self.settings.test_script, "starting test scripts (if present)");
        let argv = test_launcher_argv(&self.settings.test_script);
        let opts = RunOptions::inherited().check(false);
        match self.runner.run(&argv, opts).await {
            Ok(_) => summary.tests_started = true,
            Err(err) => warn!(error = %err, "test launcher could not be run"),
        }
    }
}

/// Split a post-deploy command on whitespace.
///
/// No shell quoting is interpreted; wrap the command in `sh -c '...'` if it
/// needs pipes or quoted arguments.
pub fn split_command(cmd: &str) -> Vec<String> {
    cmd.split_whitespace().map(str::to_string).collect()
}

/// `bash -c` invocation that runs `script` only if it is executable and
/// never fails itself.
pub fn test_launcher_argv(script: &Path) -> Vec<String> {
    let quoted = shell_quote(&script.to_string_lossy());
    vec![
        "bash".to_string(),
        "-c".to_string(),
        format!("[ -x {quoted} ] && bash {quoted} || true"),
    ]
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Human-readable list of the commands a deployment would run, in order.
pub fn planned_commands(settings: &DeploySettings) -> Vec<String> {
    let compose = ComposeCli::from_settings(settings);
    let mut plan = Vec::new();

    if settings.pull {
        plan.push(display_command(&compose.pull()));
    }
    plan.push(display_command(&compose.up(settings.build)));
    plan.push(display_command(&compose.list_services()));
    plan.push(format!(
        "{}  (every {}s, up to {}s)",
        display_command(&compose.ps()),
        settings.poll_interval_secs,
        settings.timeout_secs
    ));
    for cmd in &settings.post_cmds {
        plan.push(display_command(&split_command(cmd)));
    }
    if settings.start_tests {
        plan.push(display_command(&test_launcher_argv(&settings.test_script)));
    }
    plan
}
