// src/lib.rs

pub mod cli;
pub mod compose;
pub mod config;
pub mod deploy;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod readiness;
pub mod types;

use std::io::{self, Write};

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{DeploySettings, load_and_resolve};
use crate::deploy::{DeploySummary, Deployment, planned_commands};
use crate::errors::{DeployError, Result};
use crate::exec::ProcessRunner;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings resolution (defaults, `Deploy.toml`, CLI flags)
/// - the real process runner
/// - the deployment driver
///
/// In `--dry-run` mode the resolved settings and planned commands are
/// printed and nothing is executed.
pub async fn run(args: CliArgs) -> Result<DeploySummary> {
    let overrides = args.overrides();
    let settings = load_and_resolve(args.config.as_deref(), &overrides)?;

    if args.dry_run {
        print_dry_run(&settings);
        return Ok(DeploySummary::default());
    }

    let mut runner = ProcessRunner::new();
    let mut deployment = Deployment::new(&mut runner, settings);
    deployment.run().await
}

/// Print what a failed run left behind before the process exits.
///
/// Thin wrapper over [`report_failure_to`] using the process streams.
pub fn report_failure(err: &DeployError) {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let _ = report_failure_to(err, &mut stdout.lock(), &mut stderr.lock());
}

/// Write the failure report for `err` to `out` and `errw`.
///
/// For a failed fatal command the captured output is echoed (stdout to
/// `out`, stderr to `errw`) so the operator sees why it failed. Empty
/// captures write nothing. The `compose-deploy error:` line always goes to
/// `errw`, last.
pub fn report_failure_to<O, E>(err: &DeployError, out: &mut O, errw: &mut E) -> io::Result<()>
where
    O: Write,
    E: Write,
{
    if let DeployError::ProcessFailed { stdout, stderr, .. } = err {
        if !stdout.is_empty() {
            out.write_all(stdout.as_bytes())?;
            out.flush()?;
        }
        if !stderr.is_empty() {
            errw.write_all(stderr.as_bytes())?;
        }
    }
    writeln!(errw, "compose-deploy error: {err}")?;
    errw.flush()
}

/// Simple dry-run output: resolved settings and the commands that would run.
fn print_dry_run(settings: &DeploySettings) {
    println!("compose-deploy dry-run");
    println!("  compose_file = {}", settings.compose_file.display());
    println!("  compose_command = {:?}", settings.compose_command);
    println!("  pull = {}", settings.pull);
    println!("  build = {}", settings.build);
    println!("  timeout = {}s", settings.timeout_secs);
    println!("  poll_interval = {}s", settings.poll_interval_secs);
    println!("  start_tests = {}", settings.start_tests);
    if settings.start_tests {
        println!("  test_script = {}", settings.test_script.display());
    }
    println!();

    let plan = planned_commands(settings);
    println!("commands ({}):", plan.len());
    for cmd in plan {
        println!("  $ {cmd}");
    }

    debug!("dry-run complete (no execution)");
}
