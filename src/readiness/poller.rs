// src/readiness/poller.rs

//! The polling loop: query status, classify, sleep, repeat until every
//! service is ready or the time budget runs out.

use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::config::model::DEFAULT_POLL_INTERVAL_SECS;
use crate::errors::Result;
use crate::exec::{CommandRunner, RunOptions};
use crate::readiness::status::evaluate;
use crate::types::{PollOutcome, ServiceName};

/// Polls one status query until all expected services are ready.
///
/// Exactly one status process is spawned per iteration, whatever the number
/// of services; every service is classified against that same output.
pub struct ReadinessPoller<'r, R: CommandRunner + ?Sized> {
    runner: &'r mut R,
    status_argv: Vec<String>,
    interval: Duration,
}

impl<'r, R: CommandRunner + ?Sized> ReadinessPoller<'r, R> {
    /// `status_argv` is the command whose stdout lists service states
    /// (typically `docker-compose -f <file> ps`).
    pub fn new(runner: &'r mut R, status_argv: Vec<String>) -> Self {
        Self {
            runner,
            status_argv,
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }

    /// Sleep between two status queries.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Wait until every service in `services` is ready, or `timeout` elapses.
    ///
    /// - The timeout is checked at the top of each iteration, so the loop can
    ///   overrun it by at most one interval plus one query.
    /// - On a running clock a zero `timeout` expires before the first status
    ///   query, so only the diagnostic dump runs.
    /// - On timeout, the current status is printed once (non-fatal) for the
    ///   operator before returning [`PollOutcome::TimedOut`].
    /// - A failing status query is fatal and propagates as
    ///   `ProcessFailed`.
    pub async fn poll(&mut self, services: &[ServiceName], timeout: Duration) -> Result<PollOutcome> {
        let start = Instant::now();
        let mut iteration: u64 = 0;

        info!(
            timeout_secs = timeout.as_secs(),
            services = services.len(),
            "waiting for services to be Up and (if applicable) healthy"
        );

        loop {
            let elapsed = start.elapsed();
            if elapsed > timeout {
                warn!(
                    elapsed_secs = elapsed.as_secs(),
                    iterations = iteration,
                    "timed out waiting for services; current status follows"
                );
                self.dump_status().await;
                return Ok(PollOutcome::TimedOut);
            }

            iteration += 1;
            let output = self
                .runner
                .run(&self.status_argv, RunOptions::captured())
                .await?;

            let report = evaluate(services, &output.stdout);
            if report.all_ready() {
                info!(
                    elapsed_secs = elapsed.as_secs(),
                    iterations = iteration,
                    "all services are up and healthy (or have no healthcheck)"
                );
                return Ok(PollOutcome::AllReady);
            }

            for pending in report.pending() {
                match pending.sample_line {
                    Some(ref line) => info!(
                        service = %pending.service,
                        line = %line,
                        "service not ready yet"
                    ),
                    None => info!(
                        service = %pending.service,
                        "service not listed in status output yet"
                    ),
                }
            }

            debug!(iteration, interval_secs = self.interval.as_secs(), "sleeping before next status query");
            sleep(self.interval).await;
        }
    }

    async fn dump_status(&mut self) {
        let opts = RunOptions::inherited().check(false);
        if let Err(err) = self.runner.run(&self.status_argv, opts).await {
            warn!(error = %err, "could not query status for diagnostics");
        }
    }
}
