// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Default compose file, relative to the working directory.
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";

/// Default readiness budget in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default sleep between two status queries, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default test launcher, started after a successful deploy if present.
pub const DEFAULT_TEST_SCRIPT: &str = "tools/test_start_all.sh";

/// One layer of optional settings.
///
/// This is both the shape of the TOML config file and the shape of the
/// command-line override layer: every field is `Some` only when that layer
/// explicitly provides it.
///
/// ```toml
/// compose_file = "docker-compose.prod.yml"
/// pull = true
/// build = false
/// timeout = 120
/// start_tests = false
/// post_cmds = ["docker-compose exec -T api ./migrate"]
/// poll_interval = 5
/// compose_command = ["docker", "compose"]
/// test_script = "tools/test_start_all.sh"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub compose_file: Option<PathBuf>,

    #[serde(default)]
    pub pull: Option<bool>,

    #[serde(default)]
    pub build: Option<bool>,

    /// Readiness budget in seconds.
    #[serde(default)]
    pub timeout: Option<u64>,

    #[serde(default)]
    pub start_tests: Option<bool>,

    /// Replaces (never extends) the post-deploy command list of lower layers.
    #[serde(default)]
    pub post_cmds: Option<Vec<String>>,

    /// Seconds between status queries.
    #[serde(default)]
    pub poll_interval: Option<u64>,

    /// Program plus leading arguments used to talk to the orchestrator,
    /// e.g. `["docker-compose"]` or `["docker", "compose"]`.
    #[serde(default)]
    pub compose_command: Option<Vec<String>>,

    #[serde(default)]
    pub test_script: Option<PathBuf>,
}

/// Fully resolved settings the deployment driver runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploySettings {
    pub compose_file: PathBuf,
    pub pull: bool,
    pub build: bool,
    pub timeout_secs: u64,
    pub start_tests: bool,
    pub post_cmds: Vec<String>,
    pub poll_interval_secs: u64,
    pub compose_command: Vec<String>,
    pub test_script: PathBuf,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            compose_file: PathBuf::from(DEFAULT_COMPOSE_FILE),
            pull: false,
            build: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            start_tests: true,
            post_cmds: Vec::new(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            compose_command: vec!["docker-compose".to_string()],
            test_script: PathBuf::from(DEFAULT_TEST_SCRIPT),
        }
    }
}

impl DeploySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
