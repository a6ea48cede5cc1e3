// src/compose.rs

//! Argument vectors for the orchestration tool, plus the service enumerator.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::DeploySettings;
use crate::errors::{DeployError, Result};
use crate::exec::{CommandRunner, RunOptions};
use crate::types::ServiceName;

/// Builds docker-compose style command lines for one compose file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeCli {
    program: Vec<String>,
    file: PathBuf,
}

impl ComposeCli {
    /// `program` is the executable plus any leading arguments
    /// (e.g. `["docker", "compose"]`).
    pub fn new(program: Vec<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            program,
            file: file.into(),
        }
    }

    pub fn from_settings(settings: &DeploySettings) -> Self {
        Self::new(settings.compose_command.clone(), &settings.compose_file)
    }

    fn with_file(&self, tail: &[&str]) -> Vec<String> {
        let mut argv = self.program.clone();
        argv.push("-f".to_string());
        argv.push(self.file.to_string_lossy().into_owned());
        argv.extend(tail.iter().map(|s| s.to_string()));
        argv
    }

    /// `<compose> -f <file> config --services`
    pub fn list_services(&self) -> Vec<String> {
        self.with_file(&["config", "--services"])
    }

    /// `<compose> -f <file> pull`
    pub fn pull(&self) -> Vec<String> {
        self.with_file(&["pull"])
    }

    /// `<compose> -f <file> up -d [--build]`
    pub fn up(&self, build: bool) -> Vec<String> {
        let mut argv = self.with_file(&["up", "-d"]);
        if build {
            argv.push("--build".to_string());
        }
        argv
    }

    /// `<compose> -f <file> ps`
    pub fn ps(&self) -> Vec<String> {
        self.with_file(&["ps"])
    }
}

/// Parse `config --services` output: one name per line, blanks dropped,
/// duplicates removed keeping the first occurrence.
pub fn parse_service_list(output: &str) -> Vec<ServiceName> {
    let mut services: Vec<ServiceName> = Vec::new();
    for name in output.lines().map(str::trim).filter(|s| !s.is_empty()) {
        if !services.iter().any(|s| s == name) {
            services.push(name.to_string());
        }
    }
    services
}

/// Ask the orchestrator which services the compose file declares.
///
/// Any failure (spawn error, non-zero exit) is reported as
/// [`DeployError::ServiceListUnavailable`] so the caller can decide to skip
/// readiness polling instead of aborting.
pub async fn enumerate_services<R>(runner: &mut R, compose: &ComposeCli) -> Result<Vec<ServiceName>>
where
    R: CommandRunner + ?Sized,
{
    let argv = compose.list_services();
    let output = runner
        .run(&argv, RunOptions::captured())
        .await
        .map_err(|err| DeployError::ServiceListUnavailable(err.to_string()))?;

    let services = parse_service_list(&output.stdout);
    debug!(?services, "compose services declared");
    info!(count = services.len(), "enumerated compose services");
    Ok(services)
}
