// src/readiness/status.rs

//! Classify services as ready / not ready from free-form `ps` output.
//!
//! The matching is a text heuristic over the table docker-compose prints:
//!
//! ```text
//!     Name              Command          State           Ports
//! ------------------------------------------------------------------
//! app_web_1   nginx -g daemon off;   Up (healthy)    0.0.0.0:80->80/tcp
//! app_db_1    docker-entrypoint.sh   Up              5432/tcp
//! ```
//!
//! A line *references* a service if it starts with `"<name> "` or contains
//! `" <name> "`. Only when no line matches either way does a service fall
//! back to plain substring containment, so non-tabular output still works.
//! Substring matching is lossy: a service whose name is contained in another
//! service's name (or in unrelated text) can be misclassified.

use crate::types::ServiceName;

const UP: &str = "Up";
const HEALTHY: &str = "(healthy)";
const UNHEALTHY: &str = "(unhealthy)";

/// Readiness of one service in one iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReadiness {
    pub service: ServiceName,
    pub ready: bool,
    /// First referencing line, kept for diagnostics.
    pub sample_line: Option<String>,
}

/// Readiness of every expected service against one batch of status output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadinessReport {
    pub services: Vec<ServiceReadiness>,
}

impl ReadinessReport {
    pub fn all_ready(&self) -> bool {
        self.services.iter().all(|s| s.ready)
    }

    pub fn pending(&self) -> impl Iterator<Item = &ServiceReadiness> {
        self.services.iter().filter(|s| !s.ready)
    }
}

/// Lines of `lines` that reference `service`, strict patterns first, then the
/// substring fallback.
pub fn referencing_lines<'a>(service: &str, lines: &[&'a str]) -> Vec<&'a str> {
    let prefix = format!("{service} ");
    let infix = format!(" {service} ");

    let strict: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| l.starts_with(&prefix) || l.contains(&infix))
        .collect();
    if !strict.is_empty() {
        return strict;
    }

    lines
        .iter()
        .copied()
        .filter(|l| l.contains(service))
        .collect()
}

/// A line counts as ready if it says `Up` and is not flagged unhealthy.
///
/// An explicit `(healthy)` wins over anything else on the line.
pub fn line_is_ready(line: &str) -> bool {
    line.contains(UP) && (line.contains(HEALTHY) || !line.contains(UNHEALTHY))
}

/// Classify one service against the split status output.
pub fn classify_service(service: &str, lines: &[&str]) -> ServiceReadiness {
    let matching = referencing_lines(service, lines);
    ServiceReadiness {
        service: service.to_string(),
        ready: matching.iter().any(|l| line_is_ready(l)),
        sample_line: matching.first().map(|l| l.to_string()),
    }
}

/// Classify every expected service against one status query's stdout.
pub fn evaluate(services: &[ServiceName], status_output: &str) -> ReadinessReport {
    let lines: Vec<&str> = status_output.lines().collect();
    ReadinessReport {
        services: services
            .iter()
            .map(|svc| classify_service(svc, &lines))
            .collect(),
    }
}
