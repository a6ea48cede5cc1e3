// src/readiness/mod.rs

//! Service readiness polling.
//!
//! - [`status`] is the pure text heuristic that classifies services from
//!   one batch of status output.
//! - [`poller`] owns the timed loop around it.

pub mod poller;
pub mod status;

pub use poller::ReadinessPoller;
pub use status::{ReadinessReport, ServiceReadiness, evaluate, line_is_ready, referencing_lines};
