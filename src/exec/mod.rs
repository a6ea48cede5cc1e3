// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`runner`] defines the `CommandRunner` trait, run options, and the
//!   shared non-zero-exit policy.
//! - [`process`] provides `ProcessRunner`, the `tokio::process` backed
//!   implementation used in production.

pub mod process;
pub mod runner;

pub use process::ProcessRunner;
pub use runner::{
    CommandOutput, CommandRunner, RunOptions, apply_check_policy, display_command,
};
