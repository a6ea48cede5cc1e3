// src/types.rs

use std::fmt;

/// Name of a compose service as reported by `config --services`.
///
/// Opaque and case-sensitive; matched against status output by substring.
pub type ServiceName = String;

/// Terminal result of one readiness poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Every expected service was classified ready in the same iteration.
    AllReady,
    /// The time budget elapsed before that happened.
    TimedOut,
}

impl fmt::Display for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollOutcome::AllReady => f.write_str("all-ready"),
            PollOutcome::TimedOut => f.write_str("timed-out"),
        }
    }
}
