use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;

use tokio::time::Instant;

use compose_deploy::errors::{DeployError, Result};
use compose_deploy::exec::{
    CommandOutput, CommandRunner, RunOptions, apply_check_policy, display_command,
};

/// Canned result for one command invocation.
#[derive(Debug, Clone)]
pub enum Reply {
    /// The process ran and exited with `code`, printing `stdout`.
    Exit { code: i32, stdout: String },
    /// The program could not be started at all.
    SpawnFailure,
}

impl Reply {
    pub fn ok(stdout: &str) -> Self {
        Reply::Exit {
            code: 0,
            stdout: stdout.to_string(),
        }
    }

    pub fn exit(code: i32) -> Self {
        Reply::Exit {
            code,
            stdout: String::new(),
        }
    }
}

/// One recorded invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub argv: Vec<String>,
    pub opts: RunOptions,
    pub at: Instant,
}

impl RecordedCall {
    pub fn display(&self) -> String {
        display_command(&self.argv)
    }
}

struct Rule {
    suffix: String,
    replies: VecDeque<Reply>,
}

/// A fake runner that:
/// - records every command it is asked to run (with the tokio clock time)
/// - answers from per-command reply queues; the last reply of a queue
///   repeats forever
/// - answers unmatched commands with a silent success.
///
/// Rules match when the rendered command line ends with the rule's suffix,
/// e.g. `"ps"` or `"config --services"`.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Vec<Rule>,
    calls: Vec<RecordedCall>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, suffix: &str, replies: impl IntoIterator<Item = Reply>) -> Self {
        self.rules.push(Rule {
            suffix: suffix.to_string(),
            replies: replies.into_iter().collect(),
        });
        self
    }

    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }

    /// Rendered command lines, in call order.
    pub fn commands(&self) -> Vec<String> {
        self.calls.iter().map(RecordedCall::display).collect()
    }

    /// Calls whose command line ends with `suffix`.
    pub fn calls_ending_with(&self, suffix: &str) -> Vec<&RecordedCall> {
        self.calls
            .iter()
            .filter(|c| c.display().ends_with(suffix))
            .collect()
    }

    fn next_reply(&mut self, shown: &str) -> Reply {
        let Some(rule) = self.rules.iter_mut().find(|r| shown.ends_with(&r.suffix)) else {
            return Reply::ok("");
        };
        if rule.replies.len() > 1 {
            rule.replies.pop_front().unwrap_or_else(|| Reply::ok(""))
        } else {
            rule.replies.front().cloned().unwrap_or_else(|| Reply::ok(""))
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run<'a>(
        &'a mut self,
        argv: &'a [String],
        opts: RunOptions,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + 'a>> {
        Box::pin(async move {
            if argv.is_empty() {
                return Err(DeployError::EmptyCommand);
            }

            let shown = display_command(argv);
            self.calls.push(RecordedCall {
                argv: argv.to_vec(),
                opts,
                at: Instant::now(),
            });

            match self.next_reply(&shown) {
                Reply::Exit { code, stdout } => {
                    let output = CommandOutput {
                        code,
                        stdout: if opts.capture { stdout } else { String::new() },
                        stderr: String::new(),
                    };
                    apply_check_policy(argv, opts, output)
                }
                Reply::SpawnFailure => Err(DeployError::Spawn {
                    cmd: shown,
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such program"),
                }),
            }
        })
    }
}
