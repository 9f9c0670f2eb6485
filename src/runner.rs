//! Worker invocation seam
//!
//! The dispatcher talks to the worker through [`WorkerRunner`], which has two
//! implementations: [`InProcessRunner`] calls the workflow directly and is
//! the default; [`SubprocessRunner`] re-invokes the current executable's
//! `create-multisig` subcommand for callers that want the blockchain client
//! isolated in its own process.

use crate::config::WorkerConfig;
use crate::worker::{self, WorkerResult};
use async_trait::async_trait;
use tokio::process::Command;

/// What came back from a worker invocation, before reply formatting
#[derive(Debug, Clone)]
pub enum WorkerOutcome {
    /// The worker produced a result, successful or not
    Result(WorkerResult),
    /// The subprocess wrote to stderr; stdout is discarded even if present
    Stderr(String),
    /// The subprocess stdout was not a parseable result
    Unparseable,
}

/// Seam between the dispatcher and the multisig worker
#[async_trait]
pub trait WorkerRunner: Send + Sync {
    async fn create_multisig(&self) -> WorkerOutcome;
}

/// Default runner: runs the workflow on the dispatcher's own runtime
pub struct InProcessRunner {
    config: WorkerConfig,
}

impl InProcessRunner {
    pub fn new(config: WorkerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl WorkerRunner for InProcessRunner {
    async fn create_multisig(&self) -> WorkerOutcome {
        WorkerOutcome::Result(worker::create_multisig(&self.config).await)
    }
}

/// Isolating runner: one subprocess per creation.
///
/// The child inherits the parent environment, both streams are buffered in
/// full, and the exit status is not consulted: stderr presence is the
/// failure signal.
pub struct SubprocessRunner;

impl SubprocessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SubprocessRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkerRunner for SubprocessRunner {
    async fn create_multisig(&self) -> WorkerOutcome {
        let exe = match std::env::current_exe() {
            Ok(path) => path,
            Err(e) => {
                return WorkerOutcome::Stderr(format!("Failed to locate worker executable: {}", e))
            }
        };

        let output = match Command::new(exe).arg("create-multisig").output().await {
            Ok(output) => output,
            Err(e) => return WorkerOutcome::Stderr(format!("Failed to spawn worker: {}", e)),
        };

        interpret_output(&output.stdout, &output.stderr)
    }
}

/// Interpret a finished subprocess's buffered streams.
///
/// Non-empty stderr wins unconditionally: stdout is not even parsed in that
/// case, matching the dispatcher's contract with the worker.
pub fn interpret_output(stdout: &[u8], stderr: &[u8]) -> WorkerOutcome {
    if !stderr.is_empty() {
        return WorkerOutcome::Stderr(String::from_utf8_lossy(stderr).into_owned());
    }

    let stdout = String::from_utf8_lossy(stdout);
    match serde_json::from_str::<WorkerResult>(stdout.trim()) {
        Ok(result) => WorkerOutcome::Result(result),
        Err(_) => WorkerOutcome::Unparseable,
    }
}
