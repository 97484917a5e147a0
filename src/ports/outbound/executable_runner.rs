use std::path::Path;
use thiserror::Error;

/// Failure to invoke an executable at all. Distinct from a non-zero exit
/// code, which is reported through [`ExecutableOutput::exit_code`].
#[derive(Debug, Error)]
#[error("Failed to invoke '{command}': {details}")]
pub struct ExecutableRunnerError {
    pub command: String,
    pub details: String,
}

/// Captured output of a finished external command.
#[derive(Debug, Clone)]
pub struct ExecutableOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecutableOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// ExecutableRunner port for adapters that shell out (e.g., querying
/// installed-package metadata). Calls are synchronous and blocking from
/// the parser's perspective.
pub trait ExecutableRunner {
    fn execute(
        &self,
        working_dir: &Path,
        command: &str,
        args: &[&str],
    ) -> Result<ExecutableOutput, ExecutableRunnerError>;
}
