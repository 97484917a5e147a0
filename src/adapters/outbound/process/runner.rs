use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::ports::outbound::{ExecutableOutput, ExecutableRunner, ExecutableRunnerError};

/// SystemExecutableRunner adapter invoking external tools synchronously.
///
/// A spawn failure (command not found, permission denied) surfaces as an
/// [`ExecutableRunnerError`]; a non-zero exit code does not - the caller
/// decides what the exit code means for its ecosystem.
pub struct SystemExecutableRunner;

impl SystemExecutableRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemExecutableRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutableRunner for SystemExecutableRunner {
    fn execute(
        &self,
        working_dir: &Path,
        command: &str,
        args: &[&str],
    ) -> Result<ExecutableOutput, ExecutableRunnerError> {
        debug!(command, ?args, "Executing external tool");

        let output = Command::new(command)
            .args(args)
            .current_dir(working_dir)
            .output()
            .map_err(|e| ExecutableRunnerError {
                command: command.to_string(),
                details: e.to_string(),
            })?;

        Ok(ExecutableOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}
