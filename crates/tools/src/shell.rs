use crate::traits::{CommandRunner, ToolError};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Runs model-issued commands through `sh -c`.
///
/// The command string is handed to the shell verbatim; the envelope's
/// safety assertion is accepted as-is and not enforced here.
pub struct ShellRunner {
    timeout: Duration,
}

impl ShellRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(Duration::from_secs(120))
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<String, ToolError> {
        if command.trim().is_empty() {
            return Err(ToolError::Validation("empty command".to_string()));
        }

        debug!("spawning shell command: {}", command);
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| ToolError::Timeout)?
            .map_err(|e| ToolError::Execution(e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(ToolError::Execution(format!(
                "exit status {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(format!("stdout: {}, stderr: {}", stdout, stderr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_stdout() {
        let runner = ShellRunner::default();
        let result = runner.run("echo hello").await.unwrap();
        assert!(result.contains("stdout: hello"));
    }

    #[tokio::test]
    async fn test_captures_stderr() {
        let runner = ShellRunner::default();
        let result = runner.run("echo oops >&2").await.unwrap();
        assert!(result.contains("stderr: oops"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_an_error() {
        let runner = ShellRunner::default();
        let err = runner.run("exit 3").await.unwrap_err();
        match err {
            ToolError::Execution(message) => assert!(message.contains("exit status 3")),
            other => panic!("expected execution error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_command_is_rejected() {
        let runner = ShellRunner::default();
        let err = runner.run("   ").await.unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }

    #[tokio::test]
    async fn test_slow_command_times_out() {
        let runner = ShellRunner::new(Duration::from_millis(50));
        let err = runner.run("sleep 5").await.unwrap_err();
        assert!(matches!(err, ToolError::Timeout));
    }
}
