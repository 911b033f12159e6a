use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a side-effecting collaborator.
///
/// These never abort the dispatch loop; the runtime renders them into
/// the conversation as text so the model can adapt.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Execution error: {0}")]
    Execution(String),
    #[error("Operation timed out")]
    Timeout,
}

/// Shell command execution.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a single shell command, returning combined stdout/stderr text.
    async fn run(&self, command: &str) -> Result<String, ToolError>;
}

/// File persistence for file-creation and verification handling.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write `content` to `filename`, creating parent directories.
    async fn write(&self, filename: &str, content: &str) -> Result<(), ToolError>;

    /// Read the full current content of `filename`.
    async fn read(&self, filename: &str) -> Result<String, ToolError>;
}
