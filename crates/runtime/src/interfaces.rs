//! Abstract interfaces for runtime dependencies.

use async_trait::async_trait;
use codeloom_protocol::Turn;
use thiserror::Error;

/// Fatal runtime errors.
///
/// Recoverable failures never surface here: malformed replies go
/// through the retry policy and tool errors are folded back into the
/// conversation as text.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Completion error: {0}")]
    Completion(String),

    #[error("Console input closed")]
    InputClosed,
}

/// Remote completion call: ordered turns in, free-form text out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, turns: &[Turn]) -> Result<String, RuntimeError>;
}
