use async_trait::async_trait;

/// Interactive console the dispatcher reaches the human through.
#[async_trait]
pub trait Console: Send + Sync {
    /// Print one line of output.
    async fn say(&self, message: &str);

    /// Prompt for one line of input. `None` means the input stream closed.
    async fn ask(&self, prompt: &str) -> Option<String>;
}
