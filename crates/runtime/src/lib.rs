//! Dispatch runtime: the response-dispatch state machine and the
//! collaborator seams it runs against.

pub mod agent_loop;
pub mod interfaces;
pub mod llm_client;
pub mod retry;

pub use agent_loop::{AgentLoop, LoopOutcome};
pub use interfaces::{CompletionClient, RuntimeError};
pub use llm_client::ChatClient;
pub use retry::RetryPolicy;
