mod config;
mod prompt;

use anyhow::Result;
use codeloom_interfaces::{Console, TerminalConsole};
use codeloom_protocol::Conversation;
use codeloom_runtime::{AgentLoop, ChatClient, LoopOutcome, RetryPolicy};
use codeloom_tools::{DiskStore, ShellRunner};
use config::Config;
use prompt::SYSTEM_PROMPT;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Dev diagnostics via `RUST_LOG`, stderr only; user-facing output goes
/// through the console.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    println!("🤖 Welcome to Codeloom - structured coding, one mode at a time.");
    println!("💬 Ask me to help with coding tasks: create files, run commands, verify results.");
    println!("📝 Example: 'make a todo app with html, css and javascript'");
    println!();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            eprintln!("💡 Tip: set OPENAI_API_KEY before starting.");
            return Err(e);
        }
    };

    let console = Arc::new(TerminalConsole::new());

    let task = console
        .ask("❓ What would you like me to help you with? ")
        .await
        .unwrap_or_default();
    if task.trim().is_empty() {
        println!("❌ No task provided. Exiting...");
        return Ok(());
    }

    let mut conversation = Conversation::new(SYSTEM_PROMPT);
    conversation.push_user(task.clone());

    println!();
    println!("🚀 Starting task: {}", task);
    println!();

    let client = ChatClient::with_api_key(config.base_url, config.model, config.api_key);
    let agent = AgentLoop::new(
        client,
        Arc::new(ShellRunner::new(config.command_timeout)),
        Arc::new(DiskStore::new()),
        console,
        RetryPolicy::default(),
    );

    match agent.run(&mut conversation).await {
        Ok(LoopOutcome::Completed { .. }) => {
            println!();
            println!("✨ Conversation completed!");
        }
        Ok(LoopOutcome::RetriesExhausted) => {
            println!();
            println!("💥 Max retries reached. Ending conversation.");
        }
        Err(e) => {
            eprintln!("💥 Error in conversation loop: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
