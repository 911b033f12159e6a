//! Agent loop - the response-dispatch state machine.

use crate::interfaces::{CompletionClient, RuntimeError};
use crate::retry::RetryPolicy;
use codeloom_interfaces::Console;
use codeloom_protocol::{parse_reply, Conversation, ModeEnvelope, ModelReply};
use codeloom_tools::{CommandRunner, FileStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fixed user turn sent after a THINK reply.
const CONTINUE_PROMPT: &str = "Continue with your plan.";

/// Corrective user turn sent after a malformed reply.
const RESEND_PROMPT: &str = "ERROR: Your response was not valid JSON. Please respond ONLY with \
     valid JSON in the format specified in the system prompt. No additional text.";

/// How a dispatch loop ended, short of a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The model produced an OUTPUT envelope.
    Completed {
        summary: String,
        result: String,
        next_steps: String,
    },
    /// Too many consecutive malformed replies.
    RetriesExhausted,
}

/// Core dispatch loop.
///
/// One cycle is remote call, validate, act, append. Every non-terminal
/// cycle extends the conversation by exactly two turns (the raw
/// assistant reply, then a user turn carrying the handler result), so
/// the history always ends on a user turn before the next remote call.
pub struct AgentLoop<C, R, F, U>
where
    C: CompletionClient,
    R: CommandRunner,
    F: FileStore,
    U: Console,
{
    client: C,
    runner: Arc<R>,
    files: Arc<F>,
    console: Arc<U>,
    retry: RetryPolicy,
}

impl<C, R, F, U> AgentLoop<C, R, F, U>
where
    C: CompletionClient,
    R: CommandRunner,
    F: FileStore,
    U: Console,
{
    pub fn new(client: C, runner: Arc<R>, files: Arc<F>, console: Arc<U>, retry: RetryPolicy) -> Self {
        Self {
            client,
            runner,
            files,
            console,
            retry,
        }
    }

    /// Drive the conversation until the model finishes, malformed
    /// replies exhaust the retry budget, or a fatal error occurs.
    ///
    /// The conversation must already carry the initial task; it is
    /// extended in place so the caller can inspect the transcript
    /// afterwards.
    pub async fn run(&self, conversation: &mut Conversation) -> Result<LoopOutcome, RuntimeError> {
        let mut parse_failures = 0u32;

        loop {
            let raw = self.client.complete(conversation.turns()).await?;
            debug!("model reply received ({} chars)", raw.len());

            let reply = match parse_reply(&raw) {
                Ok(reply) => {
                    parse_failures = 0;
                    reply
                }
                Err(failure) => {
                    warn!("failed to parse model reply: {}", failure.reason);
                    self.console
                        .say(&format!("❌ Failed to parse response: {}", failure.reason))
                        .await;

                    parse_failures += 1;
                    if !self.retry.should_retry(parse_failures) {
                        info!("{} consecutive parse failures, giving up", parse_failures);
                        return Ok(LoopOutcome::RetriesExhausted);
                    }

                    conversation.push_assistant(&raw);
                    conversation.push_user(RESEND_PROMPT);
                    continue;
                }
            };

            let envelope = match reply {
                ModelReply::Envelope(envelope) => envelope,
                ModelReply::Unrecognized { mode } => {
                    warn!("ignoring reply with unrecognized mode: {}", mode);
                    continue;
                }
            };

            match envelope {
                ModeEnvelope::Think {
                    thought,
                    next_action,
                } => {
                    self.console.say(&format!("💭 THINKING: {}", thought)).await;
                    self.console
                        .say(&format!("📋 NEXT ACTION: {}", next_action))
                        .await;

                    conversation.push_assistant(&raw);
                    conversation.push_user(CONTINUE_PROMPT);
                }
                ModeEnvelope::Action {
                    command,
                    explanation,
                    ..
                } => {
                    self.console.say(&format!("⚙️ EXECUTING: {}", command)).await;
                    if !explanation.is_empty() {
                        self.console.say(&format!("📝 REASON: {}", explanation)).await;
                    }

                    conversation.push_assistant(&raw);
                    match self.runner.run(&command).await {
                        Ok(output) => {
                            self.console.say(&format!("✅ COMMAND RESULT: {}", output)).await;
                            conversation.push_user(format!("Command executed. Result: {}", output));
                        }
                        Err(e) => {
                            warn!("command failed: {}", e);
                            self.console.say(&format!("❌ COMMAND ERROR: {}", e)).await;
                            conversation.push_user(format!("Command failed with error: {}", e));
                        }
                    }
                }
                ModeEnvelope::CreateFile {
                    filename,
                    content,
                    explanation,
                } => {
                    self.console
                        .say(&format!("📝 CREATING FILE: {}", filename))
                        .await;
                    if !explanation.is_empty() {
                        self.console.say(&format!("📄 REASON: {}", explanation)).await;
                    }

                    conversation.push_assistant(&raw);
                    match self.files.write(&filename, &content).await {
                        Ok(()) => {
                            self.console.say(&format!("✅ FILE CREATED: {}", filename)).await;
                            conversation
                                .push_user(format!("File created successfully: {}", filename));
                        }
                        Err(e) => {
                            warn!("file creation failed: {}", e);
                            self.console.say(&format!("❌ FILE ERROR: {}", e)).await;
                            conversation.push_user(format!("File creation failed with error: {}", e));
                        }
                    }
                }
                ModeEnvelope::Verify { filename, .. } => {
                    self.console
                        .say(&format!("🔍 VERIFYING FILE: {}", filename))
                        .await;

                    conversation.push_assistant(&raw);
                    match self.files.read(&filename).await {
                        Ok(content) => {
                            self.console.say("✅ FILE CONTENT:").await;
                            self.console.say(&content).await;
                            conversation.push_user(format!(
                                "File verification complete. Current content of {}:\n\n{}",
                                filename, content
                            ));
                        }
                        Err(e) => {
                            warn!("file verification failed: {}", e);
                            self.console
                                .say(&format!("❌ VERIFICATION ERROR: {}", e))
                                .await;
                            conversation
                                .push_user(format!("File verification failed with error: {}", e));
                        }
                    }
                }
                ModeEnvelope::Clarify { question, options } => {
                    self.console.say(&format!("❓ QUESTION: {}", question)).await;
                    if !options.is_empty() {
                        self.console
                            .say(&format!("📋 OPTIONS: {}", options.join(", ")))
                            .await;
                    }

                    let answer = self
                        .console
                        .ask("💬 Your response: ")
                        .await
                        .ok_or(RuntimeError::InputClosed)?;

                    conversation.push_assistant(&raw);
                    conversation.push_user(answer);
                }
                ModeEnvelope::Output {
                    summary,
                    result,
                    next_steps,
                } => {
                    self.console.say(&format!("📤 SUMMARY: {}", summary)).await;
                    self.console.say(&format!("🎯 RESULT: {}", result)).await;
                    self.console.say(&format!("➡️ NEXT STEPS: {}", next_steps)).await;

                    info!("conversation complete");
                    return Ok(LoopOutcome::Completed {
                        summary,
                        result,
                        next_steps,
                    });
                }
            }
        }
    }
}
