//! The mode envelope: the tagged union a model reply must decode into.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Modes the dispatcher recognizes. Anything else parses but is inert.
const KNOWN_MODES: [&str; 6] = [
    "THINK",
    "ACTION",
    "CREATE_FILE",
    "VERIFY",
    "OUTPUT",
    "CLARIFY",
];

/// Structured reply from the model, discriminated by `mode`.
///
/// Fields the dispatcher acts on are required; fields that are only
/// displayed default to empty when the model omits them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModeEnvelope {
    Think {
        #[serde(default)]
        thought: String,
        #[serde(default)]
        next_action: String,
    },
    Action {
        command: String,
        #[serde(default)]
        explanation: String,
        #[serde(default)]
        safety_check: String,
    },
    CreateFile {
        filename: String,
        content: String,
        #[serde(default)]
        explanation: String,
    },
    Verify {
        filename: String,
        #[serde(default)]
        explanation: String,
    },
    Output {
        #[serde(default)]
        summary: String,
        #[serde(default)]
        result: String,
        #[serde(default)]
        next_steps: String,
    },
    Clarify {
        question: String,
        #[serde(default)]
        options: Vec<String>,
    },
}

/// Outcome of validating one raw model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelReply {
    /// A well-typed envelope in one of the six modes.
    Envelope(ModeEnvelope),
    /// Structurally valid JSON whose `mode` is not one of the six.
    Unrecognized { mode: String },
}

/// A reply that could not be turned into a [`ModelReply`].
///
/// Carries the offending text verbatim so the caller can replay it
/// into the conversation unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid structured reply: {reason}")]
pub struct ParseFailure {
    pub raw: String,
    pub reason: String,
}

/// Validate one raw model reply.
///
/// Any structural problem (malformed JSON, missing `mode`, a known
/// mode missing one of its operative fields) becomes a [`ParseFailure`]
/// rather than an uncaught error. No semantic validation happens here.
pub fn parse_reply(raw: &str) -> Result<ModelReply, ParseFailure> {
    let value: Value = serde_json::from_str(raw).map_err(|e| ParseFailure {
        raw: raw.to_string(),
        reason: format!("malformed JSON: {}", e),
    })?;

    let mode = match value.get("mode").and_then(Value::as_str) {
        Some(mode) => mode.to_string(),
        None => {
            return Err(ParseFailure {
                raw: raw.to_string(),
                reason: "missing \"mode\" discriminant".to_string(),
            })
        }
    };

    match serde_json::from_value::<ModeEnvelope>(value) {
        Ok(envelope) => Ok(ModelReply::Envelope(envelope)),
        Err(e) if KNOWN_MODES.contains(&mode.as_str()) => Err(ParseFailure {
            raw: raw.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(ModelReply::Unrecognized { mode }),
    }
}
