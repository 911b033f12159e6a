//! Chat completion client for OpenAI-compatible services.

use crate::interfaces::{CompletionClient, RuntimeError};
use async_trait::async_trait;
use codeloom_protocol::Turn;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// The core treats the remote service as "turns in, text out"; any
/// transport or protocol problem is a [`RuntimeError::Completion`] and
/// ends the dispatch loop.
#[derive(Clone)]
pub struct ChatClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl ChatClient {
    pub fn new(base_url: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url,
            model,
            api_key: None,
            client,
        }
    }

    /// Create a client with a bearer token for authentication.
    pub fn with_api_key(base_url: String, model: String, api_key: String) -> Self {
        let mut client = Self::new(base_url, model);
        client.api_key = Some(api_key);
        client
    }
}

#[async_trait]
impl CompletionClient for ChatClient {
    async fn complete(&self, turns: &[Turn]) -> Result<String, RuntimeError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!("requesting completion from {} ({} turns)", url, turns.len());

        let mut request = self.client.post(&url).json(&ChatRequest {
            model: &self.model,
            messages: turns,
        });
        if let Some(api_key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| RuntimeError::Completion(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(RuntimeError::Completion(format!(
                "HTTP {}. Details: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            RuntimeError::Completion(format!("malformed completion response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| RuntimeError::Completion("completion had no content".to_string()))
    }
}
