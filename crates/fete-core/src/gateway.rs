//! Chat-completion gateway client.
//!
//! The generation endpoints delegate all creative work to an upstream
//! chat-completion API behind a fixed gateway URL. [`ChatGateway`] is the
//! seam: handlers hold an `Arc<dyn ChatGateway>`, production wires in
//! [`HttpChatGateway`], tests script replies.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Fixed model identifier sent with every request.
pub const MODEL_ID: &str = "google/gemini-3-flash-preview";

/// Default upstream gateway base URL.
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev";

/// A single completion request: one user message, fixed model.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub prompt: String,
    pub temperature: f32,
}

/// Client interface for the upstream chat-completion API.
///
/// Object-safe so it can be stored as `Arc<dyn ChatGateway>` in server state.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send the request and return the model's text reply.
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// Gateway configuration.
///
/// The API key is optional at construction time: its absence is a
/// per-request error, not a startup check, so a service booted without a
/// key still serves the CRUD surface.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl GatewayConfig {
    /// Build a config from the environment: `FETE_AI_API_KEY` and
    /// `FETE_AI_GATEWAY_URL` (defaulting to the hosted gateway).
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("FETE_AI_API_KEY").ok(),
            base_url: env::var("FETE_AI_GATEWAY_URL")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_owned()),
        }
    }

    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
        }
    }
}

/// Upstream response shape; only the first choice's content is used.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// reqwest-backed [`ChatGateway`] implementation.
pub struct HttpChatGateway {
    config: GatewayConfig,
    client: reqwest::Client,
}

impl HttpChatGateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .context("FETE_AI_API_KEY not configured")?;

        let url = format!("{}/v1/chat/completions", self.config.base_url);
        debug!(url = %url, temperature = request.temperature, "calling chat gateway");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&json!({
                "model": MODEL_ID,
                "messages": [{ "role": "user", "content": request.prompt }],
                "temperature": request.temperature,
            }))
            .send()
            .await
            .context("chat gateway request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("AI API error: {status}: {body}");
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .context("failed to decode chat gateway response")?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("chat gateway response contained no choices")?;

        Ok(content)
    }
}
