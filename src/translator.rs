//! Translation via the OpenAI chat-completions API
//!
//! One request per translation; inputs are capped well below any chunking
//! threshold. Failures are surfaced with the provider's message when the
//! response body carries one. There is no automatic retry: a failed
//! translation is reported and the user decides whether to try again.

use crate::config::Config;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

/// Shared HTTP client with connection pooling and keep-alive
static HTTP_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

fn get_http_client() -> &'static reqwest::Client {
    HTTP_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to create HTTP client")
    })
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Chat-completions translation client.
pub struct Translator {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f64,
    max_output_tokens: u32,
}

impl Translator {
    /// Build from config; errors when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| Error::Config {
            message: "no API key configured; set one with --set-key or TOKEN_LENS_API_KEY".into(),
        })?;
        Ok(Self {
            api_key,
            base_url: config.api_base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    fn request_body<'a>(&'a self, text: &str, target_language: &str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: format!(
                        "You are a professional translator. Translate the following text \
                         to {target_language}. If the text is already in {target_language}, \
                         return it as is. Only return the translation, no explanations or \
                         additional text."
                    ),
                },
                ChatMessage {
                    role: "user",
                    content: text.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_output_tokens,
        }
    }

    /// Translate `text` into `target_language`.
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let response = get_http_client()
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(text, target_language))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .map(|e| e.message);
            return Err(Error::from_status(status, message));
        }

        let body: ChatResponse = response.json().await?;
        let translated = body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .unwrap_or_default();

        if translated.is_empty() {
            return Err(Error::Translation {
                message: "empty response from translation provider".into(),
            });
        }

        Ok(translated)
    }
}

/// Monotonically increasing sequence for in-flight translation requests.
///
/// A new request does not cancel an older one; instead the caller tags each
/// request with `begin()` and drops any response whose ticket is no longer
/// current, so a slow older response can never overwrite a newer one.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; the returned ticket supersedes all earlier ones.
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Whether this ticket is still the most recent request.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::Relaxed) == ticket
    }
}
