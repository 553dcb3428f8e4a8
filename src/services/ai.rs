use crate::config::{Config, RetryPolicy};
use crate::error::{QuoteError, QuoteResult};
use crate::services::ai_types::{AiError, ChatRequest};

use rand::{thread_rng, Rng};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, warn};

use std::{thread, time::Duration};

/// Anything that turns a chat request into generated text.
pub trait CompletionClient {
    fn complete(&self, request: &ChatRequest) -> Result<String, AiError>;
}

pub struct HttpCompletionClient {
    client: Client,
    endpoint: String,
    api_key: String,
    retry: RetryPolicy,
}

impl HttpCompletionClient {
    pub fn new(cfg: &Config) -> QuoteResult<Self> {
        cfg.validate_api_url()?;

        let api_key = cfg.api_key.clone().ok_or_else(|| QuoteError::Config {
            message: "API key is not set".into(),
        })?;

        let client = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| QuoteError::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(HttpCompletionClient {
            client,
            endpoint: cfg.api_url.clone(),
            api_key,
            retry: cfg.retry,
        })
    }
}

impl CompletionClient for HttpCompletionClient {
    fn complete(&self, request: &ChatRequest) -> Result<String, AiError> {
        let body = request.body();
        let attempts = self.retry.max_attempts.max(1);
        let mut last_err = AiError::Transport("no attempt made".into());

        for attempt in 0..attempts {
            let last_attempt = attempt + 1 >= attempts;

            let res = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send();

            let resp = match res {
                Ok(r) => r,
                Err(err) => {
                    last_err = AiError::Transport(err.to_string());
                    if !last_attempt {
                        retry_pause(&self.retry, attempt, &last_err);
                    }
                    continue;
                }
            };

            let status = resp.status();

            // Read as text first so an error body survives a JSON failure.
            let text = match resp.text() {
                Ok(t) => t,
                Err(err) => {
                    last_err = AiError::Transport(err.to_string());
                    if !last_attempt {
                        retry_pause(&self.retry, attempt, &last_err);
                    }
                    continue;
                }
            };

            if !status.is_success() {
                last_err = AiError::Http {
                    status: status.as_u16(),
                    message: extract_error_message(&text),
                };
                if should_retry_http(status) && !last_attempt {
                    retry_pause(&self.retry, attempt, &last_err);
                    continue;
                }
                break;
            }

            // A 200 with an unusable body is not retried: the model answered.
            return extract_content(&text);
        }

        Err(last_err)
    }
}

fn retry_pause(policy: &RetryPolicy, attempt: usize, err: &AiError) {
    let delay = backoff(policy.base_delay, attempt);
    warn!(attempt = attempt + 1, delay_ms = delay.as_millis() as u64, "retrying after: {err}");
    thread::sleep(delay);
}

fn backoff(base: Duration, attempt: usize) -> Duration {
    let jitter: u64 = thread_rng().gen_range(0..200);
    let ms = base.as_millis() as u64 * 2_u64.pow(attempt as u32) + jitter;
    Duration::from_millis(ms)
}

fn should_retry_http(status: StatusCode) -> bool {
    status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
}

/// Generated text at `choices[0].message.content`, trimmed.
pub fn extract_content(body_text: &str) -> Result<String, AiError> {
    let json: serde_json::Value = serde_json::from_str(body_text)
        .map_err(|_| AiError::InvalidResponse("body is not JSON".into()))?;

    let content = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| AiError::InvalidResponse("missing choices[0].message.content".into()))?;

    debug!(chars = content.len(), "completion received");
    Ok(content.trim().to_string())
}

/// `{ "error": { "message" } }`, then `{ "message" }`, then the raw body (capped).
pub fn extract_error_message(body_text: &str) -> String {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return msg.to_string();
        }
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }

    let trimmed = body_text.trim();
    if trimmed.chars().count() > 400 {
        let snippet: String = trimmed.chars().take(400).collect();
        format!("{snippet}...")
    } else {
        trimmed.to_string()
    }
}
