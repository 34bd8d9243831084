//! Client for the hosted text-generation endpoint.
//!
//! One POST per attempt, bounded retries. A 503 means the model is still
//! loading and gets a fixed wait; a 404 can never succeed and aborts at once;
//! anything else backs off linearly (`backoff_step * attempt`).

use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;

const TOP_P: f32 = 0.95;

#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
    pub options: GenerationOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub do_sample: bool,
    pub return_full_text: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationOptions {
    pub wait_for_model: bool,
}

impl GenerationRequest {
    pub fn new(prompt: &str, max_new_tokens: u32, temperature: f32) -> Self {
        Self {
            inputs: prompt.to_string(),
            parameters: GenerationParameters {
                max_new_tokens,
                temperature,
                top_p: TOP_P,
                do_sample: temperature > 0.0,
                return_full_text: false,
            },
            options: GenerationOptions {
                wait_for_model: true,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InferenceTransport: Send + Sync {
    /// Transport-level failures come back as `Err`; any HTTP status, including
    /// errors, comes back as `Ok`.
    async fn send(&self, api_key: &str, request: &GenerationRequest) -> Result<TransportResponse>;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(client: Client, url: String, timeout: Duration) -> Self {
        Self {
            client,
            url,
            timeout,
        }
    }
}

#[async_trait]
impl InferenceTransport for HttpTransport {
    async fn send(&self, api_key: &str, request: &GenerationRequest) -> Result<TransportResponse> {
        let res = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(request)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        Ok(TransportResponse { status, body })
    }
}

/// The endpoint answers with a list of generations, a single generation,
/// or plain text depending on the model and task.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceResponse {
    Batch(Vec<JsonValue>),
    Single(String),
    Text(String),
    Unrecognized(String),
}

impl InferenceResponse {
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<JsonValue>(body) {
            Ok(JsonValue::Array(items)) => InferenceResponse::Batch(items),
            Ok(JsonValue::Object(obj)) => match obj.get("generated_text").and_then(|t| t.as_str()) {
                Some(text) => InferenceResponse::Single(text.to_string()),
                None => InferenceResponse::Unrecognized(JsonValue::Object(obj).to_string()),
            },
            Ok(JsonValue::String(text)) => InferenceResponse::Text(text),
            Ok(other) => InferenceResponse::Unrecognized(other.to_string()),
            Err(_) if !body.trim().is_empty() => InferenceResponse::Text(body.to_string()),
            Err(_) => InferenceResponse::Unrecognized(String::new()),
        }
    }

    pub fn into_text(self) -> Result<String> {
        match self {
            InferenceResponse::Batch(items) => items
                .iter()
                .find_map(|item| item.get("generated_text").and_then(|t| t.as_str()))
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::UnexpectedShape(format!(
                        "array of {} item(s) without generated_text",
                        items.len()
                    ))
                }),
            InferenceResponse::Single(text) | InferenceResponse::Text(text) => Ok(text),
            InferenceResponse::Unrecognized(body) => Err(Error::UnexpectedShape(preview(&body))),
        }
    }
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub model_loading_wait: Duration,
    pub backoff_step: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model_loading_wait: Duration::from_millis(config.model_loading_wait_ms),
            backoff_step: Duration::from_millis(config.retry_backoff_ms),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            model_loading_wait: Duration::from_secs(10),
            backoff_step: Duration::from_millis(2000),
        }
    }
}

#[derive(Clone)]
pub struct InferenceClient {
    transport: Arc<dyn InferenceTransport>,
    api_key: Option<String>,
    policy: RetryPolicy,
}

impl InferenceClient {
    pub fn new(
        transport: Arc<dyn InferenceTransport>,
        api_key: Option<String>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            api_key,
            policy,
        }
    }

    pub async fn generate(
        &self,
        prompt: &str,
        max_new_tokens: u32,
        temperature: f32,
        retries: u32,
    ) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::Config("HUGGINGFACE_API_KEY is not configured".to_string())
        })?;
        if prompt.trim().is_empty() {
            return Err(Error::BadRequest("prompt must not be empty".to_string()));
        }

        let retries = retries.max(1);
        let request = GenerationRequest::new(prompt, max_new_tokens, temperature);

        for attempt in 1..=retries {
            tracing::debug!(attempt, retries, "Sending inference request");

            let err = match self.transport.send(api_key, &request).await {
                Ok(res) if res.is_success() => {
                    match InferenceResponse::from_body(&res.body).into_text() {
                        Ok(text) => {
                            tracing::debug!(attempt, chars = text.len(), "Inference succeeded");
                            return Ok(text);
                        }
                        Err(e) => e,
                    }
                }
                Ok(res) if res.status == 503 && attempt < retries => {
                    tracing::info!(
                        attempt,
                        wait_ms = self.policy.model_loading_wait.as_millis() as u64,
                        "Model is loading, waiting before retry"
                    );
                    tokio::time::sleep(self.policy.model_loading_wait).await;
                    continue;
                }
                Ok(res) if res.status == 404 => {
                    tracing::error!("Inference endpoint returned 404, not retrying");
                    return Err(Error::NotFound(format!(
                        "inference resource not found: {}",
                        preview(&res.body)
                    )));
                }
                Ok(res) => Error::Upstream {
                    status: res.status,
                    body: preview(&res.body),
                },
                Err(e) => e,
            };

            if !err.is_retryable() || attempt == retries {
                tracing::error!(attempt, error = %err, "Inference failed, giving up");
                return Err(err);
            }

            let backoff = self.policy.backoff_step * attempt;
            tracing::warn!(
                attempt,
                backoff_ms = backoff.as_millis() as u64,
                error = %err,
                "Inference attempt failed, backing off"
            );
            tokio::time::sleep(backoff).await;
        }

        Err(Error::Internal("inference retry loop exited without a result".to_string()))
    }
}
