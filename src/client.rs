//! Completion client for the upstream model endpoint.
//!
//! Wraps an Ollama-style `/api/generate` endpoint: non-streaming, single
//! text response. The client is stateless — it never reads or writes the
//! response cache (callers orchestrate caching), which keeps it testable
//! against a mock server in isolation.
//!
//! Failures surface immediately; no retries happen at this layer. Retrying
//! is a caller/operational concern.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::contracts::{self, Contract, DefaultContext};
use crate::extract;
use crate::telemetry;
use crate::types::GenerateOptions;
use crate::{MuninnError, Result};

/// Default per-call timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Temperature used for structured completions unless overridden — near
/// deterministic so the model sticks to the requested JSON shape.
const STRUCTURED_TEMPERATURE: f64 = 0.1;

/// Client for the upstream completion endpoint.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl CompletionClient {
    /// Create a client with the default timeout.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_timeout(base_url, model, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-call timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http = Client::builder()
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
        }
    }

    /// The model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a completion for `prompt`.
    ///
    /// `overrides` are merged over the default parameter set: any field the
    /// caller sets wins, everything else keeps its default. Returns the raw
    /// generated text.
    ///
    /// # Errors
    ///
    /// [`MuninnError::UpstreamUnavailable`] when the endpoint cannot be
    /// reached or the call exceeds the configured timeout;
    /// [`MuninnError::UpstreamInvalidResponse`] when it responds but the
    /// payload is non-2xx or carries no generated text.
    pub async fn complete(
        &self,
        prompt: &str,
        overrides: Option<&GenerateOptions>,
    ) -> Result<String> {
        let options = overrides
            .cloned()
            .unwrap_or_default()
            .merged_over(&GenerateOptions::defaults());
        self.generate(prompt, &options, "complete").await
    }

    /// Generate a completion and recover a structured object from it.
    ///
    /// Runs at near-deterministic temperature, pipes the output through
    /// [`extract`](crate::extract::extract), then applies the defaulting
    /// rules `contract` names against `ctx` (pass `None` / an empty context
    /// for contract-less extraction).
    pub async fn complete_structured(
        &self,
        prompt: &str,
        contract: Option<Contract>,
        ctx: &DefaultContext<'_>,
    ) -> Result<Map<String, Value>> {
        let overrides = GenerateOptions::default().temperature(STRUCTURED_TEMPERATURE);
        let text = self.complete(prompt, Some(&overrides)).await?;
        let object = extract::extract(&text)?;
        Ok(contracts::apply_defaults(contract, object, ctx))
    }

    /// Probe the endpoint with a tiny generation request.
    ///
    /// Used by health checks at process start; failures map exactly like
    /// [`complete`](Self::complete) failures.
    pub async fn ping(&self) -> Result<()> {
        let options = GenerateOptions::default()
            .temperature(STRUCTURED_TEMPERATURE)
            .max_tokens(10)
            .merged_over(&GenerateOptions::defaults());
        self.generate("ping", &options, "ping").await.map(|_| ())
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
        operation: &'static str,
    ) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        tracing::debug!(
            model = %self.model,
            operation,
            prompt_len = prompt.len(),
            "sending completion request"
        );

        let started = Instant::now();
        let result = tokio::time::timeout(self.timeout, self.send(&url, prompt, options))
            .await
            .unwrap_or_else(|_| {
                Err(MuninnError::UpstreamUnavailable(format!(
                    "timed out after {:?}",
                    self.timeout
                )))
            });

        let elapsed = started.elapsed();
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "operation" => operation)
            .record(elapsed.as_secs_f64());
        let status = if result.is_ok() { "ok" } else { "error" };
        metrics::counter!(
            telemetry::REQUESTS_TOTAL,
            "operation" => operation,
            "status" => status,
        )
        .increment(1);

        match &result {
            Ok(text) => tracing::debug!(
                operation,
                response_len = text.len(),
                ?elapsed,
                "completion request succeeded"
            ),
            Err(e) => tracing::error!(operation, error = %e, "completion request failed"),
        }
        result
    }

    async fn send(&self, url: &str, prompt: &str, options: &GenerateOptions) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options,
        };

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| MuninnError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MuninnError::UpstreamInvalidResponse {
                status: Some(status.as_u16()),
                message: "completion endpoint returned an error status".to_string(),
            });
        }

        let payload: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| MuninnError::UpstreamInvalidResponse {
                    status: None,
                    message: format!("unparseable response body: {e}"),
                })?;

        match payload.response {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(MuninnError::UpstreamInvalidResponse {
                status: None,
                message: "response payload carries no generated text".to_string(),
            }),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a GenerateOptions,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}
