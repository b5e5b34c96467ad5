//! HTTP client for an OpenAI-compatible chat-completions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Response};
use tracing::{debug, info, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Completion, LlmConfig, RetryConfig};
use crate::domain::ports::ChatModel;

use super::error::OpenAiApiError;
use super::retry::RetryPolicy;
use super::types::{ChatCompletionRequest, ChatCompletionResponse};

/// Chat-completions client with connection pooling, request timeouts, and
/// exponential-backoff retries for transient errors.
pub struct OpenAiClient {
    http_client: ReqwestClient,
    base_url: String,
    model: String,
    retry_policy: RetryPolicy,
}

impl OpenAiClient {
    /// Build a client from configuration. The API key comes from config or
    /// the `OPENAI_API_KEY` environment variable.
    pub fn new(config: &LlmConfig, retry: &RetryConfig) -> DomainResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                DomainError::Config(
                    "LLM API key not set. Set OPENAI_API_KEY or configure llm.api_key".to_string(),
                )
            })?;

        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| DomainError::Config(format!("Invalid API key: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = ReqwestClient::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_nodelay(true)
            .default_headers(headers)
            .build()
            .map_err(|e| DomainError::ServiceUnavailable(format!("HTTP client: {e}")))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            timeout_secs = config.timeout_secs,
            "Initialized chat-completions client"
        );

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            retry_policy: RetryPolicy::new(
                retry.max_retries,
                retry.initial_backoff_ms,
                retry.max_backoff_ms,
            ),
        })
    }

    async fn execute_chat_request(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<Completion, OpenAiApiError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("POST {}", url);

        let response = self.http_client.post(&url).json(request).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> Result<Completion, OpenAiApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(OpenAiApiError::from_status(status, body));
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| OpenAiApiError::MalformedResponse("empty choices".to_string()))?;

        Ok(Completion {
            text: choice.message.content,
            usage: parsed.usage.into(),
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    fn model_id(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> DomainResult<Completion> {
        let request = ChatCompletionRequest::single_turn(&self.model, prompt);

        let completion = self
            .retry_policy
            .execute(|| self.execute_chat_request(&request))
            .await?;

        debug!(
            prompt_tokens = completion.usage.prompt_tokens,
            completion_tokens = completion.usage.completion_tokens,
            "Completion received"
        );

        Ok(completion)
    }
}
