pub mod prompt;
pub mod wire;

use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, instrument};
use vibe_core::{FormatKind, PrettyConfig, RemoteError};

pub use prompt::{build_request, instruction_for};
pub use wire::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChoiceMessage};

// One attempt per call; no retries.
pub trait CompletionTransport: Send + Sync {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
        credential: &str,
    ) -> Result<ChatCompletionResponse, RemoteError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder().build().unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }
}

impl CompletionTransport for HttpTransport {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
        credential: &str,
    ) -> Result<ChatCompletionResponse, RemoteError> {
        let response = self
            .client
            .post(self.endpoint.as_str())
            .bearer_auth(credential)
            .json(request)
            .send()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;
        serde_json::from_slice::<ChatCompletionResponse>(&body)
            .map_err(|err| RemoteError::MalformedResponse(err.to_string()))
    }
}

#[derive(Clone)]
pub struct RemoteFormatter<T> {
    config: Arc<PrettyConfig>,
    transport: T,
}

impl<T> RemoteFormatter<T>
where
    T: CompletionTransport,
{
    pub fn new(config: Arc<PrettyConfig>, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // The completion is trimmed but not re-validated.
    #[instrument(skip(self, text, credential), fields(model = %self.config.model))]
    pub async fn format(
        &self,
        text: &str,
        kind: FormatKind,
        credential: &str,
    ) -> Result<String, RemoteError> {
        let request = build_request(&self.config, text, kind);
        let response = self.transport.complete(&request, credential).await?;
        let content = response
            .first_content()
            .ok_or(RemoteError::EmptyCompletion)?;

        debug!(kind = %kind, chars = content.len(), "remote completion received");
        Ok(content)
    }
}
