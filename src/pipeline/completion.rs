use crate::error::{Error, Result};
use crate::pipeline::traits::CompletionClient;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// OpenAI chat completions in strict JSON mode, bounded by a per-call timeout.
///
/// The client never retries: a rate-limited or failed call surfaces its
/// upstream error on the first attempt.
pub struct OpenAiCompletion {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiCompletion {
    pub fn new(api_key: &str, model: &str, api_base: Option<&str>, timeout: Duration) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = api_base {
            config = config.with_api_base(base);
        }
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        Self {
            client: Client::with_config(config).with_backoff(no_retry),
            model: model.to_string(),
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_request_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
        let built: ChatCompletionRequestMessage = match message.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(message.content.as_str())
                .build()?
                .into(),
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(message.content.as_str())
                .build()?
                .into(),
        };
        Ok(built)
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>> {
        let messages = messages
            .iter()
            .map(Self::to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .response_format(ResponseFormat::JsonObject)
            .build()?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| Error::Timeout(self.timeout))??;

        debug!(model = %self.model, choices = response.choices.len(), "completion received");
        Ok(response
            .choices
            .first()
            .and_then(|c| c.message.content.clone()))
    }
}

/// Parses a completion reply that must be a JSON document of shape `T`.
///
/// Missing or blank content is `EmptyOutput`, text that is not JSON is
/// `MalformedOutput`, and JSON of the wrong shape is `InvalidOutput`.
pub fn decode_reply<T: DeserializeOwned>(content: Option<String>) -> Result<T> {
    let content = content
        .filter(|c| !c.trim().is_empty())
        .ok_or(Error::EmptyOutput)?;
    let value: serde_json::Value =
        serde_json::from_str(content.trim()).map_err(Error::MalformedOutput)?;
    serde_json::from_value(value).map_err(|e| Error::InvalidOutput(e.to_string()))
}
