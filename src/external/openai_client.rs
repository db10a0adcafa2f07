// ABOUTME: OpenAI chat-completions client used for translation and food photo recognition
// ABOUTME: Also provides the passthrough translator used when no API key is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{FoodVision, Translator};
use crate::config::OpenAiConfig;
use crate::constants::{prompts, service_names};
use crate::errors::{external_error, AppError, AppResult};

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// OpenAI API client
pub struct OpenAiClient {
    config: OpenAiConfig,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a new OpenAI client
    #[must_use]
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Whether an API key is configured
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn translation_request(&self, text: &str, target_language: &str) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(prompts::translation_system_prompt(
                        target_language,
                    )),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Text(text.to_owned()),
                },
            ],
            max_tokens: prompts::TRANSLATION_MAX_TOKENS,
            temperature: prompts::TEMPERATURE,
        }
    }

    fn vision_request(&self, image_base64: &str, mime_type: &str) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(prompts::VISION_SYSTEM_PROMPT.to_owned()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: format!("data:{mime_type};base64,{image_base64}"),
                            },
                        },
                        ContentPart::Text {
                            text: prompts::VISION_USER_PROMPT.to_owned(),
                        },
                    ]),
                },
            ],
            max_tokens: prompts::VISION_MAX_TOKENS,
            temperature: prompts::TEMPERATURE,
        }
    }

    /// Send a chat completion and return the trimmed reply text
    async fn complete(&self, request: &ChatRequest<'_>) -> AppResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::external_unavailable(service_names::OPENAI))?;

        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| external_error(service_names::OPENAI, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                service_names::OPENAI,
                format!("HTTP {status}: {body}"),
            ));
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            AppError::external_service(service_names::OPENAI, format!("JSON parse error: {e}"))
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_owned())
            .ok_or_else(|| AppError::external_service(service_names::OPENAI, "Empty completion"))
    }
}

#[async_trait]
impl Translator for OpenAiClient {
    async fn translate(&self, text: &str, target_language: &str) -> AppResult<String> {
        if text.trim().is_empty() {
            return Ok(text.to_owned());
        }
        self.complete(&self.translation_request(text, target_language))
            .await
    }
}

#[async_trait]
impl FoodVision for OpenAiClient {
    async fn describe_food_image(&self, image_base64: &str, mime_type: &str) -> AppResult<String> {
        let reply = self
            .complete(&self.vision_request(image_base64, mime_type))
            .await?;
        tracing::debug!(reply = %reply, "Vision model reply");
        Ok(reply)
    }
}

/// Translator that returns text unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, text: &str, _target_language: &str) -> AppResult<String> {
        Ok(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use serde_json::json;

    fn client(api_key: Option<&str>) -> OpenAiClient {
        OpenAiClient::new(OpenAiConfig {
            api_key: api_key.map(str::to_owned),
            base_url: "http://127.0.0.1:9".into(),
            model: "gpt-4o-mini".into(),
        })
    }

    #[test]
    fn test_translation_request_shape() {
        let client = client(Some("sk-test"));
        let body = serde_json::to_value(client.translation_request("manzana", "en")).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "You are a translator. Translate the following text to en."},
                    {"role": "user", "content": "manzana"}
                ],
                "max_tokens": 15,
                "temperature": 0.3_f32
            })
        );
    }

    #[test]
    fn test_vision_request_embeds_data_url() {
        let client = client(Some("sk-test"));
        let body = serde_json::to_value(client.vision_request("QUJD", "image/png")).unwrap();

        let parts = &body["messages"][1]["content"];
        assert_eq!(parts[0]["type"], "image_url");
        assert_eq!(parts[0]["image_url"]["url"], "data:image/png;base64,QUJD");
        assert_eq!(parts[1]["type"], "text");
        assert_eq!(body["max_tokens"], 150);
    }

    #[test]
    fn test_completion_reply_is_trimmed() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  apple \n"}}]}"#,
        )
        .unwrap();
        let content = body.choices[0].message.content.as_deref().unwrap();
        assert_eq!(content.trim(), "apple");
    }

    #[tokio::test]
    async fn test_unconfigured_client_is_unavailable() {
        let err = client(None)
            .describe_food_image("QUJD", "image/jpeg")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
        assert!(!client(None).is_configured());
    }

    #[tokio::test]
    async fn test_blank_text_is_not_sent() {
        let translated = client(None).translate("  ", "es").await.unwrap();
        assert_eq!(translated, "  ");
    }

    #[tokio::test]
    async fn test_passthrough_translator() {
        let translated = PassthroughTranslator
            .translate("Chicken breast", "es")
            .await
            .unwrap();
        assert_eq!(translated, "Chicken breast");
    }
}
