//! Генератор текста: внешний сервис с непрозрачным поведением

use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

/// generate_text(prompt) -> string; может завершиться ошибкой
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Используется, когда endpoint не настроен: каждый вызов - ошибка
pub struct UnavailableGenerator;

#[async_trait]
impl TextGenerator for UnavailableGenerator {
    async fn generate_text(&self, _prompt: &str) -> anyhow::Result<String> {
        Err(anyhow!("text generation endpoint is not configured"))
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Клиент OpenAI-совместимого chat/completions
pub struct HttpTextGenerator {
    client: reqwest::Client,
    config: LlmConfig,
}

impl HttpTextGenerator {
    pub fn new(config: LlmConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate_text(&self, prompt: &str) -> anyhow::Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.config.temperature,
        };

        let mut builder = self.client.post(self.config.endpoint.as_str()).json(&request);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await.context("text generation request failed")?;

        let status = response.status();
        let body = response.text().await.context("failed to read response body")?;
        if !status.is_success() {
            return Err(anyhow!("text generation API error {}: {}", status, body));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).context("unexpected text generation response")?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("text generation returned empty content"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> LlmConfig {
        LlmConfig {
            endpoint: format!("{}/v1/chat/completions", server.uri()),
            api_key: Some("secret".to_string()),
            model: "test-model".to_string(),
            temperature: 0.2,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "content": "BEST_ID: 1\nREASONING:\n- ok" } }]
            })))
            .mount(&server)
            .await;

        let generator = HttpTextGenerator::new(config_for(&server)).unwrap();
        let text = generator.generate_text("prompt").await.unwrap();
        assert_eq!(text, "BEST_ID: 1\nREASONING:\n- ok");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let generator = HttpTextGenerator::new(config_for(&server)).unwrap();
        let err = generator.generate_text("prompt").await.unwrap_err();
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn empty_choices_are_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
            .mount(&server)
            .await;

        let generator = HttpTextGenerator::new(config_for(&server)).unwrap();
        assert!(generator.generate_text("prompt").await.is_err());
    }

    #[tokio::test]
    async fn unavailable_generator_always_fails() {
        assert!(UnavailableGenerator.generate_text("prompt").await.is_err());
    }
}
