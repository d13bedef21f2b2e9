//! OpenAI chat completions 클라이언트 (non-streaming)
//!
//! `base_url`을 바꾸면 같은 wire format을 쓰는 호환 서버에도 붙습니다.

use crate::{error::ProviderError, Message};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    ContentFilter,
    Other,
}

impl FinishReason {
    fn from_wire(reason: Option<&str>) -> Self {
        match reason {
            Some("stop") => FinishReason::Stop,
            Some("length") => FinishReason::MaxTokens,
            Some("content_filter") => FinishReason::ContentFilter,
            _ => FinishReason::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// 첫 번째 choice 결과
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    /// 응답이 보고한 모델 (없으면 요청한 모델)
    pub model: String,
    pub usage: TokenUsage,
    pub finish_reason: FinishReason,
}

/// API 키는 생성 시점에 없어도 됩니다. `complete`가 `NotConfigured`로 알립니다.
pub struct OpenAiClient {
    http: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(model: impl Into<String>) -> Self {
        OpenAiClient {
            http: Client::new(),
            api_key: None,
            model: model.into(),
            base_url: DEFAULT_API_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// 공백뿐인 키는 없는 것으로 취급
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ProviderError> {
        self.http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(e.to_string()))?;
        Ok(self)
    }

    /// 300초 타임아웃
    pub fn with_default_timeout(self) -> Result<Self, ProviderError> {
        self.with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body<'a>(&'a self, messages: &'a [Message]) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            stream: false,
        }
    }

    /// 에러 본문의 `error.code`가 있으면 그걸로, 없으면 상태 코드로 분류
    fn classify_failure(status: u16, body: &str) -> ProviderError {
        let Ok(ErrorEnvelope { error }) = serde_json::from_str::<ErrorEnvelope>(body) else {
            return ProviderError::from_http_status(status, body);
        };

        match error.code.as_deref() {
            Some("invalid_api_key") => ProviderError::Authentication(error.message),
            Some("insufficient_quota") => ProviderError::QuotaExceeded(error.message),
            Some("model_not_found") => ProviderError::ModelNotFound(error.message),
            Some("context_length_exceeded") => ProviderError::ContextLengthExceeded(error.message),
            Some("rate_limit_exceeded") => ProviderError::RateLimited {
                retry_after_ms: None,
            },
            _ => ProviderError::from_http_status(status, &error.message),
        }
    }

    pub async fn complete(&self, messages: &[Message]) -> Result<Completion, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::NotConfigured(
                "OpenAI API key is not set".to_string(),
            ));
        };

        debug!(
            "POST {} model={} messages={}",
            self.base_url,
            self.model,
            messages.len()
        );

        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(&self.request_body(messages))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_failure(status.as_u16(), &body));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        body.into_completion(&self.model)
    }
}

// ============================================================================
// wire format
// ============================================================================

/// `Message`는 그대로 `{"role", "content"}`로 직렬화됩니다.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<Content>,
}

/// 문자열 또는 `[{"type": "text", "text": ...}]`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl Content {
    fn into_text(self) -> String {
        match self {
            Content::Text(text) => text,
            Content::Parts(parts) => parts
                .into_iter()
                .filter(|p| p.kind == "text")
                .filter_map(|p| p.text)
                .collect(),
        }
    }
}

impl ChatResponse {
    fn into_completion(self, requested_model: &str) -> Result<Completion, ProviderError> {
        let Some(choice) = self.choices.into_iter().next() else {
            return Err(ProviderError::InvalidResponse(
                "response has no choices".to_string(),
            ));
        };

        let usage = self.usage.map_or_else(TokenUsage::default, |u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });

        Ok(Completion {
            content: choice.message.content.map(Content::into_text).unwrap_or_default(),
            model: self.model.unwrap_or_else(|| requested_model.to_string()),
            usage,
            finish_reason: FinishReason::from_wire(choice.finish_reason.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let client = OpenAiClient::new("gpt-3.5-turbo").with_max_tokens(64);
        let messages = [Message::system("be brief"), Message::user("hi")];
        let json = serde_json::to_value(client.request_body(&messages)).unwrap();

        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 64);
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_completion_from_response() {
        let body = r#"{
            "model": "gpt-3.5-turbo-0125",
            "choices": [{"message": {"role": "assistant", "content": "Hello!"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 9, "completion_tokens": 3}
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        let completion = response.into_completion("gpt-3.5-turbo").unwrap();

        assert_eq!(completion.content, "Hello!");
        assert_eq!(completion.model, "gpt-3.5-turbo-0125");
        assert_eq!(completion.finish_reason, FinishReason::Stop);
        assert_eq!(completion.usage.output_tokens, 3);
    }

    #[test]
    fn test_content_parts_are_joined() {
        let body = r#"{"choices": [{"message": {"content": [
            {"type": "text", "text": "Hel"},
            {"type": "image_url"},
            {"type": "text", "text": "lo"}
        ]}, "finish_reason": "length"}]}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        let completion = response.into_completion("m").unwrap();

        assert_eq!(completion.content, "Hello");
        assert_eq!(completion.model, "m");
        assert_eq!(completion.finish_reason, FinishReason::MaxTokens);
        assert_eq!(completion.usage, TokenUsage::default());
    }

    #[test]
    fn test_response_without_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            response.into_completion("m"),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_classify_failure() {
        let body = r#"{"error": {"message": "Incorrect API key", "type": "invalid_request_error", "code": "invalid_api_key"}}"#;
        assert_eq!(
            OpenAiClient::classify_failure(401, body),
            ProviderError::Authentication("Incorrect API key".to_string())
        );

        assert!(matches!(
            OpenAiClient::classify_failure(502, "<html>bad gateway</html>"),
            ProviderError::ServerError(_)
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = OpenAiClient::new("gpt-3.5-turbo").with_api_key(Some("  ".to_string()));
        assert!(!client.is_available());

        let err = client.complete(&[Message::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
