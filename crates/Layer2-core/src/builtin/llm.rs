//! 기본 LLM: `gpt-3.5-turbo` (OpenAI), `echo`

use crate::capability::{Llm, LlmResponse, Prompt};
use crate::registry::BuildContext;
use async_trait::async_trait;
use quill_foundation::{Error, Result};
use quill_provider::OpenAiClient;
use tracing::debug;

pub const GPT_3_5_TURBO: &str = "gpt-3.5-turbo";
pub const ECHO: &str = "echo";

/// API 키를 읽는 기본 환경 변수
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

// ============================================================================
// OpenAiLlm
// ============================================================================

/// OpenAI chat completion LLM
///
/// `[llm]` 설정 키:
/// - `api_key_env`: API 키 환경 변수 이름 (기본 `OPENAI_API_KEY`)
/// - `base_url`: OpenAI 호환 엔드포인트
/// - `model`: 실제 요청할 모델 ID (기본 `gpt-3.5-turbo`)
/// - `max_tokens`
///
/// 키가 없어도 생성은 성공하고, `generate` 호출 시 `GenerationError`가 납니다.
pub struct OpenAiLlm {
    name: String,
    client: OpenAiClient,
}

impl OpenAiLlm {
    pub fn create(ctx: &BuildContext<'_>) -> Result<Box<dyn Llm>> {
        let llm = &ctx.config.llm;
        let key_env = llm.extra.get_str("api_key_env").unwrap_or(DEFAULT_API_KEY_ENV);
        let api_key = std::env::var(key_env).ok();
        if api_key.is_none() {
            debug!("{} is not set; generation will fail until it is", key_env);
        }

        let model = llm.extra.get_str("model").unwrap_or(GPT_3_5_TURBO);
        let mut client = OpenAiClient::new(model)
            .with_api_key(api_key)
            .with_default_timeout()?;

        if let Some(base_url) = llm.extra.get_str("base_url") {
            client = client.with_base_url(base_url);
        }
        if let Some(max_tokens) = llm.extra.get_integer("max_tokens") {
            let max_tokens = u32::try_from(max_tokens).map_err(|_| {
                Error::Validation(format!("llm.max_tokens out of range: {}", max_tokens))
            })?;
            client = client.with_max_tokens(max_tokens);
        }

        Ok(Box::new(Self {
            name: llm.model_name.clone(),
            client,
        }))
    }
}

#[async_trait]
impl Llm for OpenAiLlm {
    fn model_name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: Prompt) -> Result<LlmResponse> {
        let completion = self.client.complete(&prompt.into_messages()).await?;
        Ok(LlmResponse {
            content: completion.content,
            model: completion.model,
        })
    }
}

// ============================================================================
// EchoLlm
// ============================================================================

/// 입력(마지막 user 메시지)을 그대로 돌려주는 LLM
pub struct EchoLlm {
    name: String,
}

impl EchoLlm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn create(ctx: &BuildContext<'_>) -> Result<Box<dyn Llm>> {
        Ok(Box::new(Self::new(ctx.config.llm.model_name.clone())))
    }
}

#[async_trait]
impl Llm for EchoLlm {
    fn model_name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: Prompt) -> Result<LlmResponse> {
        Ok(LlmResponse {
            content: prompt.last_user_text().to_string(),
            model: self.name.clone(),
        })
    }
}
