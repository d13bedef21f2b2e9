//! Bot capability - LLM을 소유하고 생성 요청을 위임

use super::llm::{Llm, LlmResponse, Prompt};
use async_trait::async_trait;
use quill_foundation::Result;

/// Bot capability
///
/// 생성 시 LLM 팩토리로 자신의 LLM을 만들어 소유합니다.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Bot 이름 (bot 분류의 타입 이름)
    fn name(&self) -> &str;

    /// 소유한 LLM
    fn llm(&self) -> &dyn Llm;

    /// 응답 생성 (기본: LLM에 그대로 위임)
    async fn generate(&self, prompt: Prompt) -> Result<LlmResponse> {
        self.llm().generate(prompt).await
    }
}
