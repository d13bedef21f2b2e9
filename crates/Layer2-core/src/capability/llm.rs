//! LLM capability - 프롬프트를 받아 응답을 생성

use async_trait::async_trait;
use quill_foundation::Result;
use quill_provider::{Message, MessageRole};

/// LLM 입력: 단일 텍스트 또는 대화 메시지 목록
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Text(String),
    Messages(Vec<Message>),
}

impl Prompt {
    /// 대화 메시지 목록으로 변환 (텍스트는 user 메시지 하나)
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            Prompt::Text(text) => vec![Message::user(text)],
            Prompt::Messages(messages) => messages,
        }
    }

    /// 텍스트 또는 마지막 user 메시지 내용
    pub fn last_user_text(&self) -> &str {
        match self {
            Prompt::Text(text) => text,
            Prompt::Messages(messages) => messages
                .iter()
                .rev()
                .find(|m| m.role == MessageRole::User)
                .map(|m| m.content.as_str())
                .unwrap_or_default(),
        }
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Prompt::Text(text.to_string())
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Prompt::Text(text)
    }
}

impl From<Vec<Message>> for Prompt {
    fn from(messages: Vec<Message>) -> Self {
        Prompt::Messages(messages)
    }
}

/// LLM 응답
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    pub content: String,

    /// 응답을 만든 모델 이름
    pub model: String,
}

/// LLM capability
///
/// 인증 정보와 모델 식별자는 생성 시점에 확정됩니다.
/// 제공자 호출 실패는 `GenerationError`로 호출자에게 전달되며 재시도하지 않습니다.
#[async_trait]
pub trait Llm: Send + Sync {
    /// 모델 이름 (llm 분류의 타입 이름)
    fn model_name(&self) -> &str;

    /// 응답 생성
    async fn generate(&self, prompt: Prompt) -> Result<LlmResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_text_into_messages() {
        let messages = Prompt::from("hi").into_messages();
        assert_eq!(messages, vec![Message::user("hi")]);
    }

    #[test]
    fn test_last_user_text() {
        let prompt = Prompt::from(vec![
            Message::system("persona"),
            Message::user("first"),
            Message::assistant("reply"),
            Message::user("second"),
        ]);
        assert_eq!(prompt.last_user_text(), "second");

        let empty = Prompt::Messages(vec![Message::system("only system")]);
        assert_eq!(empty.last_user_text(), "");
    }
}
