//! 기본 Bot: `baby-quill`, `simple`

use crate::capability::{Bot, Llm, LlmResponse, Prompt};
use crate::registry::BuildContext;
use async_trait::async_trait;
use quill_foundation::Result;
use quill_provider::{Message, MessageRole};

pub const BABY_QUILL: &str = "baby-quill";
pub const SIMPLE: &str = "simple";

pub const BABY_QUILL_PERSONA: &str =
    "You are Baby Quill, the infant version of next generation code genies. \
     Answer briefly and help the user build their project.";

// ============================================================================
// BabyQuill
// ============================================================================

/// 페르소나 system 메시지를 붙여 LLM에 위임하는 Bot
///
/// `[bot] persona`로 페르소나를 바꿀 수 있습니다.
/// 프롬프트에 이미 system 메시지가 있으면 그대로 둡니다.
pub struct BabyQuill {
    name: String,
    persona: String,
    llm: Box<dyn Llm>,
}

impl BabyQuill {
    pub fn create(ctx: &BuildContext<'_>) -> Result<Box<dyn Bot>> {
        let persona = ctx
            .config
            .bot
            .extra
            .get_str("persona")
            .unwrap_or(BABY_QUILL_PERSONA)
            .to_string();

        Ok(Box::new(Self {
            name: ctx.config.bot.name.clone(),
            persona,
            llm: ctx.quill.create_llm(ctx.config)?,
        }))
    }
}

#[async_trait]
impl Bot for BabyQuill {
    fn name(&self) -> &str {
        &self.name
    }

    fn llm(&self) -> &dyn Llm {
        self.llm.as_ref()
    }

    async fn generate(&self, prompt: Prompt) -> Result<LlmResponse> {
        let mut messages = prompt.into_messages();
        if !messages.iter().any(|m| m.role == MessageRole::System) {
            messages.insert(0, Message::system(self.persona.clone()));
        }
        self.llm.generate(Prompt::Messages(messages)).await
    }
}

// ============================================================================
// SimpleBot
// ============================================================================

/// 프롬프트를 그대로 LLM에 위임하는 Bot
pub struct SimpleBot {
    name: String,
    llm: Box<dyn Llm>,
}

impl SimpleBot {
    pub fn new(name: impl Into<String>, llm: Box<dyn Llm>) -> Self {
        Self {
            name: name.into(),
            llm,
        }
    }

    pub fn create(ctx: &BuildContext<'_>) -> Result<Box<dyn Bot>> {
        Ok(Box::new(Self::new(
            ctx.config.bot.name.clone(),
            ctx.quill.create_llm(ctx.config)?,
        )))
    }
}

#[async_trait]
impl Bot for SimpleBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn llm(&self) -> &dyn Llm {
        self.llm.as_ref()
    }
}
