//! Capability - 플러그인이 구현하는 네 가지 역할
//!
//! - `Llm`: 프롬프트 -> 응답
//! - `Bot`: LLM을 소유하고 생성을 위임
//! - `Server`: 빌드 결과물을 취소될 때까지 서비스
//! - `Project`: Bot/Server를 소유하고 build/deploy/test/serve 수행
//!
//! 구현체는 모두 말단(leaf)이며, 팩토리에 등록된 생성자로만 만들어집니다.

mod bot;
mod llm;
mod project;
mod server;

pub use bot::Bot;
pub use llm::{Llm, LlmResponse, Prompt};
pub use project::{BuildOutput, Project};
pub use server::{RunOptions, Server, DEFAULT_PORT};
