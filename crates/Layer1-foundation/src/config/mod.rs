//! Config - 프로젝트 설정 관리
//!
//! - `quill.rs` - QuillConfig (quill.toml 로드/저장/검증)
//! - `settings.rs` - 플러그인별 추가 설정 (각 테이블의 나머지 키)

mod quill;
mod settings;

pub use quill::{BotConfig, LlmConfig, ProjectConfig, QuillConfig, ServerConfig, QUILL_CONFIG_FILE};
pub use settings::Settings;
