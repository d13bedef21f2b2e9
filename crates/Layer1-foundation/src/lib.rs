//! # quill-foundation
//!
//! Foundation layer for Quill:
//! - Error: 에러 분류 (ConfigError, UnknownTypeError, BuildError ...)
//! - Registry: Capability 분류별 타입 이름 레지스트리
//! - Config: quill.toml 설정 (로드/저장/검증)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  quill.toml ──▶ QuillConfig                             │
//! │                   │  project.project_type               │
//! │                   │  bot.name / llm.model_name          │
//! │                   │  server.name                        │
//! │                   ▼                                     │
//! │           TypeRegistry (Category -> [name, ...])        │
//! │                   │                                     │
//! │                   ▼                                     │
//! │           quill-core Factory<T> (name -> constructor)   │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod registry;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Registry
// ============================================================================
pub use registry::{Category, TypeRegistry};

// ============================================================================
// Config
// ============================================================================
pub use config::{
    BotConfig, LlmConfig, ProjectConfig, QuillConfig, ServerConfig, Settings, QUILL_CONFIG_FILE,
};
