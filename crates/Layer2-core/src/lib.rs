//! quill-core: Core Runtime for Quill
//!
//! Layer2 - capability, 팩토리, 플러그인, 컴포지션 루트
//!
//! # 주요 모듈
//!
//! - `capability`: Llm / Bot / Server / Project trait
//! - `registry`: capability별 `Factory` (타입 이름 -> 생성자)
//! - `quill`: 컴포지션 루트 `Quill`
//! - `plugin`: TOML 플러그인 매니페스트와 발견
//! - `builtin`: 기본 제공 구현
//!
//! # 사용 예시
//!
//! ```ignore
//! use quill_core::Quill;
//! use quill_foundation::QuillConfig;
//! use tokio_util::sync::CancellationToken;
//!
//! let quill = Quill::with_builtins()?;
//! let config = QuillConfig::load(Path::new("."))?;
//!
//! // Project -> Bot -> Llm, Project -> Server
//! let project = quill.create_project(&config)?;
//! let reply = project.bot().generate("hello".into()).await?;
//!
//! project.serve(None, CancellationToken::new()).await?;
//! ```

pub mod builtin;
pub mod capability;
pub mod plugin;
pub mod quill;
pub mod registry;

// Re-exports: Capability
pub use capability::{
    Bot, BuildOutput, Llm, LlmResponse, Project, Prompt, RunOptions, Server, DEFAULT_PORT,
};

// Re-exports: Registry
pub use registry::{
    BotFactory, BuildContext, Constructor, Factory, LlmFactory, ProjectFactory, ServerFactory,
};

// Re-exports: Plugin
pub use plugin::{PluginDiscovery, PluginManifest, PluginScope, TypeDeclaration};

// Re-exports: Composition root
pub use quill::Quill;

// Re-exports: 자주 쓰는 하위 레이어 타입
pub use quill_foundation::{Category, Error, QuillConfig, Result, TypeRegistry};
pub use quill_provider::{Message, MessageRole};
pub use tokio_util::sync::CancellationToken;
