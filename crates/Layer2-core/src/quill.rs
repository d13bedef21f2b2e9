//! Quill - 컴포지션 루트
//!
//! 공유 `TypeRegistry`와 capability별 팩토리 네 개를 소유합니다.
//! 전역 싱글톤 대신 이 값을 생성자에 명시적으로 전달합니다 (`BuildContext`).
//!
//! ```text
//! QuillConfig
//!     │ project.project_type
//!     ▼
//! ProjectFactory ──► Project
//!                      ├─ bot.name ──────► BotFactory ──► Bot
//!                      │                                   └─ llm.model_name ──► LlmFactory ──► Llm
//!                      └─ server.name ───► ServerFactory ──► Server
//! ```

use crate::builtin;
use crate::capability::{Bot, Llm, Project, Server};
use crate::plugin::PluginManifest;
use crate::registry::{BotFactory, BuildContext, LlmFactory, ProjectFactory, ServerFactory};
use quill_foundation::{Category, QuillConfig, Result, TypeRegistry};
use std::sync::Arc;
use tracing::{debug, info};

/// 컴포지션 루트
pub struct Quill {
    types: Arc<TypeRegistry>,
    llms: LlmFactory,
    bots: BotFactory,
    projects: ProjectFactory,
    servers: ServerFactory,
}

impl Quill {
    /// 빈 컴포지션 루트 (등록된 타입 없음)
    pub fn new() -> Self {
        let types = Arc::new(TypeRegistry::new());
        Self {
            llms: LlmFactory::new(Category::Llm, types.clone()),
            bots: BotFactory::new(Category::Bot, types.clone()),
            projects: ProjectFactory::new(Category::Project, types.clone()),
            servers: ServerFactory::new(Category::Server, types.clone()),
            types,
        }
    }

    /// 기본 제공 플러그인을 등록한 컴포지션 루트
    pub fn with_builtins() -> Result<Self> {
        let quill = Self::new();
        builtin::register_all(&quill)?;
        Ok(quill)
    }

    // ========================================================================
    // 접근자
    // ========================================================================

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn llms(&self) -> &LlmFactory {
        &self.llms
    }

    pub fn bots(&self) -> &BotFactory {
        &self.bots
    }

    pub fn projects(&self) -> &ProjectFactory {
        &self.projects
    }

    pub fn servers(&self) -> &ServerFactory {
        &self.servers
    }

    // ========================================================================
    // 생성
    // ========================================================================

    /// 설정으로 전체 객체 그래프 구성
    ///
    /// Project 생성자가 Bot/Server를, Bot 생성자가 LLM을 만듭니다.
    pub fn create_project(&self, config: &QuillConfig) -> Result<Box<dyn Project>> {
        let project = self.projects.create(&BuildContext::new(config, self))?;
        info!(
            project = %project.name(),
            project_type = %project.project_type(),
            bot = %project.bot().name(),
            llm = %project.bot().llm().model_name(),
            server = %project.server().name(),
            "Project wired"
        );
        Ok(project)
    }

    pub fn create_bot(&self, config: &QuillConfig) -> Result<Box<dyn Bot>> {
        self.bots.create(&BuildContext::new(config, self))
    }

    pub fn create_llm(&self, config: &QuillConfig) -> Result<Box<dyn Llm>> {
        self.llms.create(&BuildContext::new(config, self))
    }

    pub fn create_server(&self, config: &QuillConfig) -> Result<Box<dyn Server>> {
        self.servers.create(&BuildContext::new(config, self))
    }

    // ========================================================================
    // 플러그인
    // ========================================================================

    /// 매니페스트의 타입 선언을 별칭으로 등록
    ///
    /// 첫 실패에서 중단합니다. 그 전에 등록된 별칭은 유지됩니다.
    pub fn apply_manifest(&self, manifest: &PluginManifest) -> Result<()> {
        for category in Category::ALL {
            for declaration in manifest.declarations(category) {
                match category {
                    Category::Llm => self.llms.alias(&declaration.name, &declaration.kind)?,
                    Category::Bot => self.bots.alias(&declaration.name, &declaration.kind)?,
                    Category::Project => {
                        self.projects.alias(&declaration.name, &declaration.kind)?
                    }
                    Category::Server => {
                        self.servers.alias(&declaration.name, &declaration.kind)?
                    }
                }
            }
        }

        debug!(plugin = %manifest.name, "Applied {} type declaration(s)", manifest.len());
        Ok(())
    }
}

impl Default for Quill {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Quill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quill")
            .field("llms", &self.llms)
            .field("bots", &self.bots)
            .field("projects", &self.projects)
            .field("servers", &self.servers)
            .finish()
    }
}
