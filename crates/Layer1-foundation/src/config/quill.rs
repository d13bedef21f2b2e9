//! Quill Config - quill.toml
//!
//! 네 개의 최상위 테이블로 구성됩니다:
//!
//! ```toml
//! [project]
//! name = "my-site"
//! project_type = "static-website"
//! project_root = "."
//!
//! [bot]
//! name = "baby-quill"
//!
//! [llm]
//! model_name = "gpt-3.5-turbo"
//!
//! [server]
//! name = "static-website-server"
//! ```
//!
//! 각 테이블의 나머지 키는 [`Settings`]로 모여 플러그인이 읽습니다.
//! 한 번 로드된 설정은 프로세스 동안 변경하지 않습니다.

use super::Settings;
use crate::registry::Category;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 설정 파일명
pub const QUILL_CONFIG_FILE: &str = "quill.toml";

// ============================================================================
// QuillConfig
// ============================================================================

/// Quill 프로젝트 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuillConfig {
    pub project: ProjectConfig,
    pub bot: BotConfig,
    pub llm: LlmConfig,
    pub server: ServerConfig,
}

/// `[project]` 테이블
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// 프로젝트 이름
    pub name: String,

    /// 프로젝트 타입 (project 분류의 타입 이름)
    pub project_type: String,

    /// 프로젝트 루트 (상대 경로는 quill.toml 위치 기준)
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    #[serde(flatten, default)]
    pub extra: Settings,
}

/// `[bot]` 테이블
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot 타입 이름
    pub name: String,

    #[serde(flatten, default)]
    pub extra: Settings,
}

/// `[llm]` 테이블
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// LLM 타입 이름
    pub model_name: String,

    #[serde(flatten, default)]
    pub extra: Settings,
}

/// `[server]` 테이블
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server 타입 이름
    pub name: String,

    /// 기본 포트 오버라이드
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(flatten, default)]
    pub extra: Settings,
}

impl QuillConfig {
    /// 타입 이름만으로 설정 생성 (나머지는 기본값)
    pub fn new(
        name: impl Into<String>,
        project_type: impl Into<String>,
        bot: impl Into<String>,
        llm: impl Into<String>,
        server: impl Into<String>,
    ) -> Self {
        Self {
            project: ProjectConfig {
                name: name.into(),
                project_type: project_type.into(),
                project_root: default_project_root(),
                extra: Settings::default(),
            },
            bot: BotConfig {
                name: bot.into(),
                extra: Settings::default(),
            },
            llm: LlmConfig {
                model_name: llm.into(),
                extra: Settings::default(),
            },
            server: ServerConfig {
                name: server.into(),
                port: None,
                extra: Settings::default(),
            },
        }
    }

    /// 분류에 해당하는 타입 이름
    pub fn type_name(&self, category: Category) -> &str {
        match category {
            Category::Project => &self.project.project_type,
            Category::Bot => &self.bot.name,
            Category::Llm => &self.llm.model_name,
            Category::Server => &self.server.name,
        }
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 디렉토리의 quill.toml 로드
    ///
    /// 상대 `project_root`는 디렉토리 기준 절대 경로로 바뀝니다.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(QUILL_CONFIG_FILE);
        if !path.is_file() {
            return Err(Error::Config(format!("No {} file found.", QUILL_CONFIG_FILE)));
        }

        let content = std::fs::read_to_string(&path)?;
        let mut config = Self::from_toml_str(&content)?;
        if config.project.project_root.is_relative() {
            config.project.project_root = dir.join(&config.project.project_root);
        }

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// TOML 문자열 파싱 + 검증
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: QuillConfig = toml::from_str(content).map_err(|e| {
            Error::Validation(format!("Invalid {}: {}", QUILL_CONFIG_FILE, e.message()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열로 직렬화
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 디렉토리에 quill.toml 저장 (기존 파일은 덮어쓰지 않음)
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(QUILL_CONFIG_FILE);
        if path.exists() {
            return Err(Error::Config(format!(
                "A {} file already exists in {}.",
                QUILL_CONFIG_FILE,
                dir.display()
            )));
        }

        self.validate()?;
        std::fs::write(&path, self.to_toml_string()?)?;
        debug!("Wrote {}", path.display());
        Ok(path)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// 스키마 검증 (타입 이름이 실제로 등록되었는지는 팩토리가 확인)
    pub fn validate(&self) -> Result<()> {
        if self.project.name.trim().is_empty() {
            return Err(Error::Validation("project.name must not be empty".into()));
        }
        if self.project.project_root.as_os_str().is_empty() {
            return Err(Error::Validation(
                "project.project_root must not be empty".into(),
            ));
        }

        for category in Category::ALL {
            if self.type_name(category).trim().is_empty() {
                return Err(Error::Validation(format!(
                    "{} must not be empty",
                    category.config_field()
                )));
            }
        }

        if self.server.port == Some(0) {
            return Err(Error::Validation("server.port must be between 1 and 65535".into()));
        }

        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"
[project]
name = "site"
project_type = "static-website"
project_root = "."
source_dir = "pages"

[bot]
name = "baby-quill"

[llm]
model_name = "gpt-3.5-turbo"
api_key_env = "MY_KEY"

[server]
name = "static-website-server"
port = 8080
"#;

    #[test]
    fn test_parse_sample() {
        let config = QuillConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.project.name, "site");
        assert_eq!(config.type_name(Category::Project), "static-website");
        assert_eq!(config.type_name(Category::Bot), "baby-quill");
        assert_eq!(config.type_name(Category::Llm), "gpt-3.5-turbo");
        assert_eq!(config.type_name(Category::Server), "static-website-server");
        assert_eq!(config.server.port, Some(8080));
        assert_eq!(config.project.extra.get_str("source_dir"), Some("pages"));
        assert_eq!(config.llm.extra.get_str("api_key_env"), Some("MY_KEY"));
    }

    #[test]
    fn test_missing_table_is_validation_error() {
        let content = r#"
[project]
name = "site"
project_type = "noop"

[bot]
name = "simple"
"#;
        let err = QuillConfig::from_toml_str(content).unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn test_empty_type_name_rejected() {
        let mut config = QuillConfig::new("site", "noop", "simple", "echo", "null");
        config.llm.model_name = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("llm.model_name"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = QuillConfig::load(dir.path()).unwrap_err();
        assert_eq!(err.kind(), "ConfigError");
        assert!(err.to_string().contains("quill.toml"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let mut config = QuillConfig::new("site", "noop", "simple", "echo", "null");
        config.project.extra.insert("source_dir", "pages");
        config.save_to(dir.path()).unwrap();

        let loaded = QuillConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.project.name, "site");
        assert_eq!(loaded.project.project_root, dir.path().join("."));
        assert_eq!(loaded.project.extra.get_str("source_dir"), Some("pages"));
        assert_eq!(loaded.server.port, None);
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(QUILL_CONFIG_FILE), "").unwrap();

        let config = QuillConfig::new("site", "noop", "simple", "echo", "null");
        let err = config.save_to(dir.path()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_absolute_root_kept() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("elsewhere");
        let mut config = QuillConfig::new("site", "noop", "simple", "echo", "null");
        config.project.project_root = root.clone();
        config.save_to(dir.path()).unwrap();

        let loaded = QuillConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.project.project_root, root);
    }
}
