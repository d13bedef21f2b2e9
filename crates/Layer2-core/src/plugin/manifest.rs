//! Plugin Manifest - 새 타입 이름을 기존 구현에 연결하는 TOML 선언
//!
//! ```toml
//! name = "docs"
//! description = "Docs site plugin"
//!
//! [[llm]]
//! name = "house-model"
//! kind = "echo"
//!
//! [[server]]
//! name = "docs-server"
//! kind = "static-website-server"
//! ```

use quill_foundation::{Category, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 타입 선언 하나: `name`을 `kind` 구현으로 등록
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// 새 타입 이름
    pub name: String,

    /// 이미 등록된 타입 이름
    pub kind: String,
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// 플러그인 매니페스트
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// 플러그인 이름
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub llm: Vec<TypeDeclaration>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bot: Vec<TypeDeclaration>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub project: Vec<TypeDeclaration>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub server: Vec<TypeDeclaration>,

    /// 로드한 파일 경로
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl PluginManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 타입 선언 추가
    pub fn with_type(
        mut self,
        category: Category,
        name: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        let declaration = TypeDeclaration::new(name, kind);
        match category {
            Category::Llm => self.llm.push(declaration),
            Category::Bot => self.bot.push(declaration),
            Category::Project => self.project.push(declaration),
            Category::Server => self.server.push(declaration),
        }
        self
    }

    /// 분류별 선언 목록
    pub fn declarations(&self, category: Category) -> &[TypeDeclaration] {
        match category {
            Category::Llm => &self.llm,
            Category::Bot => &self.bot,
            Category::Project => &self.project,
            Category::Server => &self.server,
        }
    }

    /// 전체 선언 수
    pub fn len(&self) -> usize {
        Category::ALL
            .iter()
            .map(|c| self.declarations(*c).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ========================================================================
    // 파싱
    // ========================================================================

    /// TOML 문자열 파싱
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let manifest: PluginManifest = toml::from_str(content)
            .map_err(|e| Error::Validation(format!("Invalid plugin manifest: {}", e.message())))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// 파일에서 로드 (파싱 에러 메시지에 경로를 붙이고 `source` 기록)
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let mut manifest = Self::from_toml_str(&content).map_err(|e| match e {
            Error::Validation(msg) => Error::Validation(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        manifest.source = Some(path.to_path_buf());
        Ok(manifest)
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(
                "Plugin manifest 'name' must not be empty".to_string(),
            ));
        }

        for category in Category::ALL {
            for declaration in self.declarations(category) {
                if declaration.name.trim().is_empty() || declaration.kind.trim().is_empty() {
                    return Err(Error::Validation(format!(
                        "Plugin '{}' has a {} entry with an empty name or kind",
                        self.name, category
                    )));
                }
            }
        }
        Ok(())
    }
}
