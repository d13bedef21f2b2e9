//! Capability Category - 타입 이름 네임스페이스

use serde::{Deserialize, Serialize};

/// 플러그인 가능한 Capability 분류
///
/// 분류마다 별도의 네임스페이스를 가지므로 같은 이름이
/// 서로 다른 분류에 동시에 존재할 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bot,
    Llm,
    Project,
    Server,
}

impl Category {
    /// 모든 분류 (설정 파일 테이블 순서)
    pub const ALL: [Category; 4] = [
        Category::Project,
        Category::Bot,
        Category::Llm,
        Category::Server,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bot => "bot",
            Self::Llm => "llm",
            Self::Project => "project",
            Self::Server => "server",
        }
    }

    /// quill.toml 에서 타입 이름을 담고 있는 필드
    pub fn config_field(&self) -> &'static str {
        match self {
            Self::Bot => "bot.name",
            Self::Llm => "llm.model_name",
            Self::Project => "project.project_type",
            Self::Server => "server.name",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bot" => Ok(Self::Bot),
            "llm" => Ok(Self::Llm),
            "project" => Ok(Self::Project),
            "server" => Ok(Self::Server),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}
