//! Error types for Quill
//!
//! 모든 에러를 중앙에서 관리

use crate::registry::Category;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Quill 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("Project {} already exists.", .0.display())]
    ProjectExists(PathBuf),

    // ========================================================================
    // 레지스트리 / 팩토리 관련
    // ========================================================================
    #[error("unknown {category} type '{name}' (registered: {})", format_names(.registered))]
    UnknownType {
        category: Category,
        name: String,
        registered: Vec<String>,
    },

    #[error("{category} type '{name}' is already registered")]
    DuplicateType { category: Category, name: String },

    #[error("no {0} types are registered")]
    EmptyCategory(Category),

    // ========================================================================
    // Capability 실행 관련
    // ========================================================================
    #[error("{0}")]
    Build(String),

    #[error("{0}")]
    Generation(String),

    #[error("{0}")]
    Server(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization failed: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// 사용자에게 보여줄 에러 분류 이름
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "ConfigError",
            Error::Validation(_) => "ValidationError",
            Error::ProjectExists(_) => "ProjectAlreadyExists",
            Error::UnknownType { .. } => "UnknownTypeError",
            Error::DuplicateType { .. } => "DuplicateTypeError",
            Error::EmptyCategory(_) => "EmptyCategoryError",
            Error::Build(_) => "BuildError",
            Error::Generation(_) => "GenerationError",
            Error::Server(_) => "ServerError",
            Error::Io(_) => "IOError",
            Error::TomlSer(_) => "ConfigError",
        }
    }

    /// Unknown type 에러 생성 헬퍼
    pub fn unknown_type(
        category: Category,
        name: impl Into<String>,
        registered: Vec<String>,
    ) -> Self {
        Error::UnknownType {
            category,
            name: name.into(),
            registered,
        }
    }

    /// Duplicate type 에러 생성 헬퍼
    pub fn duplicate_type(category: Category, name: impl Into<String>) -> Self {
        Error::DuplicateType {
            category,
            name: name.into(),
        }
    }
}

fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}
