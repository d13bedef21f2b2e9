//! Type Registry - 분류별 타입 이름 집합
//!
//! 플러그인 코드가 시작 시점에 새 타입 이름을 추가할 수 있는 열린 열거형입니다.
//! 등록된 이름은 제거/변경되지 않으며, 분류 안에서 유일합니다.
//!
//! 등록 순서가 곧 기본값 순서입니다: `default_value()`는 가장 먼저
//! 등록된 이름을 반환하고, 대화형 프롬프트는 `list_values()` 순서로 선택지를 보여줍니다.

use super::Category;
use crate::{Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// 분류별 타입 이름 레지스트리
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// 분류 -> 등록 순서대로 정렬된 이름 목록
    names: RwLock<HashMap<Category, Vec<String>>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // 등록
    // ========================================================================

    /// 타입 이름 등록 (중복 시 `DuplicateType`)
    pub fn register(&self, category: Category, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::Validation(format!(
                "{} type name must not be empty",
                category
            )));
        }

        let mut names = self.names.write();
        let entry = names.entry(category).or_default();
        if entry.iter().any(|n| n == &name) {
            return Err(Error::duplicate_type(category, name));
        }

        debug!(category = %category, name = %name, "Registered type name");
        entry.push(name);
        Ok(())
    }

    // ========================================================================
    // 조회
    // ========================================================================

    /// 등록 여부 (대소문자 구분, 정확히 일치)
    pub fn is_valid(&self, category: Category, name: &str) -> bool {
        self.names
            .read()
            .get(&category)
            .map(|names| names.iter().any(|n| n == name))
            .unwrap_or(false)
    }

    /// 등록 순서대로 이름 목록
    pub fn list_values(&self, category: Category) -> Vec<String> {
        self.names
            .read()
            .get(&category)
            .cloned()
            .unwrap_or_default()
    }

    /// 가장 먼저 등록된 이름
    pub fn default_value(&self, category: Category) -> Result<String> {
        self.names
            .read()
            .get(&category)
            .and_then(|names| names.first().cloned())
            .ok_or(Error::EmptyCategory(category))
    }

    /// 분류에 등록된 이름 수
    pub fn len(&self, category: Category) -> usize {
        self.names
            .read()
            .get(&category)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn is_empty(&self, category: Category) -> bool {
        self.len(category) == 0
    }
}
