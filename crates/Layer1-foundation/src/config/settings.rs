//! Plugin Settings - 설정 테이블의 추가 키
//!
//! `[llm] api_key_env = "..."` 처럼 코어가 모르는 키는 여기에 모여
//! 해당 플러그인이 직접 읽습니다.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 플러그인 전용 설정 (키 순서 고정)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, toml::Value>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(toml::Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(toml::Value::as_bool)
    }

    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(toml::Value::as_integer)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<toml::Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// 빌더 패턴: 값 추가
    pub fn with(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let settings = Settings::new()
            .with("source_dir", "site")
            .with("minify", true)
            .with("port", 8080);

        assert_eq!(settings.get_str("source_dir"), Some("site"));
        assert_eq!(settings.get_bool("minify"), Some(true));
        assert_eq!(settings.get_integer("port"), Some(8080));
        assert_eq!(settings.get_str("port"), None);
        assert!(settings.get("missing").is_none());
    }
}
