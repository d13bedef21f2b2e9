//! Plugin 시스템
//!
//! 플러그인은 기존 구현을 새 타입 이름으로 노출하는 TOML 매니페스트입니다.
//! `Quill::apply_manifest`가 선언마다 `Factory::alias`를 호출합니다.

mod discovery;
mod manifest;

pub use discovery::{PluginDiscovery, PluginScope, PLUGIN_DIR};
pub use manifest::{PluginManifest, TypeDeclaration};
