//! Plugin Discovery - 플러그인 매니페스트 발견 및 로드
//!
//! 검색 위치:
//! - 프로젝트 레벨: `<project_root>/.quill/plugins/*.toml`
//! - 사용자 레벨: `~/.quill/plugins/*.toml`
//!
//! `serve <file>`처럼 경로가 직접 주어지면 `load_path`가 그 파일과
//! 같은 디렉토리의 다른 매니페스트를 함께 로드합니다.

use super::manifest::PluginManifest;
use quill_foundation::{Error, Result, QUILL_CONFIG_FILE};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// 플러그인 디렉토리 이름 (`.quill/plugins`)
pub const PLUGIN_DIR: &str = ".quill";

// ============================================================================
// PluginScope
// ============================================================================

/// 플러그인 발견 범위
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginScope {
    /// 사용자 레벨 (~/.quill/plugins)
    User,
    /// 프로젝트 레벨 (.quill/plugins)
    Project,
}

// ============================================================================
// PluginDiscovery
// ============================================================================

/// 플러그인 발견 시스템
#[derive(Debug, Clone)]
pub struct PluginDiscovery {
    /// 검색 경로들 (우선순위 순)
    search_paths: Vec<(PathBuf, PluginScope)>,
}

impl PluginDiscovery {
    /// 프로젝트 루트 기준 기본 검색 경로로 생성
    pub fn new(project_root: &Path) -> Self {
        let mut search_paths = vec![(
            project_root.join(PLUGIN_DIR).join("plugins"),
            PluginScope::Project,
        )];

        if let Some(home) = dirs::home_dir() {
            search_paths.push((home.join(PLUGIN_DIR).join("plugins"), PluginScope::User));
        }

        Self { search_paths }
    }

    /// 검색 경로 없이 생성
    pub fn empty() -> Self {
        Self {
            search_paths: Vec::new(),
        }
    }

    /// 검색 경로 추가
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>, scope: PluginScope) {
        self.search_paths.push((path.into(), scope));
    }

    // ========================================================================
    // 발견
    // ========================================================================

    /// 검색 경로의 모든 매니페스트 발견
    ///
    /// 존재하지 않는 경로는 건너뛰고, 파싱 실패는 경고 후 무시합니다.
    pub async fn discover(&self) -> Vec<PluginManifest> {
        let mut manifests = Vec::new();

        for (path, scope) in &self.search_paths {
            if !path.is_dir() {
                continue;
            }

            match scan_directory(path, None).await {
                Ok(found) => {
                    debug!("Found {} plugin(s) in {:?} ({:?})", found.len(), path, scope);
                    manifests.extend(found);
                }
                Err(e) => {
                    warn!("Failed to scan plugin directory {:?}: {}", path, e);
                }
            }
        }

        info!("Discovered {} plugins", manifests.len());
        manifests
    }

    /// 명시적으로 주어진 파일 또는 디렉토리 로드
    ///
    /// - 파일: 해당 매니페스트 + 같은 디렉토리의 다른 `*.toml` (quill.toml 제외)
    /// - 디렉토리: 안의 모든 `*.toml`
    ///
    /// 직접 지정한 파일의 파싱 실패는 에러, 함께 스캔된 파일은 경고 후 무시합니다.
    pub async fn load_path(path: &Path) -> Result<Vec<PluginManifest>> {
        if !path.exists() {
            return Err(Error::Config(format!("No {} file found.", path.display())));
        }

        if path.is_dir() {
            return scan_directory(path, None).await;
        }

        let primary = PluginManifest::load(path).await?;

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let mut manifests = vec![primary];
        manifests.extend(scan_directory(parent, Some(path)).await?);

        info!("Loaded {} plugin manifest(s) from {}", manifests.len(), path.display());
        Ok(manifests)
    }
}

/// 디렉토리의 `*.toml` 매니페스트 로드 (파일명 순)
async fn scan_directory(dir: &Path, skip: Option<&Path>) -> Result<Vec<PluginManifest>> {
    let mut paths = Vec::new();
    let mut entries = fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_manifest_candidate(&path) {
            continue;
        }
        if skip.is_some_and(|s| same_file(s, &path)) {
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    let mut manifests = Vec::new();
    for path in paths {
        match PluginManifest::load(&path).await {
            Ok(manifest) => {
                debug!("Found plugin: {} at {:?}", manifest.name, path);
                manifests.push(manifest);
            }
            Err(e) => {
                warn!("Failed to parse plugin manifest {:?}: {}", path, e);
            }
        }
    }

    Ok(manifests)
}

fn is_manifest_candidate(path: &Path) -> bool {
    path.is_file()
        && path.extension().is_some_and(|ext| ext == "toml")
        && path.file_name().is_some_and(|name| name != QUILL_CONFIG_FILE)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
