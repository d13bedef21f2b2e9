//! 서브커맨드 구현

use crate::collect::{collect_config, Prompter};
use crate::pretty::Pretty;
use quill_core::builtin::project::STATIC_WEBSITE;
use quill_core::{CancellationToken, PluginDiscovery, PluginManifest, Project, Quill};
use quill_foundation::{Category, Error, QuillConfig, Result, QUILL_CONFIG_FILE};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const STARTER_INDEX: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>{name}</title>
  </head>
  <body>
    <h1>{name}</h1>
    <p>Built with quill.</p>
  </body>
</html>
"#;

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "quill-project".to_string())
}

// ============================================================================
// init / new
// ============================================================================

/// 현재 디렉토리에 quill.toml 생성 후 한 번 구성해 검증
///
/// 발견된 플러그인 이름도 선택지에 포함됩니다.
pub async fn init(
    cwd: &Path,
    quill: &Quill,
    prompter: &mut dyn Prompter,
    pretty: &Pretty,
) -> Result<()> {
    if cwd.join(QUILL_CONFIG_FILE).exists() {
        return Err(Error::Config(format!(
            "A {} file already exists in {}.",
            QUILL_CONFIG_FILE,
            cwd.display()
        )));
    }

    load_plugins(quill, cwd, None).await?;
    let config = collect_config(quill, prompter, &dir_name(cwd))?;
    let path = config.save_to(cwd)?;

    let project = quill.create_project(&QuillConfig::load(cwd)?)?;
    pretty.success(&format!("Created {}", path.display()));
    pretty.info(&format!(
        "Project {} ({}) is ready. Run `quill serve` to start it.",
        project.name(),
        project.project_type()
    ));
    Ok(())
}

/// 새 프로젝트 디렉토리 생성 (플러그인은 현재 디렉토리 기준으로 발견)
pub async fn new(
    cwd: &Path,
    name: &Path,
    quill: &Quill,
    prompter: &mut dyn Prompter,
    pretty: &Pretty,
) -> Result<()> {
    let target = cwd.join(name);
    if target.exists() {
        return Err(Error::ProjectExists(name.to_path_buf()));
    }

    load_plugins(quill, cwd, None).await?;
    let config = collect_config(quill, prompter, &dir_name(name))?;
    fs::create_dir_all(&target)?;
    let path = config.save_to(&target)?;

    if config.project.project_type == STATIC_WEBSITE {
        scaffold_static_site(&target, &config.project.name)?;
    }

    pretty.success(&format!("Created {}", path.display()));
    pretty.info(&format!("cd {} && quill serve", name.display()));
    Ok(())
}

fn scaffold_static_site(root: &Path, name: &str) -> Result<()> {
    let src = root.join("src");
    fs::create_dir_all(src.join("static"))?;
    fs::write(src.join("index.html"), STARTER_INDEX.replace("{name}", name))?;
    debug!("Scaffolded {}", src.display());
    Ok(())
}

// ============================================================================
// 플러그인 로드
// ============================================================================

/// 명시한 플러그인 경로와 검색 경로의 매니페스트를 적용
///
/// 같은 파일이 양쪽에서 발견되면 한 번만 적용합니다.
pub async fn load_plugins(
    quill: &Quill,
    project_root: &Path,
    explicit: Option<&Path>,
) -> Result<usize> {
    let mut manifests: Vec<PluginManifest> = Vec::new();
    if let Some(path) = explicit {
        manifests.extend(PluginDiscovery::load_path(path).await?);
    }
    manifests.extend(PluginDiscovery::new(project_root).discover().await);

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut applied = 0;
    for manifest in &manifests {
        if let Some(source) = &manifest.source {
            let key = source.canonicalize().unwrap_or_else(|_| source.clone());
            if !seen.insert(key) {
                continue;
            }
        }
        quill.apply_manifest(manifest)?;
        applied += 1;
    }

    debug!("Applied {} plugin manifest(s)", applied);
    Ok(applied)
}

/// 설정 로드 + 플러그인 적용 + 프로젝트 구성
async fn wire_project(
    cwd: &Path,
    quill: &Quill,
    plugin: Option<&Path>,
) -> Result<Box<dyn Project>> {
    let config = QuillConfig::load(cwd)?;
    load_plugins(quill, &config.project.project_root, plugin).await?;
    quill.create_project(&config)
}

// ============================================================================
// serve / build / deploy / test
// ============================================================================

pub async fn serve(
    cwd: &Path,
    file: Option<&Path>,
    port: Option<u16>,
    quill: &Quill,
    pretty: &Pretty,
    shutdown: CancellationToken,
) -> Result<()> {
    let plugin = file.map(|f| cwd.join(f));
    let project = wire_project(cwd, quill, plugin.as_deref()).await?;

    pretty.message(&format!("Running {}...", project.name()));
    project.serve(port, shutdown).await
}

pub async fn build(cwd: &Path, quill: &Quill, pretty: &Pretty) -> Result<()> {
    let project = wire_project(cwd, quill, None).await?;
    let output = project.build().await?;
    pretty.success(&format!(
        "Built {} into {}",
        project.name(),
        output.dist_root.display()
    ));
    Ok(())
}

pub async fn deploy(cwd: &Path, quill: &Quill, pretty: &Pretty) -> Result<()> {
    let project = wire_project(cwd, quill, None).await?;
    project.deploy().await?;
    pretty.success(&format!("Deployed {}", project.name()));
    Ok(())
}

pub async fn test(cwd: &Path, quill: &Quill, pretty: &Pretty) -> Result<()> {
    let project = wire_project(cwd, quill, None).await?;
    project.test().await?;
    pretty.success(&format!("Tested {}", project.name()));
    Ok(())
}

// ============================================================================
// types
// ============================================================================

/// 분류별 등록된 타입 이름 (기본값 표시)
pub async fn types(cwd: &Path, quill: &Quill, pretty: &Pretty) -> Result<()> {
    load_plugins(quill, cwd, None).await?;
    pretty.message(&format_types(quill));
    Ok(())
}

fn format_types(quill: &Quill) -> String {
    let mut lines = Vec::new();
    for category in Category::ALL {
        lines.push(format!("{}:", category));
        for (i, name) in quill.types().list_values(category).iter().enumerate() {
            let marker = if i == 0 { " (default)" } else { "" };
            lines.push(format!("  {}{}", name, marker));
        }
    }
    lines.join("\n")
}
