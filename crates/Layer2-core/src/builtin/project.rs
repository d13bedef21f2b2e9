//! 기본 Project: `static-website`, `noop`

use crate::capability::{Bot, BuildOutput, Project, Server};
use crate::registry::BuildContext;
use async_trait::async_trait;
use quill_foundation::{Error, Result};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info};

pub const STATIC_WEBSITE: &str = "static-website";
pub const NOOP: &str = "noop";

const DEFAULT_SOURCE_DIR: &str = "src";
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_STATIC_DIR: &str = "static";

// ============================================================================
// StaticWebsite
// ============================================================================

/// 정적 웹사이트 프로젝트
///
/// `[project]` 설정 키:
/// - `build_command`: 빌드 전에 프로젝트 루트에서 실행할 명령 (예: `"npm run minify"`)
/// - `source_dir`: 원본 디렉토리 (기본 `src`)
/// - `dist_dir`: 결과 디렉토리 (기본 `dist`)
/// - `static_dir`: 결과 안의 정적 자산 디렉토리 (기본 `static`)
pub struct StaticWebsite {
    name: String,
    project_type: String,
    root: PathBuf,
    source_dir: PathBuf,
    dist_dir: PathBuf,
    static_dir: PathBuf,
    build_command: Option<Vec<String>>,
    bot: Box<dyn Bot>,
    server: Box<dyn Server>,
}

impl StaticWebsite {
    pub fn create(ctx: &BuildContext<'_>) -> Result<Box<dyn Project>> {
        let project = &ctx.config.project;
        let dir = |key: &str, default: &str| {
            PathBuf::from(project.extra.get_str(key).unwrap_or(default))
        };

        let build_command = project
            .extra
            .get_str("build_command")
            .map(parse_command)
            .transpose()?;

        Ok(Box::new(Self {
            name: project.name.clone(),
            project_type: project.project_type.clone(),
            root: project.project_root.clone(),
            source_dir: dir("source_dir", DEFAULT_SOURCE_DIR),
            dist_dir: dir("dist_dir", DEFAULT_DIST_DIR),
            static_dir: dir("static_dir", DEFAULT_STATIC_DIR),
            build_command,
            bot: ctx.quill.create_bot(ctx.config)?,
            server: ctx.quill.create_server(ctx.config)?,
        }))
    }

    async fn run_build_command(&self, argv: &[String]) -> Result<()> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| Error::Build("build_command is empty".to_string()))?;

        info!(project = %self.name, "Running build command: {}", argv.join(" "));
        let status = Command::new(program)
            .args(args)
            .current_dir(&self.root)
            .status()
            .await
            .map_err(|e| Error::Build(format!("Failed to run `{}`: {}", program, e)))?;

        if !status.success() {
            return Err(Error::Build(format!(
                "Build command `{}` failed ({})",
                argv.join(" "),
                status
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Project for StaticWebsite {
    fn name(&self) -> &str {
        &self.name
    }

    fn project_type(&self) -> &str {
        &self.project_type
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn bot(&self) -> &dyn Bot {
        self.bot.as_ref()
    }

    fn server(&self) -> &dyn Server {
        self.server.as_ref()
    }

    async fn build(&self) -> Result<BuildOutput> {
        if let Some(argv) = &self.build_command {
            self.run_build_command(argv).await?;
        }

        let root = normalize(&self.root);
        let source = normalize(&root.join(&self.source_dir));
        let dist = normalize(&root.join(&self.dist_dir));
        if !source.is_dir() {
            return Err(Error::Build(format!(
                "Source directory {} not found",
                source.display()
            )));
        }
        if dist.starts_with(&source) {
            return Err(Error::Build(format!(
                "Output directory {} must not be inside the source directory",
                dist.display()
            )));
        }
        // dist는 통째로 지워지므로 프로젝트 루트나 원본을 품으면 안 됨
        if root.starts_with(&dist) || source.starts_with(&dist) {
            return Err(Error::Build(format!(
                "Output directory {} must not contain the project root or the source directory",
                dist.display()
            )));
        }

        if dist.exists() {
            fs::remove_dir_all(&dist).await.map_err(|e| {
                Error::Build(format!("Failed to clear {}: {}", dist.display(), e))
            })?;
        }
        let copied = copy_dir(&source, &dist).await.map_err(|e| {
            Error::Build(format!(
                "Failed to copy {} into {}: {}",
                source.display(),
                dist.display(),
                e
            ))
        })?;
        info!(project = %self.name, "Built {} file(s) into {}", copied, dist.display());

        let static_root = dist.join(&self.static_dir);
        Ok(BuildOutput::new(dist, static_root))
    }
}

fn parse_command(command: &str) -> Result<Vec<String>> {
    match shlex::split(command) {
        Some(argv) if !argv.is_empty() => Ok(argv),
        _ => Err(Error::Validation(format!(
            "Invalid project.build_command: {:?}",
            command
        ))),
    }
}

/// `.`과 `..`를 경로 문자열 수준에서 정리 (파일시스템은 보지 않음)
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// 디렉토리 트리 복사, 복사한 파일 수 반환
async fn copy_dir(from: &Path, to: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    let mut pending = vec![(from.to_path_buf(), to.to_path_buf())];

    while let Some((src, dst)) = pending.pop() {
        fs::create_dir_all(&dst).await?;
        let mut entries = fs::read_dir(&src).await?;

        while let Some(entry) = entries.next_entry().await? {
            let target = dst.join(entry.file_name());
            if entry.file_type().await?.is_dir() {
                pending.push((entry.path(), target));
            } else {
                fs::copy(entry.path(), &target).await?;
                copied += 1;
            }
        }
    }

    debug!("Copied {} file(s) from {:?} to {:?}", copied, from, to);
    Ok(copied)
}

// ============================================================================
// NoopProject
// ============================================================================

/// 빌드 결과가 없는 프로젝트: `build()`는 `("", "")`
pub struct NoopProject {
    name: String,
    project_type: String,
    root: PathBuf,
    bot: Box<dyn Bot>,
    server: Box<dyn Server>,
}

impl NoopProject {
    pub fn create(ctx: &BuildContext<'_>) -> Result<Box<dyn Project>> {
        let project = &ctx.config.project;
        Ok(Box::new(Self {
            name: project.name.clone(),
            project_type: project.project_type.clone(),
            root: project.project_root.clone(),
            bot: ctx.quill.create_bot(ctx.config)?,
            server: ctx.quill.create_server(ctx.config)?,
        }))
    }
}

#[async_trait]
impl Project for NoopProject {
    fn name(&self) -> &str {
        &self.name
    }

    fn project_type(&self) -> &str {
        &self.project_type
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn bot(&self) -> &dyn Bot {
        self.bot.as_ref()
    }

    fn server(&self) -> &dyn Server {
        self.server.as_ref()
    }

    async fn build(&self) -> Result<BuildOutput> {
        Ok(BuildOutput::default())
    }
}
