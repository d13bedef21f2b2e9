//! Project capability - Bot/Server를 소유하고 빌드 라이프사이클을 수행

use super::bot::Bot;
use super::server::{RunOptions, Server};
use async_trait::async_trait;
use quill_foundation::Result;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// `Project::build` 결과 경로
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    /// 배포 루트 (dist)
    pub dist_root: PathBuf,

    /// 정적 자산 루트
    pub static_root: PathBuf,
}

impl BuildOutput {
    pub fn new(dist_root: impl Into<PathBuf>, static_root: impl Into<PathBuf>) -> Self {
        Self {
            dist_root: dist_root.into(),
            static_root: static_root.into(),
        }
    }
}

/// Project capability
///
/// 소유 관계: Project -> Bot -> LLM, Project -> Server.
/// `deploy`/`test`는 확장 지점이며 기본 구현은 아무것도 하지 않습니다.
#[async_trait]
pub trait Project: Send + Sync {
    /// 프로젝트 이름 (`[project] name`)
    fn name(&self) -> &str;

    /// 프로젝트 타입 (project 분류의 타입 이름)
    fn project_type(&self) -> &str;

    /// 프로젝트 루트 디렉토리
    fn root(&self) -> &Path;

    fn bot(&self) -> &dyn Bot;

    fn server(&self) -> &dyn Server;

    /// 소스를 결과물로 변환 (실패 시 `BuildError`)
    async fn build(&self) -> Result<BuildOutput>;

    async fn deploy(&self) -> Result<()> {
        info!(project = %self.name(), "No deploy step for {}", self.project_type());
        Ok(())
    }

    async fn test(&self) -> Result<()> {
        info!(project = %self.name(), "No test step for {}", self.project_type());
        Ok(())
    }

    /// `build()` 후 소유한 Server의 `run()`에 위임
    async fn serve(&self, port: Option<u16>, shutdown: CancellationToken) -> Result<()> {
        let site = self.build().await?;
        info!(
            project = %self.name(),
            server = %self.server().name(),
            "Serving {}",
            site.dist_root.display()
        );
        self.server()
            .run(RunOptions::new(site).with_port(port), shutdown)
            .await
    }
}
