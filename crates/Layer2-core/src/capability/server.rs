//! Server capability - 빌드 결과물을 서비스

use super::project::BuildOutput;
use async_trait::async_trait;
use quill_foundation::Result;
use tokio_util::sync::CancellationToken;

/// 포트가 지정되지 않았을 때 사용하는 기본 포트
pub const DEFAULT_PORT: u16 = 4455;

/// `Server::run` 옵션
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// 명시적 포트 (없으면 서버 설정 또는 `DEFAULT_PORT`)
    pub port: Option<u16>,

    /// 서비스할 빌드 결과
    pub site: BuildOutput,
}

impl RunOptions {
    pub fn new(site: BuildOutput) -> Self {
        Self { port: None, site }
    }

    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }
}

/// Server capability
///
/// `run`은 `shutdown` 토큰이 취소될 때까지 요청을 처리합니다.
/// 취소되면 진행 중인 연결을 정리하고 `Ok(())`를 반환합니다.
#[async_trait]
pub trait Server: Send + Sync {
    /// Server 이름 (server 분류의 타입 이름)
    fn name(&self) -> &str;

    async fn run(&self, options: RunOptions, shutdown: CancellationToken) -> Result<()>;
}
