//! 기본 Server: `static-website-server`, `null`

use crate::capability::{RunOptions, Server, DEFAULT_PORT};
use crate::registry::BuildContext;
use async_trait::async_trait;
use axum::Router;
use quill_foundation::{Error, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;
use tracing::info;

pub const STATIC_WEBSITE_SERVER: &str = "static-website-server";
pub const NULL: &str = "null";

// ============================================================================
// StaticWebsiteServer
// ============================================================================

/// 빌드 결과(dist)를 HTTP로 서비스
///
/// `/static`은 static root에, 나머지 경로는 dist root에 매핑됩니다.
/// 포트 우선순위: `RunOptions.port` > `[server] port` > `DEFAULT_PORT`.
/// `[server] host`로 바인드 주소를 바꿀 수 있습니다 (기본 127.0.0.1).
pub struct StaticWebsiteServer {
    name: String,
    host: IpAddr,
    port: Option<u16>,
}

impl StaticWebsiteServer {
    pub fn create(ctx: &BuildContext<'_>) -> Result<Box<dyn Server>> {
        let server = &ctx.config.server;
        let host = match server.extra.get_str("host") {
            Some(host) => host
                .parse()
                .map_err(|_| Error::Validation(format!("Invalid server.host: {}", host)))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        Ok(Box::new(Self {
            name: server.name.clone(),
            host,
            port: server.port,
        }))
    }

    fn router(options: &RunOptions) -> Router {
        let site = &options.site;
        let mut router = Router::new();
        if site.static_root.is_dir() {
            router = router.nest_service("/static", ServeDir::new(&site.static_root));
        }
        router.fallback_service(
            ServeDir::new(&site.dist_root).append_index_html_on_directories(true),
        )
    }
}

#[async_trait]
impl Server for StaticWebsiteServer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, options: RunOptions, shutdown: CancellationToken) -> Result<()> {
        if !options.site.dist_root.is_dir() {
            return Err(Error::Server(format!(
                "Nothing to serve: {} is not a directory",
                options.site.dist_root.display()
            )));
        }

        let port = options.port.or(self.port).unwrap_or(DEFAULT_PORT);
        let addr = SocketAddr::new(self.host, port);
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Server(format!("Failed to bind {}: {}", addr, e)))?;

        info!("Running {} at http://{}", self.name, addr);
        axum::serve(listener, Self::router(&options))
            .with_graceful_shutdown(shutdown.cancelled_owned())
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        info!("{} stopped", self.name);
        Ok(())
    }
}

// ============================================================================
// NullServer
// ============================================================================

/// 아무것도 서비스하지 않는 서버
pub struct NullServer {
    name: String,
}

impl NullServer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn create(ctx: &BuildContext<'_>) -> Result<Box<dyn Server>> {
        Ok(Box::new(Self::new(ctx.config.server.name.clone())))
    }
}

#[async_trait]
impl Server for NullServer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, options: RunOptions, _shutdown: CancellationToken) -> Result<()> {
        info!(
            "{} has nothing to serve (port {})",
            self.name,
            options.port.unwrap_or(DEFAULT_PORT)
        );
        Ok(())
    }
}
