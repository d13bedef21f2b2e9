//! 제공자 에러
//!
//! HTTP 호출 단계의 세부 원인을 구분해 두고, 호출자에게는
//! `quill_foundation::Error::Generation` 하나로 넘깁니다.

use quill_foundation::Error as FoundationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// API 키 없음 (요청 전에 판정)
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// 401 / 403
    #[error("authentication rejected: {0}")]
    Authentication(String),

    /// 429
    #[error("rate limited{}", .retry_after_ms.map(|ms| format!(" (retry in {}ms)", ms)).unwrap_or_default())]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("prompt exceeds the model context: {0}")]
    ContextLengthExceeded(String),

    #[error("quota exhausted: {0}")]
    QuotaExceeded(String),

    #[error("unknown model: {0}")]
    ModelNotFound(String),

    /// 그 밖의 400
    #[error("request rejected: {0}")]
    InvalidRequest(String),

    /// 5xx
    #[error("upstream failure: {0}")]
    ServerError(String),

    /// 연결, DNS, 타임아웃
    #[error("transport failure: {0}")]
    Network(String),

    /// 응답 본문을 해석할 수 없음
    #[error("malformed response: {0}")]
    InvalidResponse(String),

    #[error("HTTP {status}: {body}")]
    Unknown { status: u16, body: String },
}

impl ProviderError {
    /// 상태 코드만으로 분류 (에러 코드가 없는 응답용)
    pub fn from_http_status(status: u16, body: &str) -> Self {
        let body_owned = || body.to_string();
        match status {
            401 | 403 => Self::Authentication(body_owned()),
            404 => Self::ModelNotFound(body_owned()),
            429 => Self::RateLimited {
                retry_after_ms: retry_after_ms(body),
            },
            400 if mentions_context(body) => Self::ContextLengthExceeded(body_owned()),
            400 => Self::InvalidRequest(body_owned()),
            s if (500..600).contains(&s) => Self::ServerError(body_owned()),
            _ => Self::Unknown {
                status,
                body: body_owned(),
            },
        }
    }
}

fn mentions_context(body: &str) -> bool {
    body.contains("context") || body.contains("too long")
}

/// `{"error": {"retry_after": <초>}}` 형태에서 밀리초 추출
fn retry_after_ms(body: &str) -> Option<u64> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let secs = value.pointer("/error/retry_after")?.as_f64()?;
    Some((secs * 1000.0) as u64)
}

impl From<ProviderError> for FoundationError {
    fn from(err: ProviderError) -> Self {
        FoundationError::Generation(err.to_string())
    }
}
