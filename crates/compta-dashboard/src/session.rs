//! 세션 소스.
//!
//! 대시보드가 현재 사용자 세션을 얻는 경로입니다. API 서버의
//! `GET /api/v1/auth/session` 엔드포인트를 호출하는 [`HttpSessionSource`]가
//! 기본 구현입니다.

use std::time::Duration;

use async_trait::async_trait;
use compta_core::Session;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::{SessionError, SessionResult};

/// 세션 엔드포인트 경로.
pub const SESSION_PATH: &str = "/api/v1/auth/session";

/// 현재 세션을 제공하는 소스.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// 현재 세션. 인증되지 않았으면 `Ok(None)`.
    async fn current_session(&self) -> SessionResult<Option<Session>>;
}

/// HTTP 세션 소스.
#[derive(Debug, Clone)]
pub struct HttpSessionSource {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSessionSource {
    /// 기본 요청 타임아웃.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// 새 세션 소스 생성.
    ///
    /// `token`이 없으면 요청 없이 세션 없음으로 처리합니다.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> SessionResult<Self> {
        Self::with_timeout(base_url, token, Self::DEFAULT_TIMEOUT)
    }

    /// 요청 타임아웃을 지정해 생성.
    pub fn with_timeout(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> SessionResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SessionError::InvalidConfig(format!(
                "base_url은 http(s) URL이어야 합니다: {}",
                base_url
            )));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn session_url(&self) -> String {
        format!("{}{}", self.base_url, SESSION_PATH)
    }
}

#[async_trait]
impl SessionSource for HttpSessionSource {
    async fn current_session(&self) -> SessionResult<Option<Session>> {
        let Some(token) = &self.token else {
            debug!("No credential, skipping session request");
            return Ok(None);
        };

        let response = self
            .client
            .get(self.session_url())
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            debug!("Session endpoint rejected credential");
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Session request failed");
            return Err(SessionError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let session: Session = serde_json::from_slice(&bytes)?;
        debug!(user_id = %session.user_id, role = %session.role, "Session loaded");
        Ok(Some(session))
    }
}
