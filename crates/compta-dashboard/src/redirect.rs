//! 역할 기반 리다이렉트.
//!
//! 대시보드 페이지를 렌더링하기 전에 세션을 한 번 조회하고, 결과에 따라
//! 로그인 페이지나 역할별 랜딩 페이지로 이동하거나 페이지 내용을 보여줍니다.
//!
//! ```text
//! Checking ──(세션 없음/만료/권한 부족)──> Redirecting
//!    │
//!    └──(허용된 역할)──> Authorized ──(invalidate)──> Checking
//! ```
//!
//! 조회가 진행 중인 동안(`Checking`)에는 아무것도 렌더링되지 않으며,
//! 한 번의 확인은 "이동" 또는 "내용 표시" 중 하나의 전이만 만듭니다.

use std::collections::HashMap;
use std::sync::Arc;

use compta_core::{RedirectConfig, Role, Session};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::session::SessionSource;

/// 화면 이동을 수행하는 대상.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// 리다이렉트 상태.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectState {
    /// 세션 확인 중
    Checking,
    /// 다른 경로로 이동
    Redirecting { to: String },
    /// 내용 표시 허용
    Authorized(Session),
}

impl RedirectState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RedirectState::Checking)
    }
}

/// 세션과 역할로부터 이동 경로를 결정하는 정책.
#[derive(Debug, Clone)]
pub struct RedirectPolicy {
    login_path: String,
    dashboard_roles: Vec<Role>,
    landing_pages: HashMap<Role, String>,
    fallback_path: String,
}

impl RedirectPolicy {
    /// 설정으로부터 정책 생성.
    ///
    /// 설정은 [`RedirectConfig::validate`]를 통과했다고 가정합니다.
    /// 알 수 없는 역할 이름의 랜딩 페이지는 무시됩니다.
    pub fn from_config(config: &RedirectConfig) -> Self {
        let landing_pages = config
            .landing_pages
            .iter()
            .filter_map(|(name, path)| Role::parse(name).map(|role| (role, path.clone())))
            .collect();

        Self {
            login_path: config.login_path.clone(),
            dashboard_roles: config.dashboard_roles.clone(),
            landing_pages,
            fallback_path: config.fallback_path.clone(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// 역할이 대시보드에 접근할 수 있는지 확인.
    pub fn allows(&self, role: Role) -> bool {
        self.dashboard_roles.contains(&role)
    }

    /// 역할별 랜딩 페이지.
    pub fn landing_for(&self, role: Role) -> &str {
        self.landing_pages
            .get(&role)
            .map(String::as_str)
            .unwrap_or(&self.fallback_path)
    }

    /// 주어진 시각의 세션에 대한 결정.
    ///
    /// 만료된 세션은 세션 없음과 동일하게 취급합니다.
    pub fn decide(&self, session: Option<Session>, now: i64) -> RedirectState {
        match session {
            None => RedirectState::Redirecting {
                to: self.login_path.clone(),
            },
            Some(session) if session.is_expired_at(now) => RedirectState::Redirecting {
                to: self.login_path.clone(),
            },
            Some(session) if !self.allows(session.role) => RedirectState::Redirecting {
                to: self.landing_for(session.role).to_string(),
            },
            Some(session) => RedirectState::Authorized(session),
        }
    }
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        Self::from_config(&RedirectConfig::default())
    }
}

/// 대시보드 페이지를 감싸는 역할 리다이렉트.
pub struct RoleRedirect {
    source: Arc<dyn SessionSource>,
    navigator: Arc<dyn Navigator>,
    policy: RedirectPolicy,
    state: RedirectState,
}

impl RoleRedirect {
    pub fn new(
        source: Arc<dyn SessionSource>,
        navigator: Arc<dyn Navigator>,
        policy: RedirectPolicy,
    ) -> Self {
        Self {
            source,
            navigator,
            policy,
            state: RedirectState::Checking,
        }
    }

    pub fn state(&self) -> &RedirectState {
        &self.state
    }

    pub fn policy(&self) -> &RedirectPolicy {
        &self.policy
    }

    /// 세션을 조회해 상태를 전이합니다.
    ///
    /// 이미 종료 상태면 다시 조회하지 않습니다. 조회 중 `cancel`이 취소되면
    /// 결과를 버리고 `Checking` 상태를 유지하며 이동도 하지 않습니다.
    /// 세션 소스 에러는 세션 없음으로 취급합니다.
    pub async fn check(&mut self, now: i64, cancel: &CancellationToken) -> &RedirectState {
        if self.state.is_terminal() {
            return &self.state;
        }

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.source.current_session() => Some(result),
        };

        let Some(result) = fetched else {
            debug!("Session check cancelled, discarding result");
            return &self.state;
        };
        if cancel.is_cancelled() {
            debug!("Session check cancelled, discarding result");
            return &self.state;
        }

        let session = result.unwrap_or_else(|e| {
            warn!(error = %e, "Session lookup failed, treating as signed out");
            None
        });

        let next = self.policy.decide(session, now);
        if let RedirectState::Redirecting { to } = &next {
            info!(to = %to, "Redirecting away from dashboard");
            self.navigator.navigate(to);
        }
        self.state = next;
        &self.state
    }

    /// `Authorized` 상태일 때만 내용을 렌더링합니다.
    pub fn render<T>(&self, children: impl FnOnce(&Session) -> T) -> Option<T> {
        match &self.state {
            RedirectState::Authorized(session) => Some(children(session)),
            _ => None,
        }
    }

    /// 세션 무효화. 다음 [`check`](Self::check)에서 다시 조회합니다.
    pub fn invalidate(&mut self) {
        if self.state != RedirectState::Checking {
            debug!("Session invalidated, re-entering check");
        }
        self.state = RedirectState::Checking;
    }
}
