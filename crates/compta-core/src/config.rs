//! 설정 관리.
//!
//! 기본값 → 설정 파일(선택) → `COMPTA__` 접두사 환경 변수 순으로 덮어씁니다.
//!
//! ```text
//! COMPTA__SERVER__PORT=8080
//! COMPTA__AUTH__JWT_SECRET=...
//! COMPTA__REDIRECT__DASHBOARD_ROLES=admin,accountant
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::Role;
use crate::error::{CoreError, CoreResult};

/// JWT 비밀 키 최소 길이 (바이트).
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 인증 설정
    pub auth: AuthConfig,
    /// 대시보드 리다이렉트 설정
    pub redirect: RedirectConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: 30,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 인증 설정.
///
/// 모든 라우터가 공유하는 단일 검증 정책입니다.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 서명 키 (최소 32바이트, 기본값 없음)
    pub jwt_secret: String,
    /// 만료 검사 허용 오차 (초)
    pub leeway_secs: u64,
    /// 발급 토큰 유효 시간 (분)
    pub access_token_minutes: i64,
    /// 토큰 발급자 (설정 시 `iss` 검증)
    pub issuer: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            leeway_secs: 0,
            access_token_minutes: 60,
            issuer: None,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("leeway_secs", &self.leeway_secs)
            .field("access_token_minutes", &self.access_token_minutes)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl AuthConfig {
    /// 테스트 및 로컬 개발용 설정.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(CoreError::Config(format!(
                "auth.jwt_secret는 최소 {}바이트여야 합니다",
                MIN_JWT_SECRET_LEN
            )));
        }
        if self.access_token_minutes <= 0 {
            return Err(CoreError::Config(
                "auth.access_token_minutes는 양수여야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

/// 대시보드 리다이렉트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// 세션이 없을 때 이동할 로그인 경로
    pub login_path: String,
    /// 대시보드 접근이 허용된 역할
    pub dashboard_roles: Vec<Role>,
    /// 역할별 랜딩 페이지 (키: 역할 이름)
    pub landing_pages: HashMap<String, String>,
    /// 랜딩 페이지가 설정되지 않은 역할의 이동 경로
    pub fallback_path: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            dashboard_roles: Role::ALL
                .into_iter()
                .filter(|role| role.can_view_dashboard())
                .collect(),
            landing_pages: HashMap::new(),
            fallback_path: "/".to_string(),
        }
    }
}

impl RedirectConfig {
    /// 역할에 해당하는 랜딩 페이지.
    pub fn landing_for(&self, role: Role) -> &str {
        self.landing_pages
            .get(role.as_str())
            .map(String::as_str)
            .unwrap_or(&self.fallback_path)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.dashboard_roles.is_empty() {
            return Err(CoreError::Config(
                "redirect.dashboard_roles가 비어 있습니다".to_string(),
            ));
        }
        for path in [&self.login_path, &self.fallback_path] {
            if !path.starts_with('/') {
                return Err(CoreError::Config(format!(
                    "리다이렉트 경로는 '/'로 시작해야 합니다: {}",
                    path
                )));
            }
        }
        for (role, path) in &self.landing_pages {
            if Role::parse(role).is_none() {
                return Err(CoreError::Config(format!("알 수 없는 역할: {}", role)));
            }
            if !path.starts_with('/') {
                return Err(CoreError::Config(format!(
                    "랜딩 페이지 경로는 '/'로 시작해야 합니다: {}",
                    path
                )));
            }
        }
        Ok(())
    }
}

impl AppConfig {
    /// 설정 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일은 없어도 됩니다. 로드 후 [`AppConfig::validate`]를 수행합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> CoreResult<Self> {
        let builder = config::Config::builder()
            // 파일에서 로드 (선택)
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("COMPTA")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("redirect.dashboard_roles")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> CoreResult<Self> {
        Self::load("config/default.toml")
    }

    pub fn validate(&self) -> CoreResult<()> {
        self.auth.validate()?;
        self.redirect.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    #[test]
    fn test_default_config_requires_secret() {
        let config = AppConfig::default();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let config = AppConfig {
            auth: AuthConfig::with_secret(SECRET),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_auth_config_debug_redacts_secret() {
        let debug = format!("{:?}", AuthConfig::with_secret(SECRET));
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_landing_for_falls_back() {
        let mut redirect = RedirectConfig::default();
        redirect
            .landing_pages
            .insert("user".to_string(), "/espace".to_string());

        assert_eq!(redirect.landing_for(Role::User), "/espace");
        assert_eq!(redirect.landing_for(Role::Accountant), "/");
        assert!(redirect.validate().is_ok());
    }

    #[test]
    fn test_redirect_validation_rejects_bad_entries() {
        let mut redirect = RedirectConfig::default();
        redirect
            .landing_pages
            .insert("auditor".to_string(), "/x".to_string());
        assert!(redirect.validate().is_err());

        let redirect = RedirectConfig {
            login_path: "login".to_string(),
            ..Default::default()
        };
        assert!(redirect.validate().is_err());

        let redirect = RedirectConfig {
            dashboard_roles: vec![],
            ..Default::default()
        };
        assert!(redirect.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("compta-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            format!(
                r#"
[server]
port = 8081

[auth]
jwt_secret = "{}"
leeway_secs = 5

[redirect]
dashboard_roles = ["admin"]

[redirect.landing_pages]
user = "/espace"
"#,
                SECRET
            ),
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.auth.leeway_secs, 5);
        assert_eq!(config.redirect.dashboard_roles, vec![Role::Admin]);
        assert_eq!(config.redirect.landing_for(Role::User), "/espace");

        std::fs::remove_dir_all(&dir).ok();
    }
}
