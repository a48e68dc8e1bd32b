//! 공유 인증 모듈.
//!
//! 프로세스 시작 시 한 번 생성되어 모든 기능 라우터에 복제(Arc 공유)됩니다.
//! 모든 라우터가 같은 키와 만료 정책을 사용합니다.

use std::sync::Arc;

use axum::{http::HeaderMap, middleware, Router};
use compta_core::{AuthConfig, CoreResult, Role};

use super::guard::{bearer_token, require_auth, GuardDecision};
use super::{AuthError, TokenVerifier};

/// 공유 인증 모듈.
#[derive(Debug, Clone)]
pub struct AuthModule {
    verifier: Arc<TokenVerifier>,
}

impl AuthModule {
    /// 설정에서 모듈 생성.
    pub fn from_config(config: &AuthConfig) -> CoreResult<Self> {
        Ok(Self::new(TokenVerifier::from_config(config)?))
    }

    pub fn new(verifier: TokenVerifier) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// 두 모듈이 같은 검증기 인스턴스를 공유하는지 확인.
    pub fn shares_verifier_with(&self, other: &AuthModule) -> bool {
        Arc::ptr_eq(&self.verifier, &other.verifier)
    }

    /// 요청 헤더에 대한 가드 판정.
    pub fn decide(&self, headers: &HeaderMap, now: i64) -> GuardDecision {
        let token = match bearer_token(headers) {
            Ok(token) => token,
            Err(reason) => return GuardDecision::Deny(reason),
        };

        match self.verifier.verify(token, now) {
            Ok(claims) => GuardDecision::Allow(claims),
            Err(err) => GuardDecision::Deny(err.into()),
        }
    }

    /// 라우터의 모든 라우트에 인증 가드를 적용합니다.
    ///
    /// `route_layer`로 적용되므로 가드는 핸들러의 본문 추출과 DTO 검증보다
    /// 먼저 실행됩니다.
    pub fn protect<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.route_layer(middleware::from_fn_with_state(self.clone(), require_auth))
    }

    /// 공유 검증기로 토큰을 발급합니다.
    pub fn issue_token(
        &self,
        user_id: &str,
        username: &str,
        role: Role,
        now: i64,
    ) -> Result<String, AuthError> {
        self.verifier.issue(user_id, username, role, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::DenyReason;
    use axum::http::{header, HeaderValue};

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";
    const NOW: i64 = 1_700_000_000;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_clones_share_verifier() {
        let module = AuthModule::from_config(&AuthConfig::with_secret(TEST_SECRET)).unwrap();
        let other = AuthModule::from_config(&AuthConfig::with_secret(TEST_SECRET)).unwrap();

        assert!(module.shares_verifier_with(&module.clone()));
        assert!(!module.shares_verifier_with(&other));
    }

    #[test]
    fn test_decide() {
        let module = AuthModule::from_config(&AuthConfig::with_secret(TEST_SECRET)).unwrap();
        let token = module.issue_token("u1", "alice", Role::Admin, NOW).unwrap();

        match module.decide(&bearer(&token), NOW) {
            GuardDecision::Allow(claims) => assert_eq!(claims.sub, "u1"),
            other => panic!("unexpected decision: {:?}", other),
        }
        assert_eq!(
            module.decide(&HeaderMap::new(), NOW),
            GuardDecision::Deny(DenyReason::Missing)
        );
        assert_eq!(
            module.decide(&bearer(&token), NOW + 2 * 3600),
            GuardDecision::Deny(DenyReason::Expired)
        );
        assert_eq!(
            module.decide(&bearer("garbage"), NOW),
            GuardDecision::Deny(DenyReason::Malformed)
        );
    }

    #[test]
    fn test_decide_is_deterministic_for_fixed_time() {
        let module = AuthModule::from_config(&AuthConfig::with_secret(TEST_SECRET)).unwrap();
        let token = module.issue_token("u1", "alice", Role::User, NOW).unwrap();
        let headers = bearer(&token);

        let first = module.decide(&headers, NOW + 5);
        for _ in 0..10 {
            assert_eq!(module.decide(&headers, NOW + 5), first);
        }
    }
}
