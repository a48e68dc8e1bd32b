//! 인증 및 권한 부여.
//!
//! JWT 기반 인증 및 역할 기반 접근 제어를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`TokenVerifier`]: 토큰 서명/만료 검증 및 Claims 추출
//! - [`require_auth`]: 요청 단위 인증 가드 미들웨어
//! - [`AuthModule`]: 모든 기능 라우터가 공유하는 가드 인스턴스
//! - [`AuthUser`], [`TypeManagerAuth`]: 핸들러용 추출기
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! let auth = AuthModule::from_config(&config.auth)?;
//! let router = auth.protect(Router::new().route("/", get(handler)));
//! ```

mod guard;
mod module;
mod verifier;

pub use guard::{
    bearer_token, require_auth, require_role, unauthorized, AuthUser, DenyReason, GuardDecision,
    TypeManagerAuth,
};
pub use module::AuthModule;
pub use verifier::{AuthError, Claims, TokenVerifier};
