//! 회계 관리 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - JWT 인증 가드 및 공유 인증 모듈
//! - 검증된 DTO 추출기
//! - 장부/신고 유형 관리 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`auth`]: 토큰 검증, 인증 가드, 공유 인증 모듈
//! - [`routes`]: REST API 엔드포인트
//! - [`repository`]: 유형 저장소
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`extract`]: 검증된 JSON 추출기
//! - [`error`]: 통합 에러 응답

pub mod auth;
pub mod error;
pub mod extract;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{AuthError, AuthModule, AuthUser, Claims, GuardDecision, TokenVerifier};
pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use extract::ValidatedJson;
pub use repository::{InMemoryTypeRepository, TypeRepository};
pub use routes::create_api_router;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
