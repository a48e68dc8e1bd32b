//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (인증 없음)
//! - `/api/v1/auth/session` - 현재 세션
//! - `/api/v1/livre-types` - 장부 유형 관리
//! - `/api/v1/declaration-types` - 신고 유형 관리
//!
//! `/health`를 제외한 모든 기능 라우터는 같은 [`AuthModule`] 인스턴스로 보호됩니다.

pub mod admin_types;
pub mod health;
pub mod session;

pub use admin_types::{admin_types_router, AddMonthsResponse, TypeListResponse};
pub use health::{health_router, HealthResponse};
pub use session::session_router;

use std::sync::Arc;

use axum::Router;
use compta_core::TypeKind;

use crate::auth::AuthModule;
use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 각 기능 라우터는 전달받은 인증 모듈을 스스로 적용합니다.
pub fn create_api_router(auth: &AuthModule) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/api/v1/auth", session_router(auth))
        .nest(
            "/api/v1/livre-types",
            admin_types_router(TypeKind::Livre, auth),
        )
        .nest(
            "/api/v1/declaration-types",
            admin_types_router(TypeKind::Declaration, auth),
        )
}
