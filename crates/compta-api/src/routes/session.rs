//! 현재 세션 조회 endpoint.
//!
//! 대시보드 클라이언트의 세션 확인에 사용됩니다.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use compta_core::Session;

use crate::auth::{AuthModule, AuthUser};
use crate::state::AppState;

/// GET /api/v1/auth/session
///
/// 검증된 토큰의 Claims를 세션 형태로 반환합니다.
pub async fn current_session(AuthUser(claims): AuthUser) -> Json<Session> {
    Json(claims.to_session())
}

/// 세션 라우터 (인증 가드 적용).
pub fn session_router(auth: &AuthModule) -> Router<Arc<AppState>> {
    auth.protect(Router::new().route("/session", get(current_session)))
}
