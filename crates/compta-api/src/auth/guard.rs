//! 요청 단위 인증 가드.
//!
//! `Authorization: Bearer <token>` 헤더를 검증하여 성공 시 Claims를 요청
//! extensions에 추가하고, 실패 시 핸들러를 실행하지 않고 401을 반환합니다.
//! 거부 사유는 로그에만 남기며 응답 본문은 사유와 관계없이 동일합니다.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use compta_core::Role;
use tracing::debug;

use super::{AuthError, AuthModule, Claims};
use crate::error::{ApiError, ApiErrorResponse};

/// 가드 거부 사유 (내부 로그용).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Authorization 헤더 없음
    Missing,
    /// 헤더 또는 토큰 형식 오류
    Malformed,
    /// 만료된 토큰
    Expired,
    /// 서명 불일치
    SignatureMismatch,
}

impl DenyReason {
    pub fn code(&self) -> &'static str {
        match self {
            DenyReason::Missing => "missing",
            DenyReason::Malformed => "malformed",
            DenyReason::Expired => "expired",
            DenyReason::SignatureMismatch => "signature_mismatch",
        }
    }
}

impl From<AuthError> for DenyReason {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::ExpiredCredential => DenyReason::Expired,
            AuthError::SignatureMismatch => DenyReason::SignatureMismatch,
            AuthError::InvalidCredential | AuthError::Encoding(_) => DenyReason::Malformed,
        }
    }
}

/// 가드 판정 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow(Claims),
    Deny(DenyReason),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow(_))
    }
}

/// 헤더에서 Bearer 토큰 추출.
///
/// 헤더가 없으면 `Missing`, 형식이 틀리면 `Malformed`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, DenyReason> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(DenyReason::Missing)?
        .to_str()
        .map_err(|_| DenyReason::Malformed)?;

    let (scheme, token) = value.split_once(' ').ok_or(DenyReason::Malformed)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(DenyReason::Malformed);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(DenyReason::Malformed);
    }
    Ok(token)
}

/// 모든 가드 실패에 사용되는 401 응답.
pub fn unauthorized() -> ApiError {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiErrorResponse::simple("UNAUTHORIZED", "인증이 필요합니다")),
    )
}

/// 인증 가드 미들웨어.
///
/// [`AuthModule::protect`]를 통해 라우터에 적용됩니다.
pub async fn require_auth(
    State(auth): State<AuthModule>,
    mut request: Request,
    next: Next,
) -> Response {
    match auth.decide(request.headers(), Utc::now().timestamp()) {
        GuardDecision::Allow(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        GuardDecision::Deny(reason) => {
            debug!(
                reason = reason.code(),
                method = %request.method(),
                path = %request.uri().path(),
                "Request denied by auth guard"
            );
            let mut response = unauthorized().into_response();
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
            response
        }
    }
}

/// 인증된 사용자 추출기.
///
/// 가드가 추가한 Claims를 꺼냅니다. 가드가 적용되지 않은 라우트에서는 401.
///
/// ```rust,ignore
/// async fn protected_handler(AuthUser(claims): AuthUser) -> impl IntoResponse {
///     format!("Hello, {}!", claims.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(unauthorized)
    }
}

/// 허용 역할 목록에 포함되는지 확인.
///
/// 부족하면 403 `FORBIDDEN`.
pub fn require_role(allowed: &[Role], claims: &Claims) -> Result<(), ApiError> {
    if allowed.contains(&claims.role) {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(ApiErrorResponse::simple("FORBIDDEN", "권한이 부족합니다")),
        ))
    }
}

/// 유형 관리 권한(관리자, 회계 담당자)을 요구하는 추출기.
///
/// 본문 추출보다 먼저 실행되므로 권한이 없으면 DTO 검증 전에 거부됩니다.
#[derive(Debug, Clone)]
pub struct TypeManagerAuth(pub Claims);

impl<S> FromRequestParts<S> for TypeManagerAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        let managers: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|r| r.can_manage_types())
            .collect();
        require_role(&managers, &claims)?;
        Ok(TypeManagerAuth(claims))
    }
}
