//! 장부 유형 / 신고 유형 관리 endpoint.
//!
//! 두 종류는 같은 라우터를 공유하며 `TypeKind` Extension으로 구분됩니다.
//!
//! - `GET /` - 목록
//! - `GET /{id}` - 단건 조회
//! - `PATCH /{id}` - 설명 필드 수정 (관리자, 회계 담당자)
//! - `POST /{id}/months` - 허용 월 추가 (관리자, 회계 담당자)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use compta_core::{AddMonthsDto, AdminType, TypeKind, TypeUpdateDto};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{AuthModule, TypeManagerAuth};
use crate::error::{core_error_response, ApiResult};
use crate::extract::ValidatedJson;
use crate::state::AppState;

/// 유형 목록 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct TypeListResponse {
    pub kind: TypeKind,
    pub items: Vec<AdminType>,
    pub total: usize,
}

/// 허용 월 추가 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddMonthsResponse {
    /// 갱신된 레코드
    #[serde(rename = "type")]
    pub admin_type: AdminType,
    /// 새로 추가된 월 개수 (이미 있던 월 제외)
    pub added: usize,
}

/// GET /
pub async fn list_types(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<TypeKind>,
) -> ApiResult<Json<TypeListResponse>> {
    let items = state.types.list(kind).await.map_err(core_error_response)?;
    Ok(Json(TypeListResponse {
        kind,
        total: items.len(),
        items,
    }))
}

/// GET /{id}
pub async fn get_type(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<TypeKind>,
    Path(id): Path<u64>,
) -> ApiResult<Json<AdminType>> {
    state
        .types
        .get(kind, id)
        .await
        .map(Json)
        .map_err(core_error_response)
}

/// PATCH /{id}
pub async fn update_type(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<TypeKind>,
    TypeManagerAuth(claims): TypeManagerAuth,
    Path(id): Path<u64>,
    ValidatedJson(update): ValidatedJson<TypeUpdateDto>,
) -> ApiResult<Json<AdminType>> {
    let updated = state
        .types
        .update(kind, id, &update)
        .await
        .map_err(core_error_response)?;

    info!(%kind, id, user = %claims.sub, "Type fields updated");
    Ok(Json(updated))
}

/// POST /{id}/months
pub async fn add_months(
    State(state): State<Arc<AppState>>,
    Extension(kind): Extension<TypeKind>,
    TypeManagerAuth(claims): TypeManagerAuth,
    Path(id): Path<u64>,
    ValidatedJson(dto): ValidatedJson<AddMonthsDto>,
) -> ApiResult<Json<AddMonthsResponse>> {
    let (admin_type, added) = state
        .types
        .add_months(kind, id, &dto.to_months())
        .await
        .map_err(core_error_response)?;

    info!(%kind, id, added, user = %claims.sub, "Allowed months added");
    Ok(Json(AddMonthsResponse { admin_type, added }))
}

/// 유형 관리 라우터 (인증 가드 적용).
pub fn admin_types_router(kind: TypeKind, auth: &AuthModule) -> Router<Arc<AppState>> {
    let router = Router::new()
        .route("/", get(list_types))
        .route("/{id}", get(get_type).patch(update_type))
        .route("/{id}/months", post(add_months))
        .layer(Extension(kind));
    auth.protect(router)
}
