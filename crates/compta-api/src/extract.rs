//! 검증된 JSON 본문 추출기.
//!
//! 본문을 역직렬화한 뒤 DTO의 `Validate` 규칙을 적용합니다. 검증 실패는 핸들러
//! 실행 전에 필드 단위 위반 목록과 함께 400으로 반환됩니다.

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use compta_core::{validate_dto, CoreError};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use validator::Validate;

use crate::error::{core_error_response, ApiError, ApiErrorResponse};

/// 검증된 JSON 추출기.
///
/// ```rust,ignore
/// async fn add_months(ValidatedJson(dto): ValidatedJson<AddMonthsDto>) -> impl IntoResponse {
///     // dto.months의 모든 원소는 1-12 범위
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let method = req.method().clone();
        let uri = req.uri().clone();

        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            warn!(error = %e, path = %uri.path(), "JSON parsing failed");
            (
                StatusCode::BAD_REQUEST,
                Json(
                    ApiErrorResponse::new("INVALID_JSON", e.body_text())
                        .with_request_info(&method, &uri),
                ),
            )
        })?;

        if let Err(err) = validate_dto(&value) {
            if let CoreError::Validation(violations) = &err {
                warn!(
                    violations = violations.len(),
                    fields = ?violations.iter().map(|v| v.field.as_str()).collect::<Vec<_>>(),
                    path = %uri.path(),
                    "Validation failed"
                );
            }
            let (status, Json(body)) = core_error_response(err);
            return Err((status, Json(body.with_request_info(&method, &uri))));
        }

        debug!("JSON payload validated successfully");
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header, response::IntoResponse, routing::post, Router};
    use compta_core::AddMonthsDto;
    use tower::ServiceExt;

    async fn accept(ValidatedJson(dto): ValidatedJson<AddMonthsDto>) -> impl IntoResponse {
        dto.months.len().to_string()
    }

    fn app() -> Router {
        Router::new().route("/types/{id}/months", post(accept))
    }

    async fn send(body: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/types/1/months")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn test_valid_payload_reaches_handler() {
        let (status, body) = send(r#"{"months": [1, 2, 3]}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!(3));
    }

    #[tokio::test]
    async fn test_validation_error_carries_request_info() {
        let (status, body) = send(r#"{"months": [0, 5, 13]}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["method"], "POST");
        assert_eq!(body["path"], "/types/1/months");
    }

    #[tokio::test]
    async fn test_malformed_json_carries_request_info() {
        let (status, body) = send(r#"{"months": [1,"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_JSON");
        assert_eq!(body["method"], "POST");
        assert_eq!(body["path"], "/types/1/months");
    }
}
