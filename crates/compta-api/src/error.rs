//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::{
    http::{Method, StatusCode, Uri},
    Json,
};
use compta_core::CoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "입력 검증 실패 (2 건)",
///   "details": {"violations": [{"field": "months[0]", "code": "month_out_of_range", "message": "..."}]}
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "UNAUTHORIZED", "VALIDATION_ERROR", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// HTTP 메서드 (GET, POST 등)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// 요청 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Some(chrono::Utc::now().timestamp()),
            ..Self::simple(code, message)
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }

    /// 타임스탬프 없는 간단한 에러.
    ///
    /// 인증 실패 응답처럼 본문이 항상 같아야 하는 경우에 사용합니다.
    pub fn simple(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: None,
            method: None,
            path: None,
        }
    }

    /// 요청 정보(메서드, 경로)를 추가합니다.
    #[must_use]
    pub fn with_request_info(mut self, method: &Method, uri: &Uri) -> Self {
        self.method = Some(method.to_string());
        self.path = Some(uri.path().to_string());
        self
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// 핸들러 에러 (상태 코드 + JSON 본문).
pub type ApiError = (StatusCode, Json<ApiErrorResponse>);

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

/// 도메인 에러를 HTTP 에러로 변환합니다.
pub fn core_error_response(err: CoreError) -> ApiError {
    match err {
        CoreError::Validation(violations) => (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::with_details(
                "VALIDATION_ERROR",
                format!("입력 검증 실패 ({} 건)", violations.len()),
                serde_json::json!({ "violations": violations }),
            )),
        ),
        CoreError::NotFound(what) => (
            StatusCode::NOT_FOUND,
            Json(ApiErrorResponse::new("NOT_FOUND", format!("찾을 수 없음: {}", what))),
        ),
        other => {
            error!(error = %other, "Internal error while handling request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::new("INTERNAL_ERROR", "내부 에러가 발생했습니다")),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compta_core::FieldViolation;

    #[test]
    fn test_api_error_response_new() {
        let error = ApiErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.code, "TEST_ERROR");
        assert!(error.timestamp.is_some());
        assert!(error.details.is_none());
    }

    #[test]
    fn test_json_serialization_simple() {
        let error = ApiErrorResponse::simple("UNAUTHORIZED", "인증이 필요합니다");
        let json = serde_json::to_string(&error).unwrap();

        assert!(!json.contains("timestamp"));
        assert!(!json.contains("details"));
        assert!(json.contains(r#""code":"UNAUTHORIZED""#));
    }

    #[test]
    fn test_with_request_info() {
        let uri: Uri = "/api/v1/livre-types/1".parse().unwrap();
        let error = ApiErrorResponse::new("NOT_FOUND", "x").with_request_info(&Method::PATCH, &uri);

        assert_eq!(error.method.as_deref(), Some("PATCH"));
        assert_eq!(error.path.as_deref(), Some("/api/v1/livre-types/1"));
    }

    #[test]
    fn test_core_error_mapping() {
        let (status, Json(body)) = core_error_response(CoreError::Validation(vec![
            FieldViolation::new("months[0]", "month_out_of_range", "m"),
        ]));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "VALIDATION_ERROR");
        let details = body.details.unwrap();
        assert_eq!(details["violations"][0]["field"], "months[0]");

        let (status, _) = core_error_response(CoreError::NotFound("livre 9".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, Json(body)) = core_error_response(CoreError::Internal("secret detail".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.message.contains("secret detail"));
    }
}
