//! 회계 관리 시스템의 에러 타입.
//!
//! 도메인, 설정, 입력 검증 전반에서 사용되는 에러 타입을 정의합니다.
//! 인증 에러는 API 크레이트의 토큰 검증기에서 별도로 정의됩니다.

use thiserror::Error;

use crate::validation::FieldViolation;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// DTO 필드 검증 실패 (필드 단위 위반 목록 포함)
    #[error("입력 검증 실패 ({} 건)", .0.len())]
    Validation(Vec<FieldViolation>),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 로깅 초기화 에러
    #[error("로깅 초기화 실패: {0}")]
    Logging(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// 호출자가 입력을 고쳐 다시 시도할 수 있는 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CoreError::Validation(_) | CoreError::NotFound(_))
    }

    /// 검증 위반 목록 반환 (검증 에러가 아니면 빈 슬라이스).
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            CoreError::Validation(v) => v,
            _ => &[],
        }
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::Config(err.to_string())
    }
}
