//! 세션 조회 에러.

/// 세션 작업용 Result 타입.
pub type SessionResult<T> = Result<T, SessionError>;

/// 세션 소스 에러.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("네트워크 에러: {0}")]
    Network(#[from] reqwest::Error),

    #[error("예상하지 못한 응답: HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("세션 응답 파싱 실패: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("잘못된 설정: {0}")]
    InvalidConfig(String),
}
