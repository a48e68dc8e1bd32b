//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! Arc로 래핑되어 여러 요청 간에 공유됩니다. 인증 모듈은 상태가 아니라
//! 라우터 구성 시점에 명시적으로 전달됩니다.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::repository::TypeRepository;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 장부/신고 유형 저장소
    pub types: Arc<dyn TypeRepository>,

    /// 서버 시작 시간 (헬스 체크 업타임 계산용)
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(types: Arc<dyn TypeRepository>) -> Self {
        Self {
            types,
            started_at: Utc::now(),
        }
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// 기본 유형이 채워진 메모리 저장소를 쓰는 테스트용 상태.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    AppState::new(Arc::new(
        crate::repository::InMemoryTypeRepository::with_defaults(),
    ))
}
