//! 인증된 사용자 세션.
//!
//! 서버에서는 검증된 토큰의 Claims로부터 만들어지고, 대시보드 클라이언트에서는
//! 세션 조회 결과로 메모리에 보관됩니다. 모든 소비자에게 읽기 전용입니다.

use serde::{Deserialize, Serialize};

use super::Role;

/// 인증된 사용자 세션.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// 사용자 ID
    pub user_id: String,
    /// 사용자 이름
    pub username: String,
    /// 사용자 역할
    pub role: Role,
    /// 만료 시간 (Unix timestamp)
    pub expires_at: i64,
}

impl Session {
    /// 주어진 시각 기준으로 세션이 만료되었는지 확인.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires_at
    }
}
