//! 역할 기반 접근 제어 (RBAC).
//!
//! 사용자 역할 및 역할별 기능 정의.

use serde::{Deserialize, Serialize};

/// 사용자 역할.
///
/// 역할별 랜딩 페이지는 설정(`redirect.landing_pages`)에서 결정됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 관리자 - 모든 권한 보유
    Admin,
    /// 회계 담당자 - 유형 관리 권한
    Accountant,
    /// 일반 사용자 - 읽기 전용
    User,
}

impl Role {
    /// 모든 역할.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Accountant, Role::User];

    /// 기본 대시보드 접근 권한.
    ///
    /// 실제 허용 역할은 `redirect.dashboard_roles` 설정이 결정하며,
    /// 이 값은 그 기본값입니다.
    pub fn can_view_dashboard(&self) -> bool {
        matches!(self, Role::Admin | Role::Accountant)
    }

    /// 장부/신고 유형을 수정할 수 있는지 확인.
    pub fn can_manage_types(&self) -> bool {
        matches!(self, Role::Admin | Role::Accountant)
    }

    /// 역할 이름 반환.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Accountant => "accountant",
            Role::User => "user",
        }
    }

    /// 문자열에서 역할 파싱.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "accountant" => Some(Role::Accountant),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
