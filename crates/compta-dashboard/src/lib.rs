//! 대시보드 접근 제어.
//!
//! - [`session`]: 현재 세션 조회 (HTTP 세션 소스)
//! - [`redirect`]: 역할 기반 리다이렉트 상태 머신
//! - [`layout`]: 모든 대시보드 페이지를 감싸는 레이아웃

pub mod error;
pub mod layout;
pub mod redirect;
pub mod session;

pub use error::{SessionError, SessionResult};
pub use layout::{DashboardLayout, PageMetadata};
pub use redirect::{Navigator, RedirectPolicy, RedirectState, RoleRedirect};
pub use session::{HttpSessionSource, SessionSource, SESSION_PATH};
