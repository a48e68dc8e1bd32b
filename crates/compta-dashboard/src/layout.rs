//! 대시보드 레이아웃.
//!
//! 모든 대시보드 페이지를 [`RoleRedirect`]로 감쌉니다. 레이아웃 자체는
//! 페이지 메타데이터만 가집니다.

use chrono::Utc;
use compta_core::Session;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::redirect::{RedirectState, RoleRedirect};

/// 페이지 메타데이터.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

impl PageMetadata {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl Default for PageMetadata {
    fn default() -> Self {
        Self::new("Compta", "Gestion comptable et déclarations")
    }
}

/// 대시보드 레이아웃.
pub struct DashboardLayout {
    metadata: PageMetadata,
    redirect: RoleRedirect,
}

impl DashboardLayout {
    pub fn new(metadata: PageMetadata, redirect: RoleRedirect) -> Self {
        Self { metadata, redirect }
    }

    pub fn metadata(&self) -> &PageMetadata {
        &self.metadata
    }

    pub fn state(&self) -> &RedirectState {
        self.redirect.state()
    }

    /// 세션 확인 후 허용된 경우에만 페이지를 렌더링합니다.
    pub async fn show_at<T>(
        &mut self,
        now: i64,
        cancel: &CancellationToken,
        page: impl FnOnce(&PageMetadata, &Session) -> T,
    ) -> Option<T> {
        self.redirect.check(now, cancel).await;
        let metadata = &self.metadata;
        self.redirect.render(|session| page(metadata, session))
    }

    /// 현재 시각 기준 [`show_at`](Self::show_at).
    pub async fn show<T>(
        &mut self,
        cancel: &CancellationToken,
        page: impl FnOnce(&PageMetadata, &Session) -> T,
    ) -> Option<T> {
        self.show_at(Utc::now().timestamp(), cancel, page).await
    }

    /// 세션 무효화.
    pub fn invalidate(&mut self) {
        self.redirect.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metadata() {
        let metadata = PageMetadata::default();
        assert_eq!(metadata.title, "Compta");
        assert!(!metadata.description.is_empty());
    }
}
