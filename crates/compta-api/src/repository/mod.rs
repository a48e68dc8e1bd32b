//! 관리 유형 저장소.
//!
//! 영속 계층은 외부 협력자이며, 이 크레이트는 트레이트와 메모리 구현만 제공합니다.

mod memory;

use async_trait::async_trait;
use compta_core::{AdminType, CoreResult, Month, TypeKind, TypeUpdateDto};

pub use memory::InMemoryTypeRepository;

/// 장부/신고 유형 저장소.
#[async_trait]
pub trait TypeRepository: Send + Sync {
    /// 종류별 전체 목록 (ID 오름차순).
    async fn list(&self, kind: TypeKind) -> CoreResult<Vec<AdminType>>;

    /// 단건 조회. 없으면 `CoreError::NotFound`.
    async fn get(&self, kind: TypeKind, id: u64) -> CoreResult<AdminType>;

    /// 설명 필드 수정 후 갱신된 레코드 반환.
    async fn update(&self, kind: TypeKind, id: u64, update: &TypeUpdateDto)
        -> CoreResult<AdminType>;

    /// 허용 월 추가 후 (갱신된 레코드, 새로 추가된 개수) 반환.
    async fn add_months(
        &self,
        kind: TypeKind,
        id: u64,
        months: &[Month],
    ) -> CoreResult<(AdminType, usize)>;
}
