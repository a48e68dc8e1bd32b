//! 메모리 기반 유형 저장소.

use std::collections::BTreeMap;

use async_trait::async_trait;
use compta_core::{AdminType, CoreError, CoreResult, Month, TypeKind, TypeUpdateDto};
use tokio::sync::RwLock;
use tracing::debug;

use super::TypeRepository;

/// 메모리 기반 유형 저장소.
#[derive(Debug, Default)]
pub struct InMemoryTypeRepository {
    types: RwLock<BTreeMap<(TypeKind, u64), AdminType>>,
}

fn not_found(kind: TypeKind, id: u64) -> CoreError {
    CoreError::NotFound(format!("{} type {}", kind, id))
}

impl InMemoryTypeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기본 장부/신고 유형이 채워진 저장소.
    pub fn with_defaults() -> Self {
        let seed = [
            AdminType::new(1, TypeKind::Livre, "Journal"),
            AdminType::new(2, TypeKind::Livre, "Grand livre"),
            AdminType::new(3, TypeKind::Livre, "Livre d'inventaire"),
            AdminType::new(1, TypeKind::Declaration, "TVA"),
            AdminType::new(2, TypeKind::Declaration, "IS"),
        ];
        let types = seed
            .into_iter()
            .map(|t| ((t.kind, t.id), t))
            .collect();
        Self {
            types: RwLock::new(types),
        }
    }

    /// 레코드 삽입 (같은 키는 덮어씀).
    pub async fn insert(&self, admin_type: AdminType) {
        let key = (admin_type.kind, admin_type.id);
        self.types.write().await.insert(key, admin_type);
    }
}

#[async_trait]
impl TypeRepository for InMemoryTypeRepository {
    async fn list(&self, kind: TypeKind) -> CoreResult<Vec<AdminType>> {
        Ok(self
            .types
            .read()
            .await
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, t)| t.clone())
            .collect())
    }

    async fn get(&self, kind: TypeKind, id: u64) -> CoreResult<AdminType> {
        self.types
            .read()
            .await
            .get(&(kind, id))
            .cloned()
            .ok_or_else(|| not_found(kind, id))
    }

    async fn update(
        &self,
        kind: TypeKind,
        id: u64,
        update: &TypeUpdateDto,
    ) -> CoreResult<AdminType> {
        let mut types = self.types.write().await;
        let entry = types
            .get_mut(&(kind, id))
            .ok_or_else(|| not_found(kind, id))?;

        let changed = entry.apply_update(update);
        debug!(%kind, id, changed, "Type updated");
        Ok(entry.clone())
    }

    async fn add_months(
        &self,
        kind: TypeKind,
        id: u64,
        months: &[Month],
    ) -> CoreResult<(AdminType, usize)> {
        let mut types = self.types.write().await;
        let entry = types
            .get_mut(&(kind, id))
            .ok_or_else(|| not_found(kind, id))?;

        let added = entry.add_months(months);
        debug!(%kind, id, added, "Months added");
        Ok((entry.clone(), added))
    }
}
