//! 관리 대상 참조 유형.
//!
//! 장부 유형(livre type)과 신고 유형(declaration type)은 동일한 형태를 가집니다:
//! 설명 필드와 허용 월 집합.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::TypeUpdateDto;

/// 1-12 범위가 보장된 월.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Month(u8);

impl Month {
    /// 범위를 벗어나면 `None`.
    pub fn new(value: i32) -> Option<Self> {
        if (1..=12).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Month {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Month::new(value).ok_or_else(|| format!("월 범위 초과: {}", value))
    }
}

impl From<Month> for i32 {
    fn from(month: Month) -> Self {
        month.0 as i32
    }
}

/// 유형 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// 장부 유형
    Livre,
    /// 신고 유형
    Declaration,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Livre => write!(f, "livre"),
            TypeKind::Declaration => write!(f, "declaration"),
        }
    }
}

/// 관리 대상 유형 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminType {
    pub id: u64,
    pub kind: TypeKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub articles: Option<String>,
    /// 허용 월 (오름차순, 중복 없음)
    pub months: BTreeSet<Month>,
    pub updated_at: DateTime<Utc>,
}

impl AdminType {
    pub fn new(id: u64, kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            description: None,
            articles: None,
            months: BTreeSet::new(),
            updated_at: Utc::now(),
        }
    }

    /// 설명 필드 수정을 적용합니다.
    ///
    /// 없는 필드는 그대로 두고, 빈 문자열은 그대로 저장합니다.
    /// 실제로 바뀐 필드가 있으면 `true`.
    pub fn apply_update(&mut self, update: &TypeUpdateDto) -> bool {
        let mut changed = false;

        if let Some(name) = &update.name {
            changed |= self.name != *name;
            self.name = name.clone();
        }
        if let Some(description) = &update.description {
            changed |= self.description.as_deref() != Some(description.as_str());
            self.description = Some(description.clone());
        }
        if let Some(articles) = &update.articles {
            changed |= self.articles.as_deref() != Some(articles.as_str());
            self.articles = Some(articles.clone());
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    /// 허용 월을 추가하고 새로 추가된 개수를 반환합니다.
    pub fn add_months(&mut self, months: &[Month]) -> usize {
        let added = months.iter().filter(|m| self.months.insert(**m)).count();
        if added > 0 {
            self.updated_at = Utc::now();
        }
        added
    }
}
