//! 관리 API 요청 DTO.
//!
//! 장부 유형과 신고 유형 관리에 공통으로 사용됩니다.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use validator::Validate;

use crate::domain::Month;
use crate::validation::validate_month_range;

/// 허용 월 추가 요청.
///
/// 모든 원소는 1-12 범위여야 합니다. 빈 목록은 허용됩니다.
///
/// 원소는 JSON 숫자 그대로 받습니다. `i32` 범위를 넘는 정수나 소수도
/// 역직렬화 단계에서 거부되지 않고 검증에서 인덱스별 위반으로 보고됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AddMonthsDto {
    /// 추가할 월 목록 (순서 유지)
    #[validate(custom(function = "validate_month_range"))]
    pub months: Vec<Number>,
}

impl AddMonthsDto {
    pub fn new(months: impl IntoIterator<Item = i64>) -> Self {
        Self {
            months: months.into_iter().map(Number::from).collect(),
        }
    }

    /// 검증을 통과한 월만 `Month`로 변환합니다.
    ///
    /// 검증 이후에 호출하면 원소 수가 그대로 유지됩니다.
    pub fn to_months(&self) -> Vec<Month> {
        self.months
            .iter()
            .filter_map(|m| m.as_i64())
            .filter_map(|m| i32::try_from(m).ok())
            .filter_map(Month::new)
            .collect()
    }
}

/// 유형 설명 필드 수정 요청.
///
/// 필드가 없으면 "변경 없음", 빈 문자열은 명시적인 값으로 취급합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TypeUpdateDto {
    /// 유형 이름
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 설명
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 관련 조항
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles: Option<String>,
}

impl TypeUpdateDto {
    /// 변경할 필드가 하나도 없는지 확인.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.articles.is_none()
    }
}
