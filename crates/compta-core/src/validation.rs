//! DTO 필드 단위 입력 검증.
//!
//! DTO는 `validator` derive로 필드 제약을 선언하고, 이 모듈은
//! - 사용자 정의 규칙 (월 범위 검사)
//! - `ValidationErrors` → 필드 위반 목록 평탄화
//!
//! 를 제공합니다. 검증은 동기적이며 공유 상태가 없습니다.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// 허용되는 최소 월.
pub const MIN_MONTH: i64 = 1;
/// 허용되는 최대 월.
pub const MAX_MONTH: i64 = 12;

/// 단일 필드 위반.
///
/// 시퀀스 필드의 원소 위반은 `months[2]`처럼 인덱스를 포함한 필드명으로 보고됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// 필드 경로
    pub field: String,
    /// 위반 코드 (예: "month_out_of_range", "length")
    pub code: String,
    /// 사람이 읽을 수 있는 메시지
    pub message: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// 월 목록 검증.
///
/// [1, 12] 범위를 벗어난 모든 원소의 인덱스를 `indices` 파라미터로 담아 반환합니다.
/// 정수가 아닌 값(소수, 64비트 범위 밖의 정수)도 범위 밖으로 취급합니다.
/// 빈 목록은 유효합니다.
pub fn validate_month_range(months: &[Number]) -> Result<(), ValidationError> {
    let offending: Vec<usize> = months
        .iter()
        .enumerate()
        .filter(|(_, month)| !is_month(month))
        .map(|(idx, _)| idx)
        .collect();

    if offending.is_empty() {
        return Ok(());
    }

    let mut error = ValidationError::new("month_out_of_range")
        .with_message("월은 1에서 12 사이여야 합니다".into());
    error.add_param("indices".into(), &offending);
    Err(error)
}

fn is_month(value: &Number) -> bool {
    value
        .as_i64()
        .is_some_and(|v| (MIN_MONTH..=MAX_MONTH).contains(&v))
}

/// `ValidationErrors`를 필드 위반 목록으로 평탄화합니다.
///
/// 필드명 순으로 정렬되며, `indices` 파라미터가 있는 에러는 인덱스마다 하나의 위반으로
/// 펼쳐집니다.
pub fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut fields: Vec<_> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut violations = Vec::new();
    for (field, errs) in fields {
        for err in errs.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{}: 유효하지 않은 값", field));

            match err.params.get("indices").and_then(|v| v.as_array()) {
                Some(indices) => {
                    for idx in indices.iter().filter_map(|v| v.as_u64()) {
                        violations.push(FieldViolation::new(
                            format!("{}[{}]", field, idx),
                            err.code.to_string(),
                            message.clone(),
                        ));
                    }
                }
                None => violations.push(FieldViolation::new(
                    field.clone(),
                    err.code.to_string(),
                    message,
                )),
            }
        }
    }
    violations
}

/// DTO를 검증하고 실패 시 `CoreError::Validation`을 반환합니다.
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), CoreError> {
    dto.validate()
        .map_err(|errors| CoreError::Validation(collect_violations(&errors)))
}
