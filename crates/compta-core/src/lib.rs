//! # Compta Core
//!
//! 회계 관리 백엔드의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 API 서버와 대시보드 클라이언트가 공유하는 기본 타입을 제공합니다:
//! - 사용자 역할 및 세션
//! - 장부 유형(livre type) / 신고 유형(declaration type) 도메인 모델
//! - DTO 및 필드 단위 입력 검증
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod dto;
pub mod error;
pub mod logging;
pub mod validation;

pub use config::*;
pub use domain::*;
pub use dto::{AddMonthsDto, TypeUpdateDto};
pub use error::*;
pub use logging::*;
pub use validation::{collect_violations, validate_dto, FieldViolation};
