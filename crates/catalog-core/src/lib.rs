//! # Catalog Core
//!
//! 상품 카탈로그 시스템의 핵심 도메인 모델 및 공용 인프라를 제공합니다.
//!
//! 이 크레이트는 서버와 클라이언트 양쪽에서 사용되는 기본 타입을 제공합니다:
//! - 사용자 및 인증 요청 타입
//! - 상품 및 부분 수정(patch) 타입
//! - 입력 검증 규칙
//! - 에러 분류 체계
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
