//! 상품 카탈로그 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 회원가입/로그인/로그아웃 및 세션 상태 확인
//! - 상품 목록/상세 조회, 생성, 수정, 삭제

pub mod commands;

pub use commands::*;
