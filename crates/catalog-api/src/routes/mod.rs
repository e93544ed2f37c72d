//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/auth` - 회원가입, 로그인
//! - `/products` - 상품 CRUD (생성/삭제는 인증 필요)

pub mod auth;
pub mod health;
pub mod products;

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, Router};
use tracing::debug;

pub use auth::auth_router;
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use products::products_router;

use crate::error::ApiError;
use crate::state::AppState;

/// API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        .nest("/auth", auth_router())
        .nest("/products", products_router())
}

/// JSON 본문 추출 실패를 400 INVALID_BODY로 변환합니다.
///
/// 알 수 없는 필드, 타입 불일치, 잘못된 Content-Type 모두 여기로 옵니다.
pub(crate) fn invalid_body(rejection: JsonRejection) -> ApiError {
    debug!(error = %rejection.body_text(), "Rejected request body");
    ApiError::invalid_body(rejection.body_text())
}
