//! 상품 카탈로그 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (회원가입/로그인, 상품 CRUD)
//! - JWT 인증 및 보호된 라우트용 추출기
//! - PostgreSQL 및 인메모리 저장소
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: JWT 인증 및 비밀번호 해싱
//! - [`services`]: 인증/상품 비즈니스 로직
//! - [`repository`]: 저장소 trait과 구현
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{hash_password, verify_password, Claims, CurrentUser, TokenIssuer};
pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use metrics::setup_metrics_recorder;
pub use middleware::track_request_metrics;
pub use routes::create_api_router;
pub use services::{AuthService, ProductService};
pub use state::{AppState, StorageBackend};

#[cfg(any(test, feature = "test-utils"))]
pub use state::{create_test_state, test_token_issuer, TEST_JWT_SECRET};
