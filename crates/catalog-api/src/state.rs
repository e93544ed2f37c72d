//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenIssuer;
use crate::repository::{
    MemoryProductRepository, MemoryUserRepository, PgProductRepository, PgUserRepository,
    ProductRepository, UserRepository,
};
use crate::services::{AuthService, ProductService};

/// 저장소 백엔드 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Postgres => "postgres",
            StorageBackend::Memory => "memory",
        }
    }
}

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 인증 서비스 - 회원가입, 로그인, 토큰 검증
    pub auth: AuthService,

    /// 상품 서비스 - 상품 CRUD
    pub products: ProductService,

    /// 데이터베이스 연결 풀 (PostgreSQL 사용 시)
    pub db_pool: Option<PgPool>,

    /// 사용 중인 저장소 백엔드
    pub storage: StorageBackend,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 주어진 저장소로 AppState 생성.
    pub fn new(
        users: Arc<dyn UserRepository>,
        products: Arc<dyn ProductRepository>,
        tokens: TokenIssuer,
        storage: StorageBackend,
    ) -> Self {
        Self {
            auth: AuthService::new(users, tokens),
            products: ProductService::new(products),
            db_pool: None,
            storage,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 인메모리 저장소를 사용하는 AppState.
    pub fn in_memory(tokens: TokenIssuer) -> Self {
        Self::new(
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryProductRepository::new()),
            tokens,
            StorageBackend::Memory,
        )
    }

    /// PostgreSQL 저장소를 사용하는 AppState.
    pub fn with_postgres(pool: PgPool, tokens: TokenIssuer) -> Self {
        let mut state = Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgProductRepository::new(pool.clone())),
            tokens,
            StorageBackend::Postgres,
        );
        state.db_pool = Some(pool);
        state
    }

    /// 서버 업타임 (초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        if let Some(pool) = &self.db_pool {
            sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
        } else {
            false
        }
    }
}

/// 테스트용 JWT 비밀 키.
#[cfg(any(test, feature = "test-utils"))]
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

/// 테스트용 AppState 생성 (인메모리 저장소, 1시간 토큰).
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    AppState::in_memory(test_token_issuer(crate::auth::DEFAULT_TOKEN_TTL_MINUTES))
}

/// 테스트용 토큰 발급기. 음수 TTL을 주면 이미 만료된 토큰을 발급합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn test_token_issuer(ttl_minutes: i64) -> TokenIssuer {
    TokenIssuer::new(
        &secrecy::SecretString::from(TEST_JWT_SECRET.to_string()),
        ttl_minutes,
    )
}
