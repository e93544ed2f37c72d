//! 저장소 계층.
//!
//! 서비스는 구체 타입 대신 저장소 trait에 의존합니다. PostgreSQL 구현은
//! 운영 환경에서, 인메모리 구현은 테스트와 `DATABASE_URL` 없는 실행에서 사용됩니다.
//!
//! - [`UserRepository`]: 자격증명 저장소
//! - [`ProductRepository`]: 상품 저장소

mod memory;
mod products;
mod users;

use async_trait::async_trait;
use catalog_core::{CatalogError, Product, User};
use uuid::Uuid;

pub use memory::{MemoryProductRepository, MemoryUserRepository};
pub use products::PgProductRepository;
pub use users::PgUserRepository;

/// 저장소 에러.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// 유니크 제약 조건 위반 (제약 조건 또는 필드 이름 포함)
    #[error("중복된 값: {0}")]
    Duplicate(String),

    #[error("데이터베이스 에러: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                let constraint = db.constraint().unwrap_or("unique").to_string();
                return RepositoryError::Duplicate(constraint);
            }
        }
        RepositoryError::Database(err)
    }
}

impl From<RepositoryError> for CatalogError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(what) => {
                CatalogError::Conflict(format!("Duplicate value ({})", what))
            }
            RepositoryError::Database(e) => CatalogError::Storage(e.to_string()),
        }
    }
}

/// 자격증명 저장소.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 새 사용자 저장. 사용자명 또는 이메일이 이미 있으면 `Duplicate`.
    async fn save(&self, user: &User) -> Result<(), RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
}

/// 상품 저장소.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 상품 저장 (같은 ID가 있으면 교체). 저장된 레코드를 반환합니다.
    async fn save(&self, product: &Product) -> Result<Product, RepositoryError>;

    /// 전체 상품 조회 (페이지네이션 없음)
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn find_one(&self, id: Uuid) -> Result<Option<Product>, RepositoryError>;

    /// 상품 삭제. 삭제된 행 수를 반환합니다.
    async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError>;
}
