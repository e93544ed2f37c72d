//! Product Repository
//!
//! 상품 관련 데이터베이스 연산을 담당합니다.

use async_trait::async_trait;
use catalog_core::Product;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ProductRepository, RepositoryError};

/// PostgreSQL 상품 저장소
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn save(&self, product: &Product) -> Result<Product, RepositoryError> {
        let record = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, name, price, description)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                price = EXCLUDED.price,
                description = EXCLUDED.description,
                updated_at = NOW()
            RETURNING id, name, price, description
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let records = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, description FROM products ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        let record = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, description FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
