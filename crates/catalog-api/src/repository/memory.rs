//! 인메모리 저장소.
//!
//! 테스트 및 데이터베이스 없이 실행할 때 사용합니다. 프로세스가 종료되면
//! 데이터는 사라집니다. 목록은 삽입 순서를 유지합니다.

use async_trait::async_trait;
use catalog_core::{Product, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProductRepository, RepositoryError, UserRepository};

/// 인메모리 자격증명 저장소.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 사용자 수.
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;

        // PostgreSQL 스키마의 UNIQUE 제약과 동일하게 동작
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Duplicate("users_email_key".to_string()));
        }
        if users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::Duplicate("users_username_key".to_string()));
        }
        if users.iter().any(|u| u.id == user.id) {
            return Err(RepositoryError::Duplicate("users_pkey".to_string()));
        }

        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

/// 인메모리 상품 저장소.
#[derive(Debug, Default)]
pub struct MemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn save(&self, product: &Product) -> Result<Product, RepositoryError> {
        let mut products = self.products.write().await;

        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product.clone(),
            None => products.push(product.clone()),
        }

        Ok(product.clone())
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.read().await.clone())
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Product>, RepositoryError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok((before - products.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::NewProduct;
    use rust_decimal_macros::dec;

    fn product(name: &str) -> Product {
        Product::create(NewProduct {
            name: name.to_string(),
            price: dec!(10),
            description: None,
        })
    }

    #[tokio::test]
    async fn test_user_uniqueness() {
        let repo = MemoryUserRepository::new();
        repo.save(&User::new("alice", "alice@example.com", "hash"))
            .await
            .unwrap();

        let same_email = repo
            .save(&User::new("alice2", "alice@example.com", "hash"))
            .await;
        assert!(matches!(same_email, Err(RepositoryError::Duplicate(c)) if c.contains("email")));

        let same_username = repo
            .save(&User::new("alice", "other@example.com", "hash"))
            .await;
        assert!(
            matches!(same_username, Err(RepositoryError::Duplicate(c)) if c.contains("username"))
        );

        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_user_lookup() {
        let repo = MemoryUserRepository::new();
        let user = User::new("bob", "bob@example.com", "hash");
        repo.save(&user).await.unwrap();

        assert_eq!(repo.find_by_id(user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(
            repo.find_by_email("bob@example.com").await.unwrap(),
            Some(user)
        );
        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_product_save_replaces_and_keeps_order() {
        let repo = MemoryProductRepository::new();
        let first = product("Desk Lamp");
        let second = product("Chair");
        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();

        let mut updated = first.clone();
        updated.price = dec!(20);
        repo.save(&updated).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].price, dec!(20));
        assert_eq!(all[1].id, second.id);
    }

    #[tokio::test]
    async fn test_product_delete_reports_rows() {
        let repo = MemoryProductRepository::new();
        let item = product("Desk Lamp");
        repo.save(&item).await.unwrap();

        assert_eq!(repo.delete(item.id).await.unwrap(), 1);
        assert_eq!(repo.delete(item.id).await.unwrap(), 0);
        assert!(repo.find_one(item.id).await.unwrap().is_none());
    }
}
