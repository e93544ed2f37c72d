//! 상품 서비스.
//!
//! 상품 저장소 위의 CRUD 연산과 존재 여부 확인을 담당합니다.

use std::sync::Arc;

use catalog_core::{CatalogError, CatalogResult, NewProduct, Product, ProductPatch};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::metrics::record_product_change;
use crate::repository::ProductRepository;

pub const PRODUCT_NOT_FOUND_MESSAGE: &str = "Product not found";

/// 상품 서비스.
#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// 상품 생성. 이름 길이와 가격 범위를 저장 전에 검증합니다.
    pub async fn create(&self, input: NewProduct) -> CatalogResult<Product> {
        input.validate()?;

        let product = self.products.save(&Product::create(input)).await?;

        info!(product_id = %product.id, name = %product.name, "Product created");
        record_product_change("create");
        Ok(product)
    }

    /// 전체 상품 목록.
    pub async fn list(&self) -> CatalogResult<Vec<Product>> {
        let products = self.products.find_all().await?;
        debug!(count = products.len(), "Products listed");
        Ok(products)
    }

    pub async fn get(&self, id: Uuid) -> CatalogResult<Product> {
        self.products.find_one(id).await?.ok_or_else(not_found)
    }

    /// 부분 수정. 전달된 필드만 기존 레코드에 병합합니다.
    pub async fn update(&self, id: Uuid, patch: ProductPatch) -> CatalogResult<Product> {
        patch.validate()?;

        let mut product = self.get(id).await?;
        product.apply(patch);
        let product = self.products.save(&product).await?;

        info!(product_id = %product.id, "Product updated");
        record_product_change("update");
        Ok(product)
    }

    pub async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        if self.products.delete(id).await? == 0 {
            return Err(not_found());
        }

        info!(product_id = %id, "Product deleted");
        record_product_change("delete");
        Ok(())
    }
}

fn not_found() -> CatalogError {
    CatalogError::NotFound(PRODUCT_NOT_FOUND_MESSAGE.to_string())
}
