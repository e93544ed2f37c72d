//! 상품 API 클라이언트.

use std::sync::Arc;

use catalog_core::{NewProduct, Product, ProductPatch};
use tracing::debug;
use uuid::Uuid;

use crate::error::ClientResult;
use crate::http::{endpoint, expect_success, read_json, with_bearer};
use crate::session::SessionStore;

/// `/products` 엔드포인트 클라이언트.
///
/// 생성/삭제 요청에는 저장된 토큰을 Bearer 헤더로 붙입니다.
#[derive(Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ProductClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            session,
        }
    }

    fn product_url(&self, id: Uuid) -> String {
        endpoint(&self.base_url, &format!("/products/{}", id))
    }

    /// GET /products
    pub async fn get_all(&self) -> ClientResult<Vec<Product>> {
        let response = self
            .http
            .get(endpoint(&self.base_url, "/products"))
            .send()
            .await?;
        read_json(response).await
    }

    /// GET /products/{id}
    pub async fn get_by_id(&self, id: Uuid) -> ClientResult<Product> {
        let response = self.http.get(self.product_url(id)).send().await?;
        read_json(response).await
    }

    /// POST /products (인증 필요)
    pub async fn create(&self, product: &NewProduct) -> ClientResult<Product> {
        let token = self.session.token()?;
        debug!(name = %product.name, authenticated = token.is_some(), "Creating product");

        let request = self
            .http
            .post(endpoint(&self.base_url, "/products"))
            .json(product);
        let response = with_bearer(request, token.as_deref()).send().await?;
        read_json(response).await
    }

    /// PATCH /products/{id}
    pub async fn update(&self, id: Uuid, patch: &ProductPatch) -> ClientResult<Product> {
        debug!(product_id = %id, "Updating product");
        let response = self
            .http
            .patch(self.product_url(id))
            .json(patch)
            .send()
            .await?;
        read_json(response).await
    }

    /// DELETE /products/{id} (인증 필요)
    pub async fn delete(&self, id: Uuid) -> ClientResult<()> {
        let token = self.session.token()?;
        debug!(product_id = %id, authenticated = token.is_some(), "Deleting product");

        let request = self.http.delete(self.product_url(id));
        let response = with_bearer(request, token.as_deref()).send().await?;
        expect_success(response).await
    }
}
