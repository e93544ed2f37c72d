//! 상품 목록 화면 상태.
//!
//! 목록, 편집 대상, 로딩 여부, 인라인 에러 메시지, 입력 폼을 보관하고
//! 사용자 동작을 서버 호출로 연결합니다. 실패는 재시도하지 않고
//! `error`에 메시지로만 남깁니다.

use catalog_core::Product;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ClientResult;
use crate::forms::ProductForm;
use crate::products::ProductClient;

/// 상품 카탈로그 화면.
pub struct CatalogPage {
    client: ProductClient,
    pub products: Vec<Product>,
    /// 수정 중인 상품 ID (없으면 생성 모드)
    pub editing_id: Option<Uuid>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub form: ProductForm,
}

impl CatalogPage {
    pub fn new(client: ProductClient) -> Self {
        Self {
            client,
            products: Vec::new(),
            editing_id: None,
            is_loading: false,
            error: None,
            form: ProductForm::default(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// 결과를 화면 상태에 반영합니다. 실패 시 메시지를 저장하고 None을 반환합니다.
    fn settle<T>(&mut self, result: ClientResult<T>) -> Option<T> {
        self.is_loading = false;
        match result {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(e) => {
                warn!(error = %e, "Catalog action failed");
                self.error = Some(e.message());
                None
            }
        }
    }

    /// 전체 상품 목록을 다시 불러옵니다.
    pub async fn fetch_products(&mut self) -> bool {
        self.is_loading = true;
        let result = self.client.get_all().await;
        match self.settle(result) {
            Some(products) => {
                debug!(count = products.len(), "Fetched products");
                self.products = products;
                true
            }
            None => false,
        }
    }

    /// 폼을 제출합니다. 편집 중이면 수정, 아니면 생성합니다.
    ///
    /// 성공하면 목록을 새로 고치고 폼과 편집 대상을 초기화합니다.
    pub async fn submit(&mut self) -> bool {
        self.is_loading = true;
        let result = match self.editing_id {
            Some(id) => match self.form.to_patch() {
                Ok(patch) => self.client.update(id, &patch).await,
                Err(e) => Err(e),
            },
            None => match self.form.to_new_product() {
                Ok(product) => self.client.create(&product).await,
                Err(e) => Err(e),
            },
        };

        if self.settle(result).is_none() {
            return false;
        }

        self.form.reset();
        self.editing_id = None;
        self.fetch_products().await
    }

    /// 상품을 편집 대상으로 지정하고 폼에 불러옵니다.
    pub async fn edit(&mut self, id: Uuid) -> bool {
        let cached = self.products.iter().find(|p| p.id == id).cloned();
        let product = match cached {
            Some(product) => product,
            None => {
                self.is_loading = true;
                let result = self.client.get_by_id(id).await;
                match self.settle(result) {
                    Some(product) => product,
                    None => return false,
                }
            }
        };

        self.form = ProductForm::from_product(&product);
        self.editing_id = Some(product.id);
        true
    }

    /// 상품을 삭제합니다. 확인되지 않으면 아무것도 하지 않습니다.
    pub async fn delete(&mut self, id: Uuid, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }

        self.is_loading = true;
        let result = self.client.delete(id).await;
        if self.settle(result).is_none() {
            return false;
        }

        if self.editing_id == Some(id) {
            self.cancel();
        }
        self.fetch_products().await
    }

    /// 편집을 취소하고 폼을 비웁니다.
    pub fn cancel(&mut self) {
        self.editing_id = None;
        self.form.reset();
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, Session, SessionStore};
    use std::sync::Arc;

    const PRODUCT_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    fn page(base_url: &str) -> CatalogPage {
        let store = MemorySessionStore::new();
        store.save(&Session::new("jwt-token")).unwrap();
        CatalogPage::new(ProductClient::new(
            reqwest::Client::new(),
            base_url,
            Arc::new(store),
        ))
    }

    fn lamp_list() -> String {
        format!(
            r#"[{{"id":"{}","name":"Desk Lamp","price":"49.99","description":"LED"}}]"#,
            PRODUCT_ID
        )
    }

    #[tokio::test]
    async fn test_fetch_and_edit_loads_form() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(lamp_list())
            .create_async()
            .await;

        let mut page = page(&server.url());
        assert!(page.fetch_products().await);
        assert_eq!(page.products.len(), 1);
        assert!(!page.is_loading);

        let id: Uuid = PRODUCT_ID.parse().unwrap();
        assert!(page.edit(id).await);
        assert_eq!(page.editing_id, Some(id));
        assert_eq!(page.form.name, "Desk Lamp");
        assert_eq!(page.form.price, "49.99");

        page.cancel();
        assert!(!page.is_editing());
        assert_eq!(page.form, ProductForm::default());
    }

    #[tokio::test]
    async fn test_submit_invalid_form_sets_inline_error() {
        // 검증 실패 시 서버 호출 없음
        let server = mockito::Server::new_async().await;
        let mut page = page(&server.url());
        page.form = ProductForm::new("ab", "10", "");

        assert!(!page.submit().await);
        assert_eq!(
            page.error.as_deref(),
            Some("Name must be between 3 and 50 characters long")
        );
        assert_eq!(page.form.name, "ab");

        page.dismiss_error();
        assert!(page.error.is_none());
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_does_nothing() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", format!("/products/{}", PRODUCT_ID).as_str())
            .expect(0)
            .create_async()
            .await;

        let mut page = page(&server.url());
        assert!(!page.delete(PRODUCT_ID.parse().unwrap(), false).await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_stored_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/products")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":"TOKEN_EXPIRED","message":"Token expired"}"#)
            .expect(1)
            .create_async()
            .await;

        let mut page = page(&server.url());
        page.form = ProductForm::new("Desk Lamp", "49.99", "LED");

        assert!(!page.submit().await);
        mock.assert_async().await;
        assert_eq!(page.error.as_deref(), Some("Token expired"));
        // 실패 시 입력값 유지
        assert_eq!(page.form.name, "Desk Lamp");
    }
}
