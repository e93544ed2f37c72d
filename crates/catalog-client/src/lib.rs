//! 상품 카탈로그 클라이언트.
//!
//! REST API를 호출하는 HTTP 래퍼와 화면 상태를 제공합니다:
//! - [`auth`]: 회원가입/로그인/로그아웃
//! - [`products`]: 상품 CRUD 호출
//! - [`session`]: 토큰 "쿠키" 저장소 (1일 만료)
//! - [`forms`]: 입력 폼과 클라이언트 측 검증
//! - [`catalog`]: 상품 목록 화면 상태

pub mod auth;
pub mod catalog;
pub mod error;
pub mod forms;
mod http;
pub mod products;
pub mod session;

use std::sync::Arc;

pub use auth::AuthClient;
pub use catalog::CatalogPage;
pub use error::{ClientError, ClientResult};
pub use forms::{LoginForm, ProductForm, RegisterForm};
pub use products::ProductClient;
pub use session::{
    FileSessionStore, MemorySessionStore, Session, SessionStore, SESSION_COOKIE_TTL_SECS,
};

/// 같은 세션과 HTTP 연결 풀을 공유하는 API 클라이언트 묶음.
#[derive(Clone)]
pub struct CatalogClient {
    pub auth: AuthClient,
    pub products: ProductClient,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        let base_url = base_url.into();
        let http = reqwest::Client::new();
        Self {
            auth: AuthClient::new(http.clone(), base_url.clone(), Arc::clone(&session)),
            products: ProductClient::new(http, base_url, session),
        }
    }

    /// 상품 목록 화면 상태를 생성합니다.
    pub fn catalog_page(&self) -> CatalogPage {
        CatalogPage::new(self.products.clone())
    }
}
