//! 인증 API 클라이언트.
//!
//! 회원가입/로그인 성공 시 받은 토큰을 세션 저장소에 보관합니다.

use std::sync::Arc;

use catalog_core::{AuthToken, LoginRequest, RegisterRequest};
use tracing::{info, warn};

use crate::error::ClientResult;
use crate::http::{endpoint, read_json};
use crate::session::{Session, SessionStore};

/// `/auth` 엔드포인트 클라이언트.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl AuthClient {
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

    /// POST /auth/register
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthToken> {
        let response = self
            .http
            .post(endpoint(&self.base_url, "/auth/register"))
            .json(request)
            .send()
            .await?;
        let token: AuthToken = read_json(response).await?;

        self.session.save(&Session::new(&token.token))?;
        info!(username = %request.username, "Registered and stored session");
        Ok(token)
    }

    /// POST /auth/login
    pub async fn login(&self, request: &LoginRequest) -> ClientResult<AuthToken> {
        let response = self
            .http
            .post(endpoint(&self.base_url, "/auth/login"))
            .json(request)
            .send()
            .await?;
        let token: AuthToken = read_json(response).await?;

        self.session.save(&Session::new(&token.token))?;
        info!(email = %request.email, "Logged in and stored session");
        Ok(token)
    }

    /// 저장된 세션을 삭제합니다. 서버 호출은 없습니다.
    pub fn logout(&self) -> ClientResult<()> {
        self.session.clear()
    }

    /// 현재 유효한 토큰.
    pub fn token(&self) -> ClientResult<Option<String>> {
        self.session.token()
    }

    /// 쿠키 기준 로그인 여부. 서버 토큰이 이미 만료되었을 수 있습니다.
    pub fn is_authenticated(&self) -> bool {
        match self.session.load() {
            Ok(session) => session.is_some(),
            Err(e) => {
                warn!(error = %e, "Failed to read session");
                false
            }
        }
    }

    pub fn session(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use crate::ClientError;

    fn client(base_url: &str) -> AuthClient {
        AuthClient::new(
            reqwest::Client::new(),
            base_url,
            Arc::new(MemorySessionStore::new()),
        )
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/login")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"email":"alice@example.com"}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":"jwt-token"}"#)
            .create_async()
            .await;

        let auth = client(&server.url());
        assert!(!auth.is_authenticated());

        let token = auth
            .login(&LoginRequest {
                email: "alice@example.com".to_string(),
                password: "Passw0rd!".to_string(),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(token.token, "jwt-token");
        assert_eq!(auth.token().unwrap().as_deref(), Some("jwt-token"));
        assert!(auth.is_authenticated());

        auth.logout().unwrap();
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_conflict_surfaces_server_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/register")
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":"CONFLICT","message":"User with this email already exists"}"#)
            .create_async()
            .await;

        let auth = client(&server.url());
        let err = auth
            .register(&RegisterRequest {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "Passw0rd!".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Api { status: 409, .. }));
        assert_eq!(err.message(), "User with this email already exists");
        assert!(auth.token().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_error_without_body_uses_reason() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .with_status(401)
            .create_async()
            .await;

        let err = client(&server.url())
            .login(&LoginRequest {
                email: "alice@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Unauthorized");
    }
}
