//! 인증 명령 (register, login, logout, status).

use anyhow::Result;
use catalog_client::{CatalogClient, LoginForm, RegisterForm};
use tracing::info;

use super::client_error;

/// 회원가입 후 세션 저장.
pub async fn register(client: &CatalogClient, form: RegisterForm) -> Result<()> {
    let request = form.to_request().map_err(client_error)?;
    client
        .auth
        .register(&request)
        .await
        .map_err(client_error)?;

    info!(username = %request.username, "Registration completed");
    println!("회원가입 완료: {} ({})", request.username, request.email);
    Ok(())
}

/// 로그인 후 세션 저장.
pub async fn login(client: &CatalogClient, form: LoginForm) -> Result<()> {
    let request = form.to_request().map_err(client_error)?;
    client.auth.login(&request).await.map_err(client_error)?;

    println!("로그인 완료: {}", request.email);
    Ok(())
}

pub fn logout(client: &CatalogClient) -> Result<()> {
    client.auth.logout().map_err(client_error)?;
    println!("로그아웃 완료");
    Ok(())
}

/// 저장된 세션 상태 출력.
///
/// 쿠키 만료(1일)만 확인합니다. 서버 토큰은 더 일찍 만료될 수 있습니다.
pub fn status(client: &CatalogClient) -> Result<()> {
    match client.auth.session().load().map_err(client_error)? {
        Some(session) => {
            println!("로그인 상태: 세션 만료 {}", session.expires_at.to_rfc3339());
        }
        None => println!("로그인되어 있지 않습니다"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_client::{FileSessionStore, Session, SessionStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_login_writes_session_file() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":"jwt-token"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let client = CatalogClient::new(server.url(), Arc::new(FileSessionStore::new(&path)));

        login(
            &client,
            LoginForm {
                email: "alice@example.com".to_string(),
                password: "Passw0rd!".to_string(),
            },
        )
        .await
        .unwrap();

        let stored = FileSessionStore::new(&path).load().unwrap().unwrap();
        assert_eq!(stored.token, "jwt-token");

        logout(&client).unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_register_mismatch_fails_before_request() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.save(&Session::new("existing")).unwrap();
        let client = CatalogClient::new("http://127.0.0.1:9", Arc::new(store));

        let err = register(
            &client,
            RegisterForm {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "Passw0rd!".to_string(),
                confirm_password: "different".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Passwords do not match");
        assert_eq!(client.auth.token().unwrap().as_deref(), Some("existing"));
    }
}
