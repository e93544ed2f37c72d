//! 인증 서비스.
//!
//! 회원가입(비밀번호 해싱 후 저장)과 로그인(비밀번호 검증 후 토큰 발급)을 담당합니다.

use std::sync::Arc;

use catalog_core::{AuthToken, CatalogError, CatalogResult, LoginRequest, RegisterRequest, User};
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::auth::{hash_password, verify_password, verify_unknown_user, TokenIssuer};
use crate::metrics::{record_login, record_registration};
use crate::repository::{RepositoryError, UserRepository};

pub const EMAIL_TAKEN_MESSAGE: &str = "User with this email already exists";
pub const USERNAME_TAKEN_MESSAGE: &str = "User with this username already exists";
/// 이메일/비밀번호 중 어느 쪽이 틀렸는지 노출하지 않는 공통 메시지
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email/password";
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// 인증 서비스.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenIssuer) -> Self {
        Self { users, tokens }
    }

    /// 토큰 발급기.
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// 회원가입.
    ///
    /// 같은 이메일의 사용자가 있으면 Conflict. 비밀번호는 저장 전에 해싱됩니다.
    pub async fn register(&self, request: RegisterRequest) -> CatalogResult<AuthToken> {
        request.validate()?;

        if self.users.find_by_email(&request.email).await?.is_some() {
            warn!(email = %request.email, "Registration rejected: email already registered");
            record_registration("conflict");
            return Err(CatalogError::Conflict(EMAIL_TAKEN_MESSAGE.to_string()));
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| CatalogError::Internal(e.to_string()))?;
        let user = User::new(request.username, request.email, password_hash);

        // 동시 가입 또는 사용자명 중복은 저장 시점의 유니크 제약으로 감지
        self.users.save(&user).await.map_err(|e| match e {
            RepositoryError::Duplicate(constraint) => {
                record_registration("conflict");
                if constraint.contains("username") {
                    CatalogError::Conflict(USERNAME_TAKEN_MESSAGE.to_string())
                } else {
                    CatalogError::Conflict(EMAIL_TAKEN_MESSAGE.to_string())
                }
            }
            other => other.into(),
        })?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        record_registration("success");

        self.issue(&user)
    }

    /// 로그인.
    ///
    /// 사용자가 없거나 비밀번호가 틀리면 같은 Unauthorized 메시지를 반환합니다.
    /// 사용자가 없어도 더미 해시로 검증을 수행해 응답 시간을 맞춥니다.
    pub async fn login(&self, request: LoginRequest) -> CatalogResult<AuthToken> {
        request.validate()?;

        let Some(user) = self.users.find_by_email(&request.email).await? else {
            let _ = verify_unknown_user(&request.password);
            debug!(email = %request.email, "Login failed: unknown email");
            record_login("failure");
            return Err(invalid_credentials());
        };

        if verify_password(&request.password, &user.password_hash).is_err() {
            debug!(user_id = %user.id, "Login failed: password mismatch");
            record_login("failure");
            return Err(invalid_credentials());
        }

        info!(user_id = %user.id, "User logged in");
        record_login("success");

        self.issue(&user)
    }

    /// 토큰에 담긴 ID로 사용자를 조회합니다.
    pub async fn resolve_user(&self, id: Uuid) -> CatalogResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(USER_NOT_FOUND_MESSAGE.to_string()))
    }

    fn issue(&self, user: &User) -> CatalogResult<AuthToken> {
        let token = self
            .tokens
            .issue(user)
            .map_err(|e| CatalogError::Internal(e.to_string()))?;
        Ok(AuthToken { token })
    }
}

fn invalid_credentials() -> CatalogError {
    CatalogError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
}
