//! Axum용 JWT 인증 추출기.
//!
//! 보호된 라우트의 핸들러 인자로 [`CurrentUser`]를 선언하면, 요청이 핸들러에
//! 도달하기 전에 Bearer 토큰 검증과 사용자 조회가 수행됩니다.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use catalog_core::{CatalogError, User};
use tracing::{debug, error};

use super::jwt::JwtError;
use crate::error::ApiErrorResponse;
use crate::state::AppState;

/// 인증된 사용자 추출기.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(user): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Authenticated user: {}", user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// 인증 에러.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Please Login First")]
    MissingToken,
    #[error("Invalid authorization header")]
    InvalidAuthHeader,
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid token")]
    InvalidToken,
    #[error("User not found")]
    UserNotFound,
    #[error("사용자 조회 실패: {0}")]
    Lookup(String),
}

impl AuthError {
    /// 응답 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::InvalidAuthHeader => "INVALID_AUTH_HEADER",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::Lookup(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::Lookup(detail) => {
                error!(error = %detail, "User lookup failed during authentication");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            other => (StatusCode::UNAUTHORIZED, other.to_string()),
        };

        (status, Json(ApiErrorResponse::new(self.code(), message))).into_response()
    }
}

/// Authorization 헤더에서 Bearer 토큰을 꺼냅니다.
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    match header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("Bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(AuthError::InvalidAuthHeader),
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = state.auth.tokens().verify(token).map_err(|e| {
            debug!(error = %e, "Token verification failed");
            AuthError::from(e)
        })?;

        // 토큰 발급 이후 삭제된 사용자는 거부
        let user = state
            .auth
            .resolve_user(claims.user_id)
            .await
            .map_err(|e| match e {
                CatalogError::NotFound(_) => AuthError::UserNotFound,
                other => AuthError::Lookup(other.to_string()),
            })?;

        Ok(CurrentUser(user))
    }
}

/// 선택적 인증 추출기.
///
/// 토큰이 유효하면 사용자를, 없거나 유효하지 않으면 None을 담습니다. 요청을 거부하지 않습니다.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<User>);

impl FromRequestParts<Arc<AppState>> for OptionalUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match CurrentUser::from_request_parts(parts, state).await {
            Ok(CurrentUser(user)) => Ok(OptionalUser(Some(user))),
            Err(_) => Ok(OptionalUser(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/products");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsing() {
        let parts = parts_with_header(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");

        let parts = parts_with_header(Some("bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc.def.ghi");

        let parts = parts_with_header(None);
        assert!(matches!(bearer_token(&parts), Err(AuthError::MissingToken)));

        let parts = parts_with_header(Some("Basic dXNlcjpwYXNz"));
        assert!(matches!(
            bearer_token(&parts),
            Err(AuthError::InvalidAuthHeader)
        ));

        let parts = parts_with_header(Some("Bearer "));
        assert!(matches!(
            bearer_token(&parts),
            Err(AuthError::InvalidAuthHeader)
        ));
    }

    #[test]
    fn test_auth_error_responses() {
        let errors = vec![
            AuthError::MissingToken,
            AuthError::InvalidAuthHeader,
            AuthError::TokenExpired,
            AuthError::InvalidToken,
            AuthError::UserNotFound,
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        let response = AuthError::Lookup("pool timed out".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_token_message() {
        assert_eq!(AuthError::MissingToken.to_string(), "Please Login First");
        assert_eq!(AuthError::MissingToken.code(), "MISSING_TOKEN");
    }
}
