//! JWT 토큰 처리.
//!
//! 세션 토큰은 서버에 저장되지 않으며, `{userId, email}`을 담아 서명한 뒤
//! 매 요청마다 서명과 만료 시간을 검증합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_core::User;

/// 기본 토큰 만료 시간 (분)
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// JWT 페이로드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// 사용자 ID
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    /// 사용자 이메일
    pub email: String,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// JWT ID - 토큰 고유 식별자
    pub jti: String,
}

impl Claims {
    /// 사용자에 대한 새 Claims 생성.
    pub fn for_user(user: &User, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            user_id: user.id,
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// JWT 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
}

/// 토큰 발급기.
///
/// 서명 키와 만료 시간을 보관하며 HS256으로 서명/검증합니다.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// 새 발급기 생성.
    ///
    /// # Arguments
    ///
    /// * `secret` - 서명 비밀 키
    /// * `ttl_minutes` - 토큰 만료 시간 (분)
    pub fn new(secret: &SecretString, ttl_minutes: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// 사용자에 대한 서명된 토큰 발급.
    pub fn issue(&self, user: &User) -> Result<String, JwtError> {
        let claims = Claims::for_user(user, self.ttl);
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// 토큰 서명과 만료 시간 검증.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl_minutes", &self.ttl.num_minutes())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

    fn issuer(ttl_minutes: i64) -> TokenIssuer {
        TokenIssuer::new(&SecretString::from(TEST_SECRET.to_string()), ttl_minutes)
    }

    fn user() -> User {
        User::new("alice", "alice@example.com", "$argon2id$...")
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = issuer(DEFAULT_TOKEN_TTL_MINUTES);
        let user = user();

        let token = issuer.issue(&user).unwrap();
        let claims = issuer.verify(&token).unwrap();

        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_payload_uses_user_id_key() {
        let claims = Claims::for_user(&user(), Duration::minutes(60));
        let json = serde_json::to_value(&claims).unwrap();

        assert!(json.get("userId").is_some());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = issuer(-5).issue(&user()).unwrap();

        assert!(matches!(
            issuer(DEFAULT_TOKEN_TTL_MINUTES).verify(&token),
            Err(JwtError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issuer(60).issue(&user()).unwrap();
        let other = TokenIssuer::new(&SecretString::from("another-secret".to_string()), 60);

        assert!(matches!(other.verify(&token), Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            issuer(60).verify("not.a.token"),
            Err(JwtError::InvalidToken)
        ));
    }
}
