//! 사용자 도메인 모델.
//!
//! 자격증명 저장소의 사용자 레코드와 회원가입/로그인 요청 타입을 정의합니다.
//! 비밀번호는 해시 형태로만 보관되며, 해싱은 API 크레이트의 등록 흐름에서 수행됩니다.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// 비밀번호에 최소 1개 포함되어야 하는 특수문자
pub const PASSWORD_SPECIAL_CHARS: &str = "@$!%*?&";

pub const PASSWORD_POLICY_MESSAGE: &str = "Password must be 8-12 characters long and include uppercase, lowercase, number, and special character.";

/// 비밀번호 강도 검증.
///
/// # 요구사항
///
/// - 8자 이상 12자 이하
/// - 최소 1개의 소문자, 대문자, 숫자 포함
/// - 최소 1개의 특수문자 (`@$!%*?&` 중 하나) 포함
///
/// 그 외 문자는 길이에만 포함되며 제한하지 않습니다.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let length = password.chars().count();
    let valid = (8..=12).contains(&length)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("weak_password").with_message(PASSWORD_POLICY_MESSAGE.into()))
    }
}

/// 자격증명 저장소의 사용자 레코드.
///
/// `password_hash`는 직렬화되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    /// 새 사용자 생성. 호출자는 이미 해싱된 비밀번호를 넘겨야 합니다.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// 공개용 프로필.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// 해시를 제외한 사용자 정보.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

/// 회원가입 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

/// 로그인 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// 회원가입/로그인 응답.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct AuthToken {
    /// 서명된 Bearer 토큰
    pub token: String,
}
