//! 인증.
//!
//! 비밀번호 해싱, JWT 발급/검증, 보호된 라우트용 추출기를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`TokenIssuer`]: 서명 키와 만료 시간을 보관하는 토큰 발급기
//! - [`Claims`]: JWT 페이로드 (`userId`, `email`)
//! - [`CurrentUser`]: Bearer 토큰을 검증하고 사용자를 조회하는 추출기
//! - [`hash_password`] / [`verify_password`]: Argon2 해싱

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtError, TokenIssuer, DEFAULT_TOKEN_TTL_MINUTES};
pub use middleware::{AuthError, CurrentUser, OptionalUser};
pub use password::{hash_password, verify_password, verify_unknown_user, PasswordError};
