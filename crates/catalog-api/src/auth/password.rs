//! 비밀번호 해싱 유틸리티.
//!
//! Argon2 기반 비밀번호 해싱 및 검증. 저장소에는 PHC 해시 문자열만 기록됩니다.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
    #[error("비밀번호 검증 실패")]
    VerificationFailed,
    #[error("잘못된 해시 형식")]
    InvalidHashFormat,
}

/// 비밀번호 해싱.
///
/// Argon2id 알고리즘을 사용하며 솔트는 매번 새로 생성됩니다.
/// 같은 비밀번호라도 호출마다 다른 해시가 나옵니다.
///
/// # Returns
///
/// PHC 형식의 해시 문자열 (솔트 포함)
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 비밀번호가 일치하면 Ok(()), 불일치하거나 해시가 손상되었으면 Err.
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// 존재하지 않는 사용자에 대한 검증.
///
/// 고정된 더미 해시와 비교해 실제 사용자와 같은 Argon2 비용을 치르므로,
/// 응답 시간으로 가입 여부를 알 수 없습니다. 항상 Err를 반환합니다.
pub fn verify_unknown_user(password: &str) -> Result<(), PasswordError> {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

    let hash = DUMMY_HASH
        .get_or_init(|| hash_password("unknown-user-placeholder").ok())
        .as_deref()
        .ok_or(PasswordError::HashingFailed)?;

    verify_password(password, hash).and(Err(PasswordError::VerificationFailed))
}
