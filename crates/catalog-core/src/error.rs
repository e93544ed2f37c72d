//! 카탈로그 시스템의 에러 타입.
//!
//! 서비스 계층에서 발생하는 에러를 정의합니다. HTTP 상태 코드로의 변환은
//! API 크레이트가 담당합니다.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidationErrors;

/// 필드별 검증 에러 메시지.
///
/// 필드 이름 순으로 정렬되어 직렬화 결과가 항상 같습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// 빈 에러 맵 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드에 메시지를 추가합니다.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// 특정 필드의 메시지 목록.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// 에러가 있는 필드인지 확인합니다.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 모든 메시지를 하나의 문장으로 합칩니다.
    pub fn summary(&self) -> String {
        self.0
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errors) in errors.field_errors() {
            for error in errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: 유효하지 않은 값", field));
                fields.add(field.to_string(), message);
            }
        }
        fields
    }
}

/// 카탈로그 서비스 에러.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 입력 검증 실패 (필드별 메시지 포함)
    #[error("{0}")]
    Validation(FieldErrors),

    /// 중복 등록
    #[error("{0}")]
    Conflict(String),

    /// 인증 실패
    #[error("{0}")]
    Unauthorized(String),

    /// 대상 없음
    #[error("{0}")]
    NotFound(String),

    /// 저장소 에러
    #[error("저장소 에러: {0}")]
    Storage(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 카탈로그 작업을 위한 Result 타입.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// 단일 필드 검증 에러를 생성합니다.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.add(field, message);
        CatalogError::Validation(fields)
    }

    /// 클라이언트 입력으로 인한 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, CatalogError::Storage(_) | CatalogError::Internal(_))
    }
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        CatalogError::Validation(errors.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_summary() {
        let mut errors = FieldErrors::new();
        errors.add("price", "Price must be greater than 0");
        errors.add("name", "Name must be between 3 and 50 characters long");

        // 필드 이름 순으로 정렬
        assert_eq!(
            errors.summary(),
            "Name must be between 3 and 50 characters long; Price must be greater than 0"
        );
        assert!(errors.contains("name"));
        assert!(!errors.contains("description"));
    }

    #[test]
    fn test_field_errors_serialize_as_map() {
        let mut errors = FieldErrors::new();
        errors.add("email", "Invalid email format");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"email": ["Invalid email format"]}));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(CatalogError::NotFound("Product not found".into()).is_client_error());
        assert!(CatalogError::Conflict("dup".into()).is_client_error());
        assert!(!CatalogError::Storage("down".into()).is_client_error());
    }

    #[test]
    fn test_invalid_field() {
        let err = CatalogError::invalid_field("price", "Price must be greater than 0");
        match err {
            CatalogError::Validation(fields) => {
                assert_eq!(
                    fields.get("price"),
                    Some(&["Price must be greater than 0".to_string()][..])
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
