//! 클라이언트 에러 타입.

use catalog_core::FieldErrors;
use thiserror::Error;
use validator::ValidationErrors;

/// 클라이언트 작업 에러.
#[derive(Debug, Error)]
pub enum ClientError {
    /// 서버가 실패 상태 코드를 반환함
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    /// 네트워크/디코딩 에러
    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    /// 요청 전 폼 검증 실패
    #[error("{0}")]
    Validation(FieldErrors),

    /// 세션 쿠키 저장소 에러
    #[error("세션 저장소 에러: {0}")]
    Session(String),
}

/// 클라이언트 작업 Result 타입.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// 화면에 그대로 표시할 메시지.
    pub fn message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Http(e) => e.to_string(),
            ClientError::Validation(fields) => fields.summary(),
            ClientError::Session(msg) => msg.clone(),
        }
    }

    /// 서버 응답 상태 코드 (API 에러인 경우).
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        ClientError::Validation(errors.into())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Session(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = ClientError::Api {
            status: 409,
            message: "User with this email already exists".to_string(),
        };
        assert_eq!(err.message(), "User with this email already exists");
        assert_eq!(err.status(), Some(409));
        assert!(!err.is_unauthorized());
        assert_eq!(
            err.to_string(),
            "User with this email already exists (HTTP 409)"
        );
    }

    #[test]
    fn test_validation_message_joins_fields() {
        let mut fields = FieldErrors::new();
        fields.add("name", "Name is required");
        fields.add("price", "Price must be a number");

        let err = ClientError::Validation(fields);
        assert_eq!(err.message(), "Name is required; Price must be a number");
        assert_eq!(err.status(), None);
    }
}
