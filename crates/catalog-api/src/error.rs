//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//! 서비스 계층의 [`CatalogError`]는 여기서 HTTP 상태 코드로 변환됩니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_core::{CatalogError, FieldErrors};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "VALIDATION_ERROR", "CONFLICT", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (검증 실패 시 필드별 메시지)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

// ==================== ApiError ====================

/// HTTP 상태 코드와 응답 본문을 함께 갖는 핸들러 에러.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ApiErrorResponse::new(code, message),
        }
    }

    /// 400 VALIDATION_ERROR (필드별 메시지를 details에 포함).
    pub fn validation(fields: &FieldErrors) -> Self {
        let details = serde_json::to_value(fields).unwrap_or(Value::Null);
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorResponse::with_details("VALIDATION_ERROR", fields.summary(), details),
        }
    }

    /// 400 INVALID_BODY (JSON 파싱 실패, 알 수 없는 필드 등).
    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_BODY", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(fields) => Self::validation(&fields),
            CatalogError::Conflict(message) => Self::new(StatusCode::CONFLICT, "CONFLICT", message),
            CatalogError::Unauthorized(message) => {
                Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
            }
            CatalogError::NotFound(message) => Self::not_found(message),
            // 내부 에러의 상세 내용은 로그에만 남기고 응답에는 포함하지 않음
            CatalogError::Storage(detail) | CatalogError::Internal(detail) => {
                error!(error = %detail, "Request failed with internal error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error",
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

// ==================== Result Type Alias ====================

/// API 핸들러 Result 타입 별칭.
///
/// # Example
///
/// ```ignore
/// async fn get_product(
///     State(state): State<Arc<AppState>>,
///     Path(id): Path<Uuid>,
/// ) -> ApiResult<Json<Product>> {
///     Ok(Json(state.products.get(id).await?))
/// }
/// ```
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_response_new() {
        let error = ApiErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.code, "TEST_ERROR");
        assert_eq!(error.message, "Test message");
        assert!(error.timestamp.is_some());
        assert!(error.details.is_none());
    }

    #[test]
    fn test_json_serialization_skips_empty_details() {
        let error = ApiErrorResponse::new("NOT_FOUND", "Product not found");
        let json = serde_json::to_string(&error).unwrap();

        assert!(!json.contains("details"));
        assert!(json.contains(r#""code":"NOT_FOUND""#));
        assert!(json.contains(r#""message":"Product not found""#));
    }

    #[test]
    fn test_catalog_error_status_mapping() {
        let cases = vec![
            (
                CatalogError::invalid_field("price", "Price must be greater than 0"),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                CatalogError::Conflict("User with this email already exists".into()),
                StatusCode::CONFLICT,
                "CONFLICT",
            ),
            (
                CatalogError::Unauthorized("Invalid email/password".into()),
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
            ),
            (
                CatalogError::NotFound("Product not found".into()),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                CatalogError::Storage("connection refused".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];

        for (err, status, code) in cases {
            let api_error = ApiError::from(err);
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.body.code, code);
        }
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let api_error = ApiError::from(CatalogError::Storage("password=hunter2".into()));
        assert!(!api_error.body.message.contains("hunter2"));
    }

    #[test]
    fn test_validation_details() {
        let api_error = ApiError::from(CatalogError::invalid_field(
            "name",
            "Name must be between 3 and 50 characters long",
        ));
        let details = api_error.body.details.unwrap();
        assert_eq!(
            details["name"][0],
            "Name must be between 3 and 50 characters long"
        );
    }
}
