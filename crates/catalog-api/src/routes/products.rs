//! 상품 API 라우트
//!
//! # 엔드포인트
//!
//! - `GET /products` - 전체 상품 조회
//! - `GET /products/{id}` - 상품 상세 조회
//! - `POST /products` - 상품 생성 (인증 필요)
//! - `PATCH /products/{id}` - 상품 부분 수정
//! - `DELETE /products/{id}` - 상품 삭제 (인증 필요)

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use catalog_core::{NewProduct, Product, ProductPatch};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::invalid_body;
use crate::auth::{CurrentUser, OptionalUser};
use crate::error::{ApiError, ApiErrorResponse, ApiResult};
use crate::services::products::PRODUCT_NOT_FOUND_MESSAGE;
use crate::state::AppState;

/// UUID로 해석되지 않는 ID는 존재하지 않는 상품으로 취급합니다.
fn product_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::not_found(PRODUCT_NOT_FOUND_MESSAGE))
}

/// GET /products - 전체 상품 조회
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "상품 목록", body = Vec<Product>)
    ),
    tag = "products"
)]
pub async fn list_products(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.products.list().await?))
}

/// GET /products/{id} - 상품 상세 조회
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = Uuid, Path, description = "상품 ID")),
    responses(
        (status = 200, description = "상품 상세", body = Product),
        (status = 404, description = "상품 없음", body = ApiErrorResponse)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let id = product_id(path)?;
    Ok(Json(state.products.get(id).await?))
}

/// POST /products - 상품 생성
#[utoipa::path(
    post,
    path = "/products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "상품 생성", body = Product),
        (status = 400, description = "입력 검증 실패", body = ApiErrorResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn create_product(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(input) = payload.map_err(invalid_body)?;
    debug!(user_id = %user.id, "Creating product");

    let product = state.products.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PATCH /products/{id} - 상품 부분 수정
///
/// 인증 없이 호출할 수 있습니다. 토큰이 있으면 로그에 사용자 ID를 남깁니다.
#[utoipa::path(
    patch,
    path = "/products/{id}",
    params(("id" = Uuid, Path, description = "상품 ID")),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "수정된 상품", body = Product),
        (status = 400, description = "입력 검증 실패", body = ApiErrorResponse),
        (status = 404, description = "상품 없음", body = ApiErrorResponse)
    ),
    tag = "products"
)]
pub async fn update_product(
    OptionalUser(user): OptionalUser,
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let id = product_id(path)?;
    let Json(patch) = payload.map_err(invalid_body)?;
    debug!(product_id = %id, user_id = ?user.map(|u| u.id), "Updating product");

    Ok(Json(state.products.update(id, patch).await?))
}

/// DELETE /products/{id} - 상품 삭제
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = Uuid, Path, description = "상품 ID")),
    responses(
        (status = 204, description = "삭제 완료"),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 404, description = "상품 없음", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn delete_product(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = product_id(path)?;
    debug!(product_id = %id, user_id = %user.id, "Deleting product");

    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 상품 라우터 생성.
pub fn products_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .patch(update_product)
                .delete(delete_product),
        )
}
