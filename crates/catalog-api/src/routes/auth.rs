//! 인증 API 라우트
//!
//! # 엔드포인트
//!
//! - `POST /auth/register` - 회원가입 후 토큰 발급
//! - `POST /auth/login` - 로그인 후 토큰 발급

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use catalog_core::{AuthToken, LoginRequest, RegisterRequest};
use std::sync::Arc;

use super::invalid_body;
use crate::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// POST /auth/register - 회원가입
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "가입 완료, 토큰 발급", body = AuthToken),
        (status = 400, description = "입력 검증 실패", body = ApiErrorResponse),
        (status = 409, description = "이미 가입된 이메일", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<AuthToken>)> {
    let Json(request) = payload.map_err(invalid_body)?;
    let token = state.auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

/// POST /auth/login - 로그인
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공, 토큰 발급", body = AuthToken),
        (status = 400, description = "입력 검증 실패", body = ApiErrorResponse),
        (status = 401, description = "이메일 또는 비밀번호 불일치", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthToken>> {
    let Json(request) = payload.map_err(invalid_body)?;
    let token = state.auth.login(request).await?;
    Ok(Json(token))
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
