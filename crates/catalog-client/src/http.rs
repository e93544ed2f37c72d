//! 요청/응답 공통 처리.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// 서버 에러 응답 중 화면에 표시할 부분.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// 기본 URL과 경로를 합칩니다.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// 토큰이 있으면 Bearer 헤더를 붙입니다.
pub(crate) fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// 실패 응답을 `ClientError::Api`로 변환합니다.
///
/// 본문에 `message`가 없으면 HTTP 상태 설명을 사용합니다.
async fn into_api_error(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    debug!(status = status.as_u16(), %message, "API request failed");
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

/// 성공 응답 본문을 JSON으로 해석합니다.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    if !response.status().is_success() {
        return Err(into_api_error(response).await);
    }
    Ok(response.json::<T>().await?)
}

/// 본문 없이 성공 여부만 확인합니다.
pub(crate) async fn expect_success(response: Response) -> ClientResult<()> {
    if !response.status().is_success() {
        return Err(into_api_error(response).await);
    }
    Ok(())
}
