//! CLI 명령어 구현 모듈.

pub mod auth;
pub mod products;

use catalog_client::ClientError;

/// 클라이언트 에러를 서버 메시지 그대로의 anyhow 에러로 변환합니다.
pub fn client_error(err: ClientError) -> anyhow::Error {
    anyhow::anyhow!(err.message())
}
