//! 요청 단위 HTTP 메트릭 수집.
//!
//! 라벨은 실제 URI가 아닌 매칭된 라우트 템플릿을 사용하므로
//! 상품 ID마다 시계열이 새로 생기지 않습니다.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

use crate::metrics::{record_http_completion, record_http_request};

/// 어떤 라우트에도 매칭되지 않은 요청의 경로 라벨
pub const UNMATCHED_ROUTE: &str = "unmatched";

fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned())
}

/// 요청 수, 응답 상태, 처리 시간을 라우트별로 기록합니다.
///
/// `Router::layer`로 등록해야 `MatchedPath`가 채워집니다.
pub async fn track_request_metrics(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().as_str().to_owned();
    let route = route_label(&request);

    record_http_request(&method, &route);
    let response = next.run(request).await;
    record_http_completion(
        &method,
        &route,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    async fn product_handler() -> &'static str {
        "OK"
    }

    fn app() -> Router {
        Router::new()
            .route("/products/{id}", get(product_handler))
            .layer(middleware::from_fn(track_request_metrics))
    }

    async fn get_status(app: &Router, uri: &str) -> StatusCode {
        let request = axum::http::Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        app.clone().oneshot(request).await.unwrap().status()
    }

    /// 레코더를 현재 스레드에만 설치하고 요청들을 실행한 뒤 렌더링 결과를 돌려줍니다.
    fn render_after(uris: &[&str]) -> (Vec<StatusCode>, String) {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        let statuses = metrics::with_local_recorder(&recorder, || {
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap()
                .block_on(async {
                    let app = app();
                    let mut statuses = Vec::new();
                    for uri in uris {
                        statuses.push(get_status(&app, uri).await);
                    }
                    statuses
                })
        });

        (statuses, handle.render())
    }

    #[test]
    fn test_route_template_used_as_label() {
        let (statuses, rendered) = render_after(&[
            "/products/123e4567-e89b-12d3-a456-426614174000",
            "/products/not-a-uuid-1",
            "/products/not-a-uuid-2",
        ]);

        assert!(statuses.iter().all(|s| *s == StatusCode::OK));
        assert!(rendered.contains(r#"path="/products/{id}""#));
        assert!(!rendered.contains("not-a-uuid"));
        assert!(!rendered.contains("123e4567"));
    }

    #[test]
    fn test_unmatched_paths_share_one_label() {
        let (statuses, rendered) = render_after(&["/random/abc", "/random/def"]);

        assert_eq!(statuses, vec![StatusCode::NOT_FOUND, StatusCode::NOT_FOUND]);
        assert!(rendered.contains(r#"path="unmatched""#));
        assert!(!rendered.contains("/random"));
    }
}
