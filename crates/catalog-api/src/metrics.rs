//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭, 비즈니스 메트릭을 수집하고 `/metrics` 엔드포인트로 노출합니다.
//! 레코더가 설치되지 않은 상태(테스트 등)에서는 기록이 무시됩니다.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Prometheus 메트릭 레코더를 설정하고 핸들을 반환합니다.
///
/// 레코더는 프로세스당 한 번만 설치할 수 있습니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        // HTTP 요청 지속 시간 히스토그램 버킷 설정
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .install_recorder()
}

// ============================================================================
// HTTP 메트릭 헬퍼 함수
// ============================================================================

/// 요청 수신 카운터 증가. `route`는 라우트 템플릿(예: `/products/{id}`)입니다.
pub fn record_http_request(method: &str, route: &str) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => route.to_string())
        .increment(1);
}

/// 응답 상태 카운터와 처리 시간 히스토그램 기록.
pub fn record_http_completion(method: &str, route: &str, status: u16, duration_secs: f64) {
    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "path" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => route.to_string()
    )
    .record(duration_secs);
}

// ============================================================================
// 비즈니스 메트릭 헬퍼 함수
// ============================================================================

/// 회원가입 시도 카운터 (outcome: success, conflict).
pub fn record_registration(outcome: &str) {
    counter!("catalog_registrations_total", "outcome" => outcome.to_string()).increment(1);
}

/// 로그인 시도 카운터 (outcome: success, failure).
pub fn record_login(outcome: &str) {
    counter!("catalog_logins_total", "outcome" => outcome.to_string()).increment(1);
}

/// 상품 변경 카운터 (action: create, update, delete).
pub fn record_product_change(action: &str) {
    counter!("catalog_product_changes_total", "action" => action.to_string()).increment(1);
}
