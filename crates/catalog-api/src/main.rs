//! 상품 카탈로그 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 회원가입/로그인, 상품 CRUD, 헬스 체크, 메트릭 엔드포인트를 제공합니다.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use catalog_api::auth::TokenIssuer;
use catalog_api::metrics::setup_metrics_recorder;
use catalog_api::middleware::track_request_metrics;
use catalog_api::openapi::swagger_ui_router;
use catalog_api::routes::create_api_router;
use catalog_api::state::AppState;
use catalog_core::{init_logging, AppConfig, CorsConfig, DatabaseConfig, LogConfig};

/// 설정 파일 기본 경로
const CONFIG_PATH: &str = "config/default.toml";

/// 저장소 연결 및 AppState 생성.
///
/// 데이터베이스 URL이 없으면 인메모리 저장소로 실행합니다.
async fn create_app_state(
    database: &DatabaseConfig,
    tokens: TokenIssuer,
) -> anyhow::Result<AppState> {
    let Some(database_url) = database.url.as_deref() else {
        warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
        return Ok(AppState::in_memory(tokens));
    };

    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(Duration::from_secs(database.acquire_timeout_secs))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to PostgreSQL successfully");

    if database.run_migrations {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        info!("Migrations completed successfully");
    }

    Ok(AppState::with_postgres(pool, tokens))
}

/// CORS 레이어 생성.
///
/// 설정된 origin만 허용하며 자격 증명(쿠키 등)을 포함한 요청을 허용합니다.
/// 유효한 origin이 하나도 없으면 모든 origin을 허용하되 자격 증명은 허용하지 않습니다.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    let layer = CorsLayer::new()
        // 허용되는 HTTP 메서드
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // 허용되는 헤더
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        // preflight 요청 캐시 시간
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        warn!("No valid CORS origins configured, allowing any origin without credentials");
        layer.allow_origin(AllowOrigin::any())
    } else {
        info!(origins = ?config.allowed_origins, "CORS configured");
        layer
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
    }
}

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(
    axum::extract::State(handle): axum::extract::State<PrometheusHandle>,
) -> String {
    handle.render()
}

/// 전체 라우터 생성.
fn create_router(
    state: Arc<AppState>,
    metrics_handle: PrometheusHandle,
    config: &AppConfig,
) -> Router {
    // 메트릭 라우터 (별도 상태)
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .merge(metrics_router)
        .merge(create_api_router().with_state(state))
        // OpenAPI 문서 및 Swagger UI
        .merge(swagger_ui_router())
        // 메트릭 미들웨어 (모든 요청에 적용)
        .layer(middleware::from_fn(track_request_metrics))
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_secs),
        ))
        .layer(cors_layer(&config.cors))
}

/// OpenAPI 스펙 내보내기 처리.
///
/// `--export-openapi` 플래그 또는 `EXPORT_OPENAPI` 환경변수가 설정된 경우
/// OpenAPI JSON 스펙을 stdout으로 출력하고 true를 반환합니다.
fn handle_export_openapi() -> anyhow::Result<bool> {
    use catalog_api::openapi::ApiDoc;
    use utoipa::OpenApi as _;

    let export_flag = std::env::args().any(|arg| arg == "--export-openapi");
    let export_env = std::env::var("EXPORT_OPENAPI")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if export_flag || export_env {
        let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
        println!("{}", json);
        return Ok(true);
    }

    Ok(false)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // OpenAPI 내보내기 처리 (서버 시작 전)
    if handle_export_openapi()? {
        return Ok(());
    }

    // 설정 로드
    let config = AppConfig::load(Some(CONFIG_PATH)).context("Failed to load configuration")?;

    // tracing 초기화
    init_logging(LogConfig::from_settings(&config.logging))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting Product Catalog API server...");

    if config.uses_default_secret() {
        warn!("JWT_SECRET not set, using default (INSECURE for development only)");
    }

    // Prometheus 메트릭 레코더 설정
    let metrics_handle = setup_metrics_recorder().context("Failed to install metrics recorder")?;
    info!("Prometheus metrics recorder initialized");

    let tokens = TokenIssuer::new(&config.auth.jwt_secret, config.auth.token_ttl_minutes);
    let state = Arc::new(create_app_state(&config.database, tokens).await?);

    info!(
        version = %state.version,
        storage = state.storage.as_str(),
        token_ttl_minutes = config.auth.token_ttl_minutes,
        "Application state initialized"
    );

    let app = create_router(state, metrics_handle, &config);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("OpenAPI spec at http://{}/api-docs/openapi.json", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
