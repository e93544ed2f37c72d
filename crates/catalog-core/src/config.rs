//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 기본값 → 설정 파일(선택) → `CATALOG__` 접두사 환경 변수 순으로 덮어씁니다.

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

/// 개발용 기본 JWT 비밀 키. 운영 환경에서는 반드시 교체해야 합니다.
pub const DEFAULT_JWT_SECRET: &str = "development-secret-key-change-in-production";

/// 애플리케이션 설정.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// 인증 설정
    #[serde(default)]
    pub auth: AuthConfig,
    /// CORS 설정
    #[serde(default)]
    pub cors: CorsConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 연결 URL. 없으면 인메모리 저장소를 사용합니다.
    #[serde(default)]
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub acquire_timeout_secs: u64,
    /// 시작 시 마이그레이션 실행 여부
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_run_migrations() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 10,
            run_migrations: default_run_migrations(),
        }
    }
}

/// 인증 설정.
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// JWT 서명 비밀 키
    pub jwt_secret: SecretString,
    /// 토큰 만료 시간 (분)
    pub token_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::from(DEFAULT_JWT_SECRET.to_string()),
            token_ttl_minutes: 60,
        }
    }
}

/// CORS 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// 허용 origin 목록
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3001".to_string()],
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "catalog_api=info,tower_http=debug".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// `DATABASE_URL`, `JWT_SECRET`, `API_HOST`, `API_PORT`, `CORS_ORIGINS`는
    /// 접두사 없이도 인식합니다.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, config::ConfigError> {
        let defaults = ServerConfig::default();
        let mut builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", defaults.host)?
            .set_default("server.port", i64::from(defaults.port))?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_secs", 10)?
            .set_default("auth.jwt_secret", DEFAULT_JWT_SECRET)?
            .set_default("auth.token_ttl_minutes", 60)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3001"])?
            .set_default("logging.level", LoggingConfig::default().level)?
            .set_default("logging.format", "pretty")?;

        // 파일에서 로드
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_ref()).required(false));
        }

        // 환경 변수로 오버라이드
        builder = builder.add_source(
            config::Environment::with_prefix("CATALOG")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .try_parsing(true),
        );

        // 관례적인 환경 변수 이름
        builder = builder
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("auth.jwt_secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("server.host", std::env::var("API_HOST").ok())?
            .set_override_option("server.port", std::env::var("API_PORT").ok())?;

        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            builder = builder.set_override("cors.allowed_origins", origins)?;
        }

        builder.build()?.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load(Some("config/default.toml"))
    }

    /// 개발용 기본 비밀 키를 사용 중인지 확인합니다.
    pub fn uses_default_secret(&self) -> bool {
        use secrecy::ExposeSecret;
        self.auth.jwt_secret.expose_secret() == DEFAULT_JWT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
        };

        assert_eq!(config.server.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.auth.token_ttl_minutes, 60);
        assert!(config.database.url.is_none());
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3001"]);
        assert!(config.uses_default_secret());
    }

    #[test]
    fn test_load_without_file() {
        let config = AppConfig::load(None::<&str>).unwrap();
        assert!(config.auth.token_ttl_minutes > 0);
        assert!(!config.cors.allowed_origins.is_empty());
    }
}
