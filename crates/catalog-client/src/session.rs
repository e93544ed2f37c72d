//! 세션 쿠키 저장소.
//!
//! 로그인/회원가입으로 받은 토큰을 1일 만료의 "쿠키"로 보관합니다.
//! 만료 시간은 서버 토큰 만료(1시간)와 독립적이므로, 쿠키가 살아 있어도
//! 서버가 토큰을 거부할 수 있습니다.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// 세션 쿠키 유효 시간 (초, 1일)
pub const SESSION_COOKIE_TTL_SECS: i64 = 24 * 60 * 60;

/// 저장된 토큰과 쿠키 만료 시각.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// 지금부터 1일 후 만료되는 세션을 생성합니다.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_expiry(token, Utc::now() + Duration::seconds(SESSION_COOKIE_TTL_SECS))
    }

    pub fn with_expiry(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// 세션 저장소 trait.
///
/// 만료된 세션은 `load`에서 없는 것으로 취급됩니다.
pub trait SessionStore: Send + Sync {
    /// 유효한 세션 조회
    fn load(&self) -> ClientResult<Option<Session>>;

    /// 세션 저장 (기존 세션 덮어쓰기)
    fn save(&self, session: &Session) -> ClientResult<()>;

    /// 세션 삭제
    fn clear(&self) -> ClientResult<()>;

    /// 유효한 토큰 조회
    fn token(&self) -> ClientResult<Option<String>> {
        Ok(self.load()?.map(|s| s.token))
    }
}

// ==================== 인메모리 ====================

/// 프로세스 메모리에만 보관하는 세션 저장소.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> ClientError {
    ClientError::Session("session lock poisoned".to_string())
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Option<Session>> {
        let guard = self.session.lock().map_err(poisoned)?;
        Ok(guard.as_ref().filter(|s| !s.is_expired()).cloned())
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        *self.session.lock().map_err(poisoned)? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        *self.session.lock().map_err(poisoned)? = None;
        Ok(())
    }
}

// ==================== 파일 ====================

/// JSON 파일에 보관하는 세션 저장소 (CLI용 쿠키 파일).
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// 소유자만 읽고 쓸 수 있도록(0600) 파일을 씁니다. 기존 파일의 권한도 좁힙니다.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ClientResult<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session: Session = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable session file");
                return Ok(None);
            }
        };

        if session.is_expired() {
            debug!(path = %self.path.display(), "Session cookie expired");
            return Ok(None);
        }
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| ClientError::Session(e.to_string()))?;
        write_private(&self.path, json.as_bytes())?;
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_expires_in_one_day() {
        let session = Session::new("token");
        let remaining = session.expires_at - Utc::now();

        assert!(!session.is_expired());
        assert!(remaining > Duration::hours(23));
        assert!(remaining <= Duration::hours(24));
    }

    #[test]
    fn test_memory_store_save_load_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.token().unwrap(), None);

        store.save(&Session::new("abc")).unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("abc"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_expired_session_reads_as_absent() {
        let store = MemorySessionStore::new();
        let expired = Session::with_expiry("old", Utc::now() - Duration::minutes(1));
        store.save(&expired).unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileSessionStore::new(&path)
            .save(&Session::new("persisted"))
            .unwrap();

        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.token().unwrap().as_deref(), Some("persisted"));

        reopened.clear().unwrap();
        assert!(!path.exists());
        // 파일이 없어도 clear는 성공
        reopened.clear().unwrap();
    }

    #[test]
    fn test_file_store_expired_or_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        store
            .save(&Session::with_expiry("old", Utc::now() - Duration::seconds(1)))
            .unwrap();
        assert!(store.load().unwrap().is_none());

        fs::write(&path, "not json").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;

        let store = FileSessionStore::new(&path);
        store.save(&Session::new("secret")).unwrap();
        assert_eq!(mode(&path), 0o600);

        // 이전 버전이 남긴 넓은 권한의 파일도 좁혀짐
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        store.save(&Session::new("rotated")).unwrap();
        assert_eq!(mode(&path), 0o600);
        assert_eq!(store.token().unwrap().as_deref(), Some("rotated"));
    }
}
