//! Integration tests for the durable session store.

use std::path::PathBuf;

use tourney_protocol::UserId;
use tourney_session::{
    EndReason, FileStore, KeyValueStore, SessionContext, SessionError, TOKEN_KEY, USER_ID_KEY,
};

/// A fresh directory under the system temp dir, removed on drop.
struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("tourney-session-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create temp dir");
        Self(dir)
    }

    fn file(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[test]
fn test_missing_file_is_empty_store() {
    let dir = TempDir::new("missing");
    let store = FileStore::open(dir.file("session.json")).expect("open");
    assert_eq!(store.get(TOKEN_KEY), None);
    assert!(!dir.file("session.json").exists());
}

#[test]
fn test_session_survives_reopen() {
    let dir = TempDir::new("reopen");
    let path = dir.file("nested/session.json");

    {
        let context = SessionContext::init(FileStore::open(&path).expect("open"));
        context.start("tok-123", Some(UserId(42))).expect("start");
    }

    let reopened = SessionContext::init(FileStore::open(&path).expect("reopen"));
    assert_eq!(reopened.token().as_deref(), Some("tok-123"));
    assert!(reopened.is_current_user(UserId(42)));
}

#[test]
fn test_end_is_persisted() {
    let dir = TempDir::new("end");
    let path = dir.file("session.json");

    let context = SessionContext::init(FileStore::open(&path).expect("open"));
    context.start("tok", Some(UserId(1))).expect("start");
    context.end(EndReason::Unauthorized).expect("end");

    let store = FileStore::open(&path).expect("reopen");
    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(store.get(USER_ID_KEY), None);
}

#[test]
fn test_corrupt_file_is_reported() {
    let dir = TempDir::new("corrupt");
    let path = dir.file("session.json");
    std::fs::write(&path, b"not json").expect("write");

    let err = FileStore::open(&path).unwrap_err();
    assert!(matches!(err, SessionError::Corrupt { .. }));
    assert!(err.to_string().contains("corrupt"));
}

#[test]
fn test_failed_start_leaves_no_session() {
    let dir = TempDir::new("failed-start");
    let path = dir.file("session.json");
    let context = SessionContext::init(FileStore::open(&path).expect("open"));
    // The temp file can't be written while a directory sits on its path.
    std::fs::create_dir_all(dir.file("session.tmp")).expect("block temp file");

    let err = context.start("tok", None).unwrap_err();

    assert!(matches!(err, SessionError::Storage { .. }));
    assert!(!context.is_authenticated());
    assert_eq!(context.token(), None);
}

#[test]
fn test_failed_end_keeps_memory_and_file_in_step() {
    let dir = TempDir::new("failed-end");
    let path = dir.file("session.json");
    let context = SessionContext::init(FileStore::open(&path).expect("open"));
    context.start("tok", Some(UserId(3))).expect("start");
    std::fs::create_dir_all(dir.file("session.tmp")).expect("block temp file");

    assert!(context.end(EndReason::Logout).is_err());

    assert_eq!(context.token().as_deref(), Some("tok"));
    let on_disk = FileStore::open(&path).expect("reopen");
    assert_eq!(on_disk.get(TOKEN_KEY).as_deref(), Some("tok"));
}
