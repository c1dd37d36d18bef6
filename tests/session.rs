mod common;

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Notify;

use common::{archive, options};
use packview::{CancelFlag, LoadError, LoadPhase, MemoryReader, PackageSession, ReadAt};

fn sample_package() -> Vec<u8> {
    archive(&[
        ("Account/user.json", br#"{"id": "1", "username": "u", "relationships": [{"type": "FRIEND"}, {"type": 2}]}"#),
        ("Messages/c7/messages.json", br#"[{"ID": "1", "Timestamp": "2024-05-01 10:00:00"}]"#),
    ])
}

/// Parks the first read until released, so a load can be caught mid-flight.
struct GatedReader {
    inner: MemoryReader<Vec<u8>>,
    gated: AtomicBool,
    entered: Notify,
    release: Notify,
}

impl GatedReader {
    fn new(bytes: Vec<u8>) -> Self {
        Self {
            inner: MemoryReader::new(bytes),
            gated: AtomicBool::new(true),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl ReadAt for GatedReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        if self.gated.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner.read_at(offset, buf).await
    }

    fn size(&self) -> u64 {
        self.inner.size()
    }
}

#[tokio::test]
async fn successful_load_publishes() {
    let session = PackageSession::new();
    let mut status = session.subscribe();
    assert!(!session.is_loaded());

    let reader = MemoryReader::new(sample_package());
    let skipped = session
        .load(&reader, &options(), &CancelFlag::new())
        .await
        .unwrap();
    assert!(skipped.is_empty());

    assert!(status.has_changed().unwrap());
    let current = status.borrow_and_update().clone();
    assert!(current.loaded);
    assert!(!current.is_loading());
    assert_eq!(current.phase, LoadPhase::Published);
    assert_eq!(current.fraction, 1.0);
    assert!(current.error.is_none());

    let data = session.data().unwrap();
    assert_eq!(data.total_messages(), 1);
    assert_eq!(data.total_friends(), 1);
    assert_eq!(data.channels["7"].display_name, "Channel 7");
}

#[tokio::test]
async fn second_load_is_rejected_while_running() {
    let session = PackageSession::new();
    let gated = GatedReader::new(sample_package());
    let other = MemoryReader::new(sample_package());

    let first_options = options();
    let first_cancel = CancelFlag::new();
    let (first, second) = tokio::join!(
        session.load(&gated, &first_options, &first_cancel),
        async {
            gated.entered.notified().await;
            assert!(session.status().is_loading());
            let result = session.load(&other, &options(), &CancelFlag::new()).await;
            gated.release.notify_one();
            result
        }
    );

    assert!(matches!(second, Err(LoadError::AlreadyLoading)));
    assert!(first.is_ok());
    assert!(session.is_loaded());

    // The flag is released once the first load finishes
    session
        .load(&other, &options(), &CancelFlag::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn cancel_keeps_previous_package() {
    let session = PackageSession::new();
    let reader = MemoryReader::new(sample_package());
    session
        .load(&reader, &options(), &CancelFlag::new())
        .await
        .unwrap();
    let before = session.data().unwrap();

    let cancel = CancelFlag::new();
    cancel.cancel();
    let err = session.load(&reader, &options(), &cancel).await.unwrap_err();
    assert!(matches!(err, LoadError::Cancelled));

    let status = session.status();
    assert!(status.loaded);
    assert!(status.error.is_none());
    assert_eq!(status.phase, LoadPhase::Published);
    assert!(std::sync::Arc::ptr_eq(&before, &session.data().unwrap()));
}

#[tokio::test]
async fn cancel_without_previous_package_returns_to_idle() {
    let session = PackageSession::new();
    let reader = MemoryReader::new(sample_package());
    let cancel = CancelFlag::new();
    cancel.cancel();

    let err = session.load(&reader, &options(), &cancel).await.unwrap_err();
    assert!(matches!(err, LoadError::Cancelled));
    assert_eq!(session.status().phase, LoadPhase::Idle);
    assert!(!session.is_loaded());
}

#[tokio::test]
async fn failure_discards_previous_package() {
    let session = PackageSession::new();
    let reader = MemoryReader::new(sample_package());
    session
        .load(&reader, &options(), &CancelFlag::new())
        .await
        .unwrap();

    let broken = MemoryReader::new(vec![0u8; 64]);
    let err = session
        .load(&broken, &options(), &CancelFlag::new())
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::ArchiveOpen(_)));

    let status = session.status();
    assert_eq!(status.phase, LoadPhase::Failed);
    assert!(!status.loaded);
    assert_eq!(status.error.as_deref(), Some(err.to_string().as_str()));
    assert!(session.data().is_none());

    session.unload();
    assert_eq!(session.status().phase, LoadPhase::Idle);
    assert!(session.status().error.is_none());
}
