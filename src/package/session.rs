//! Published-state holder for front ends that keep one package open.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::watch;
use tracing::info;

use crate::io::ReadAt;
use crate::models::PackageData;

use super::error::{LoadError, LoadResult, SkippedEntry};
use super::loader::load_package;
use super::options::{CancelFlag, LoadOptions};
use super::progress::LoadPhase;

/// Snapshot of a session, broadcast on every change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadStatus {
    pub phase: LoadPhase,
    pub fraction: f64,
    /// Human-readable phase text
    pub message: String,
    /// Set only after a failed load
    pub error: Option<String>,
    pub loaded: bool,
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        self.phase.is_in_progress()
    }

    fn settled(loaded: bool) -> Self {
        if loaded {
            Self {
                phase: LoadPhase::Published,
                fraction: 1.0,
                message: "Done!".to_string(),
                error: None,
                loaded: true,
            }
        } else {
            Self::default()
        }
    }
}

/// Holds the last published [`PackageData`] and its load status.
///
/// Only one load runs at a time. A successful load replaces the aggregate
/// wholesale; a failed one clears it; a cancelled one leaves it alone.
#[derive(Debug)]
pub struct PackageSession {
    data: watch::Sender<Option<Arc<PackageData>>>,
    status: watch::Sender<LoadStatus>,
    loading: AtomicBool,
}

impl Default for PackageSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageSession {
    pub fn new() -> Self {
        Self {
            data: watch::Sender::new(None),
            status: watch::Sender::new(LoadStatus::default()),
            loading: AtomicBool::new(false),
        }
    }

    /// Receiver notified on every status change
    pub fn subscribe(&self) -> watch::Receiver<LoadStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> LoadStatus {
        self.status.borrow().clone()
    }

    pub fn data(&self) -> Option<Arc<PackageData>> {
        self.data.borrow().clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.data.borrow().is_some()
    }

    /// Load a package and publish it. Returns the skipped entries.
    pub async fn load<R: ReadAt + ?Sized>(
        &self,
        reader: &R,
        options: &LoadOptions,
        cancel: &CancelFlag,
    ) -> LoadResult<Vec<SkippedEntry>> {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(LoadError::AlreadyLoading);
        }
        let _guard = LoadingGuard { session: self };

        let loaded = self.is_loaded();
        let status = &self.status;
        let result = load_package(reader, options, cancel, |progress| {
            status.send_modify(|s| {
                s.phase = progress.phase;
                s.fraction = progress.fraction;
                s.message.clone_from(&progress.message);
                s.error = None;
            });
        })
        .await;

        match result {
            Ok(report) => {
                self.data.send_replace(Some(Arc::new(report.data)));
                self.status.send_replace(LoadStatus::settled(true));
                info!(skipped = report.skipped.len(), "package published");
                Ok(report.skipped)
            }
            Err(LoadError::Cancelled) => {
                self.status.send_replace(LoadStatus::settled(loaded));
                Err(LoadError::Cancelled)
            }
            Err(e) => {
                self.data.send_replace(None);
                let message = e.to_string();
                self.status.send_replace(LoadStatus {
                    phase: LoadPhase::Failed,
                    fraction: 0.0,
                    message: message.clone(),
                    error: Some(message),
                    loaded: false,
                });
                Err(e)
            }
        }
    }

    /// Drop the published aggregate and return to `Idle`.
    pub fn unload(&self) {
        self.data.send_replace(None);
        self.status.send_replace(LoadStatus::default());
    }
}

/// Releases the single-flight flag, also when the load future is dropped
/// mid-way. A status still showing progress then falls back to settled.
struct LoadingGuard<'a> {
    session: &'a PackageSession,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let loaded = self.session.is_loaded();
        self.session.status.send_if_modified(|s| {
            if s.is_loading() {
                *s = LoadStatus::settled(loaded);
                true
            } else {
                false
            }
        });
        self.session.loading.store(false, Ordering::Release);
    }
}
