//! Load orchestration: open → route every entry → assemble.
//!
//! One sequential pass over the central directory. Each entry is read,
//! decoded and dropped before the next one is touched, so memory follows
//! the largest entry plus the aggregate being built.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, warn};

use crate::io::ReadAt;
use crate::models::PackageData;
use crate::zip::{ArchiveEntry, ArchiveReader};

use super::assemble::{assemble_channels, assemble_servers};
use super::error::{LoadError, LoadResult, SkipReason, SkippedEntry};
use super::options::{CancelFlag, LoadOptions};
use super::path::{detect_root_prefix, normalize_path, strip_prefix_ci};
use super::progress::{
    ASSEMBLING_CHANNELS, ASSEMBLING_SERVERS, DONE, LoadPhase, OPENING, Progress,
    ProgressReporter, scan_fraction,
};
use super::router::{Section, Target, route};
use super::scratch::ScanState;
use super::sections;

/// Successful result of [`load_package`].
#[derive(Debug)]
pub struct LoadReport {
    pub data: PackageData,
    /// Entries that were tolerated rather than loaded, in archive order
    pub skipped: Vec<SkippedEntry>,
    /// Entries in the central directory, directories included
    pub entry_count: usize,
    /// Wrapping folder stripped from every path, `""` if none
    pub root_prefix: String,
}

/// Load a data package from `reader`.
///
/// `on_progress` is called on the caller's task with a never-decreasing
/// fraction. Malformed entries are skipped and listed in the report; only
/// an unreadable archive, an internal defect, or cancellation fail the load.
pub async fn load_package<R, P>(
    reader: &R,
    options: &LoadOptions,
    cancel: &CancelFlag,
    on_progress: P,
) -> LoadResult<LoadReport>
where
    R: ReadAt + ?Sized,
    P: FnMut(&Progress) + Send,
{
    let mut progress = ProgressReporter::new(on_progress);
    progress.report(LoadPhase::Opening, OPENING, "Opening archive…");

    let archive = ArchiveReader::open(reader)
        .await
        .map_err(|e| LoadError::ArchiveOpen(format!("{e:#}")))?;
    let entries = archive.entries();
    let total = entries.len();

    let root_prefix = effective_root_prefix(detect_root_prefix(
        entries.iter().map(|e| e.name.as_str()),
        options.prefix_sample_size,
    ));
    info!(entries = total, root_prefix = %root_prefix, "archive opened");

    let mut state = ScanState::default();
    let mut skipped = Vec::new();
    let interval = options.progress_interval.max(1);

    for (index, entry) in entries.iter().enumerate() {
        if cancel.is_cancelled() {
            warn!(processed = index, total, "load cancelled");
            return Err(LoadError::Cancelled);
        }

        if !entry.is_directory() {
            if let Some(reason) = scan_entry(&archive, entry, &root_prefix, options, &mut state).await? {
                debug!(path = %entry.name, modified = ?entry.modified(), %reason, "entry skipped");
                skipped.push(SkippedEntry {
                    path: entry.name.clone(),
                    reason,
                });
            }
        }

        let processed = index + 1;
        if processed % interval == 0 || processed == total {
            progress.report(
                LoadPhase::Scanning,
                scan_fraction(processed, total),
                format!("Processing {processed}/{total}…"),
            );
        }

        if options.yield_between_entries {
            tokio::task::yield_now().await;
        }
    }

    if cancel.is_cancelled() {
        warn!("load cancelled before assembly");
        return Err(LoadError::Cancelled);
    }

    let ScanState {
        mut data,
        mut scratch,
    } = state;
    debug!(
        message_folders = scratch.channel_messages.len(),
        meta_folders = scratch.channel_meta.len(),
        server_folders = scratch.servers.len(),
        "scan finished"
    );

    progress.report(LoadPhase::Assembling, ASSEMBLING_CHANNELS, "Assembling channels…");
    guarded(LoadPhase::Assembling, || assemble_channels(&mut data, &mut scratch))?;

    progress.report(LoadPhase::Assembling, ASSEMBLING_SERVERS, "Assembling servers…");
    guarded(LoadPhase::Assembling, || assemble_servers(&mut data, &mut scratch))?;

    progress.report(LoadPhase::Published, DONE, "Done!");
    info!(
        channels = data.total_channels(),
        servers = data.servers.len(),
        messages = data.total_messages(),
        skipped = skipped.len(),
        "package loaded"
    );

    Ok(LoadReport {
        data,
        skipped,
        entry_count: total,
        root_prefix,
    })
}

/// Route and apply one file entry. `Ok(Some(_))` means it was tolerated
/// and left out; `Err` only for a defect.
async fn scan_entry<R: ReadAt + ?Sized>(
    archive: &ArchiveReader<'_, R>,
    entry: &ArchiveEntry,
    root_prefix: &str,
    options: &LoadOptions,
    state: &mut ScanState,
) -> LoadResult<Option<SkipReason>> {
    let path = normalize_path(&entry.name);
    let relative = strip_prefix_ci(&path, root_prefix).unwrap_or(&path);
    let Some(target) = route(relative) else {
        return Ok(None);
    };

    if matches!(target, Target::Activity { .. })
        && entry.uncompressed_size >= options.activity_size_limit
    {
        return Ok(Some(SkipReason::TooLarge {
            size: entry.uncompressed_size,
            limit: options.activity_size_limit,
        }));
    }

    let content = if target.needs_content() {
        match archive.read(entry).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return Ok(Some(SkipReason::Read {
                    message: format!("{e:#}"),
                }));
            }
        }
    } else {
        Vec::new()
    };

    let decoded = guarded(LoadPhase::Scanning, || {
        sections::apply(&target, content, state)
    })?;
    Ok(decoded.err().map(|e| SkipReason::Decode {
        message: e.to_string(),
    }))
}

/// A wrapper folder named like a section is really that section: the
/// sample happened to land entirely inside it.
fn effective_root_prefix(detected: String) -> String {
    if Section::from_folder(detected.trim_end_matches('/')).is_some() {
        debug!(prefix = %detected, "sampled prefix is a section folder, ignoring it");
        return String::new();
    }
    detected
}

/// Run `f`, turning a panic into [`LoadError::Defect`].
fn guarded<T>(phase: LoadPhase, f: impl FnOnce() -> T) -> LoadResult<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        warn!(%phase, %message, "load aborted by internal error");
        LoadError::Defect { phase, message }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
