//! # packview
//!
//! Loads a Discord "data package" export (the ZIP a user receives after a
//! data request) into one typed, queryable [`PackageData`] aggregate.
//!
//! The archive is read in a single sequential pass over its central
//! directory. Every entry is classified by its path, decoded when it belongs
//! to a known section, and folded into per-channel and per-server
//! accumulators that are merged once the pass is done.
//!
//! ## Features
//!
//! - Random-access reading from files, memory or any `Read + Seek` source
//! - Support for ZIP64 archives and STORED/DEFLATE entries with CRC checks
//! - Detection of an extra wrapping folder around the package
//! - Malformed or unreadable entries are skipped and reported, never fatal
//! - Monotonic progress reporting and cooperative cancellation
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use packview::{CancelFlag, LoadOptions, LocalFileReader, load_package};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let reader = LocalFileReader::new(Path::new("package.zip"))?;
//!     let report = load_package(&reader, &LoadOptions::default(), &CancelFlag::new(), |p| {
//!         eprintln!("{:>3.0}% {}", p.fraction * 100.0, p.message);
//!     })
//!     .await?;
//!
//!     for channel in report.data.channels.values() {
//!         println!("{} ({} messages)", channel.display_name, channel.message_count());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod io;
pub mod models;
pub mod package;
pub mod zip;

pub use cli::Cli;
pub use io::{LocalFileReader, MemoryReader, ReadAt, SeekableReader};
pub use models::PackageData;
pub use package::{
    CancelFlag, LoadError, LoadOptions, LoadPhase, LoadReport, LoadStatus, PackageSession,
    Progress, SkipReason, SkippedEntry, load_package,
};
