//! ZIP archive access.
//!
//! - [`structures`]: fixed-layout records (EOCD, ZIP64 records, entry metadata)
//! - [`parser`]: central directory parsing from any [`ReadAt`](crate::io::ReadAt) source
//! - [`reader`]: per-entry content reads with decompression and CRC checks
//!
//! ## Supported Features
//!
//! - Standard ZIP format (PKZIP APPNOTE 6.3.x compatible)
//! - ZIP64 extensions for archives and entries > 4GB
//! - STORED and DEFLATE compression methods
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - No recovery of damaged central directories

mod parser;
mod reader;
mod structures;

pub use parser::CentralDirectory;
pub use reader::ArchiveReader;
pub use structures::*;
