//! Loading a data package: path handling, routing, section decoding and
//! the final assembly into [`PackageData`](crate::models::PackageData).

mod assemble;
mod error;
mod loader;
mod options;
mod path;
mod progress;
mod router;
mod scratch;
mod sections;
mod session;

pub use assemble::channel_id_from_folder;
pub use error::{LoadError, LoadResult, SkipReason, SkippedEntry};
pub use loader::{LoadReport, load_package};
pub use options::{ACTIVITY_SIZE_LIMIT, CancelFlag, LoadOptions, PREFIX_SAMPLE_SIZE, PROGRESS_INTERVAL};
pub use path::{detect_root_prefix, normalize_path};
pub use progress::{LoadPhase, Progress};
pub use router::{Section, ServerFile, Target, route};
pub use session::{LoadStatus, PackageSession};
