//! Per-section parsers.
//!
//! Each module pairs a `classify` function (path → [`Target`]) with the
//! code that decodes that target's bytes into the scan state. Decoding
//! failures are returned, never raised; the caller records them and moves on.

pub(crate) mod account;
pub(crate) mod activity;
pub(crate) mod ads;
pub(crate) mod messages;
pub(crate) mod servers;

use serde::de::DeserializeOwned;

use super::router::Target;
use super::scratch::ScanState;

pub(crate) type DecodeResult = Result<(), serde_json::Error>;

/// Decode `content` as `target` and merge it into `state`. Image bytes
/// are kept as read.
pub(crate) fn apply(target: &Target<'_>, content: Vec<u8>, state: &mut ScanState) -> DecodeResult {
    match target {
        Target::UserProfile => account::apply_profile(&content, &mut state.data),
        Target::Avatar { mime } => {
            account::apply_avatar(content, *mime, &mut state.data);
            Ok(())
        }
        Target::DataExport => account::apply_data_export(&content, &mut state.data),
        Target::ChannelIndex => messages::apply_index(&content, &mut state.data),
        Target::ChannelMeta { folder } => {
            messages::apply_meta(folder, &content, &mut state.scratch)
        }
        Target::ChannelMessages { folder } => {
            messages::apply_messages(folder, &content, &mut state.scratch)
        }
        Target::ServerIndex => servers::apply_index(&content, &mut state.data),
        Target::Server { folder, file } => {
            servers::apply_file(folder, file, &content, &mut state.scratch)
        }
        Target::AdTraits => ads::apply_traits(&content, &mut state.data),
        Target::SupportTickets => ads::apply_tickets(&content, &mut state.data),
        Target::Activity { section } => activity::apply(section, &content, &mut state.data),
    }
}

/// Decode a whole entry; a UTF-8 byte order mark is tolerated.
pub(crate) fn decode<T: DeserializeOwned>(content: &[u8]) -> Result<T, serde_json::Error> {
    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);
    serde_json::from_slice(content)
}
