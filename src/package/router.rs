//! Maps a prefix-stripped entry path to the file it represents.
//!
//! Routing is pure path classification; nothing is read here. Unknown
//! top-level folders and unrecognized files route to `None` and are never
//! an error, so newer export layouts still load.

use super::path::split_folder;
use super::sections::{account, ads, activity, messages, servers};

/// Top-level folders of a data package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Account,
    Messages,
    Servers,
    Ads,
    SupportTickets,
    Activity,
}

impl Section {
    /// Case-insensitive lookup of a top-level folder name.
    pub fn from_folder(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "account" => Some(Self::Account),
            "messages" => Some(Self::Messages),
            "servers" => Some(Self::Servers),
            "ads" => Some(Self::Ads),
            "support_tickets" => Some(Self::SupportTickets),
            "activity" => Some(Self::Activity),
            _ => None,
        }
    }
}

/// What a routed entry is, borrowing folder names from its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target<'a> {
    UserProfile,
    Avatar { mime: &'static str },
    DataExport,
    ChannelIndex,
    ChannelMeta { folder: &'a str },
    ChannelMessages { folder: &'a str },
    ServerIndex,
    Server { folder: &'a str, file: ServerFile<'a> },
    AdTraits,
    SupportTickets,
    Activity { section: &'a str },
}

/// Files inside `Servers/<id>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerFile<'a> {
    Guild,
    Channels,
    AuditLog,
    Emojis,
    Webhooks,
    Icon { mime: &'static str },
    EmojiImage { emoji_id: &'a str },
    /// Unrecognized file; still registers the server folder.
    Other,
}

impl Target<'_> {
    /// Whether the entry's bytes must be read to apply it.
    pub fn needs_content(&self) -> bool {
        !matches!(
            self,
            Target::Server {
                file: ServerFile::Other,
                ..
            }
        )
    }
}

/// Classify `relative` (already normalized, root prefix removed).
pub fn route(relative: &str) -> Option<Target<'_>> {
    let (top, rest) = split_folder(relative)?;
    match Section::from_folder(top)? {
        Section::Account => account::classify(rest),
        Section::Messages => messages::classify(rest),
        Section::Servers => servers::classify(rest),
        Section::Ads => ads::classify_ads(rest),
        Section::SupportTickets => ads::classify_support(rest),
        Section::Activity => activity::classify(rest),
    }
}
