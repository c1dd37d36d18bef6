//! Transient state of one scan.
//!
//! Channel and server files arrive in arbitrary archive order, so their
//! pieces collect here keyed by folder until the assembler turns them into
//! published records.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::models::{
    AuditLogEntry, ChannelMeta, EmojiMeta, GuildChannel, GuildInfo, Message, PackageData,
    WebhookInfo,
};

/// Map keyed by archive folder name, compared case-insensitively.
///
/// The spelling seen first is kept as the folder's name.
#[derive(Debug)]
pub(crate) struct FolderMap<V> {
    entries: HashMap<String, (String, V)>,
}

impl<V> Default for FolderMap<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> FolderMap<V> {
    fn key(folder: &str) -> String {
        folder.to_lowercase()
    }

    /// Set the value for `folder`, replacing any earlier one.
    pub fn insert(&mut self, folder: &str, value: V) {
        match self.entries.entry(Self::key(folder)) {
            Entry::Occupied(mut occupied) => occupied.get_mut().1 = value,
            Entry::Vacant(vacant) => {
                vacant.insert((folder.to_string(), value));
            }
        }
    }

    pub fn remove(&mut self, folder: &str) -> Option<(String, V)> {
        self.entries.remove(&Self::key(folder))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries ordered by case-folded key, so assembly is deterministic.
    pub fn into_sorted(self) -> Vec<(String, V)> {
        let sorted: BTreeMap<_, _> = self.entries.into_iter().collect();
        sorted.into_values().collect()
    }
}

impl<V: Default> FolderMap<V> {
    pub fn get_or_default(&mut self, folder: &str) -> &mut V {
        &mut self
            .entries
            .entry(Self::key(folder))
            .or_insert_with(|| (folder.to_string(), V::default()))
            .1
    }
}

/// Pieces of one `Servers/<id>/` folder.
#[derive(Debug, Default)]
pub(crate) struct ServerAccumulator {
    pub guild: Option<GuildInfo>,
    pub channels: Vec<GuildChannel>,
    pub audit_log: Vec<AuditLogEntry>,
    pub emojis: Vec<EmojiMeta>,
    pub webhooks: Vec<WebhookInfo>,
    pub icon_data_url: Option<String>,
    pub emoji_data_urls: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
pub(crate) struct Scratch {
    pub channel_messages: FolderMap<Vec<Message>>,
    pub channel_meta: FolderMap<ChannelMeta>,
    pub servers: FolderMap<ServerAccumulator>,
}

/// Everything a scan writes to: finished fields go straight into `data`,
/// folder-keyed pieces into `scratch`.
#[derive(Debug, Default)]
pub(crate) struct ScanState {
    pub data: PackageData,
    pub scratch: Scratch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_ignore_case_and_keep_first_spelling() {
        let mut map: FolderMap<u32> = FolderMap::default();
        map.insert("c123", 1);
        map.insert("C123", 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove("c123"), Some(("c123".to_string(), 2)));
        assert!(map.remove("C123").is_none());
    }

    #[test]
    fn get_or_default_accumulates() {
        let mut map: FolderMap<Vec<&str>> = FolderMap::default();
        map.get_or_default("42").push("guild");
        map.get_or_default("42").push("icon");
        map.get_or_default("7").push("emoji");
        let sorted = map.into_sorted();
        assert_eq!(sorted[0], ("42".to_string(), vec!["guild", "icon"]));
        assert_eq!(sorted[1].0, "7");
    }
}
