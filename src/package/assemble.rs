//! Final merge of scratch accumulators into published records.

use tracing::warn;

use crate::models::{LoadedChannel, LoadedServer, PackageData};

use super::scratch::Scratch;

/// Channel id of a `Messages/` folder: the name minus one leading `c`.
pub fn channel_id_from_folder(folder: &str) -> &str {
    folder.strip_prefix('c').unwrap_or(folder)
}

/// Build one channel per folder seen in either messages or metadata.
pub(crate) fn assemble_channels(data: &mut PackageData, scratch: &mut Scratch) {
    let mut meta = std::mem::take(&mut scratch.channel_meta);
    let messages = std::mem::take(&mut scratch.channel_messages);

    let mut folders = Vec::new();
    for (folder, list) in messages.into_sorted() {
        let channel_meta = meta.remove(&folder).map(|(_, m)| m);
        folders.push((folder, channel_meta, list));
    }
    for (folder, channel_meta) in meta.into_sorted() {
        folders.push((folder, Some(channel_meta), Vec::new()));
    }

    for (folder, channel_meta, list) in folders {
        let channel_id = channel_id_from_folder(&folder).to_string();
        let display_name = data
            .channel_index
            .get(&channel_id)
            .cloned()
            .unwrap_or_else(|| format!("Channel {channel_id}"));

        let channel = LoadedChannel {
            channel_id: channel_id.clone(),
            display_name,
            meta: channel_meta,
            messages: list,
        };
        if data.channels.insert(channel_id.clone(), channel).is_some() {
            warn!(folder = %folder, channel_id = %channel_id, "two folders map to one channel id, keeping the later");
        }
    }
}

/// Build one server per folder seen under `Servers/`.
///
/// Name fallback: servers index, then the guild's own name, then the folder.
pub(crate) fn assemble_servers(data: &mut PackageData, scratch: &mut Scratch) {
    let servers = std::mem::take(&mut scratch.servers);

    for (folder, acc) in servers.into_sorted() {
        let display_name = data
            .server_index
            .get(&folder)
            .cloned()
            .or_else(|| {
                acc.guild
                    .as_ref()
                    .map(|g| g.name.clone())
                    .filter(|name| !name.is_empty())
            })
            .unwrap_or_else(|| folder.clone());

        data.servers.insert(
            folder.clone(),
            LoadedServer {
                server_id: folder,
                display_name,
                guild: acc.guild,
                channels: acc.channels,
                audit_log: acc.audit_log,
                emojis: acc.emojis,
                webhooks: acc.webhooks,
                icon_data_url: acc.icon_data_url,
                emoji_data_urls: acc.emoji_data_urls,
            },
        );
    }
}
