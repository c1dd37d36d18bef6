use std::collections::HashMap;

use crate::models::{PackageData, data_url};
use crate::package::path::{ends_with_ci, named_image, split_folder, stem_and_extension, strip_prefix_ci};
use crate::package::router::{ServerFile, Target};
use crate::package::scratch::Scratch;

use super::{DecodeResult, decode};

/// `rest` is the path below `Servers/`.
pub(crate) fn classify(rest: &str) -> Option<Target<'_>> {
    if rest.eq_ignore_ascii_case("index.json") {
        return Some(Target::ServerIndex);
    }
    let (folder, file) = split_folder(rest)?;
    Some(Target::Server {
        folder,
        file: classify_file(file),
    })
}

fn classify_file(file: &str) -> ServerFile<'_> {
    match file.to_ascii_lowercase().as_str() {
        "guild.json" => return ServerFile::Guild,
        "channels.json" => return ServerFile::Channels,
        "audit-log.json" => return ServerFile::AuditLog,
        "emoji.json" => return ServerFile::Emojis,
        "webhooks.json" => return ServerFile::Webhooks,
        _ => {}
    }

    if !file.contains('/') {
        if let Some(mime) = named_image(file, "icon") {
            return ServerFile::Icon { mime };
        }
    }

    match strip_prefix_ci(file, "emoji/") {
        Some(image) if !image.contains('/') && ends_with_ci(image, ".png") => {
            ServerFile::EmojiImage {
                emoji_id: stem_and_extension(image).0,
            }
        }
        _ => ServerFile::Other,
    }
}

/// Merge `index.json` into the server name lookup; duplicate ids take the later name.
pub(crate) fn apply_index(content: &[u8], data: &mut PackageData) -> DecodeResult {
    let index: HashMap<String, Option<String>> = decode(content)?;
    data.server_index
        .extend(index.into_iter().filter_map(|(id, name)| Some((id, name?))));
    Ok(())
}

/// Every file under a server folder registers the folder, even when it
/// fails to decode or is not recognized.
pub(crate) fn apply_file(
    folder: &str,
    file: &ServerFile<'_>,
    content: &[u8],
    scratch: &mut Scratch,
) -> DecodeResult {
    let server = scratch.servers.get_or_default(folder);
    match file {
        ServerFile::Guild => server.guild = Some(decode(content)?),
        ServerFile::Channels => server.channels = decode(content)?,
        ServerFile::AuditLog => server.audit_log = decode(content)?,
        ServerFile::Emojis => server.emojis = decode(content)?,
        ServerFile::Webhooks => server.webhooks = decode(content)?,
        ServerFile::Icon { mime } => server.icon_data_url = Some(data_url(mime, content)),
        ServerFile::EmojiImage { emoji_id } => {
            server
                .emoji_data_urls
                .insert(emoji_id.to_string(), data_url("image/png", content));
        }
        ServerFile::Other => {}
    }
    Ok(())
}
