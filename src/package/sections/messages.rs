use std::collections::HashMap;

use crate::models::{ChannelMeta, Message, PackageData};
use crate::package::path::split_folder;
use crate::package::router::Target;
use crate::package::scratch::Scratch;

use super::{DecodeResult, decode};

/// `rest` is the path below `Messages/`.
pub(crate) fn classify(rest: &str) -> Option<Target<'_>> {
    if rest.eq_ignore_ascii_case("index.json") {
        return Some(Target::ChannelIndex);
    }
    if !rest.starts_with('c') {
        return None;
    }
    let (folder, file) = split_folder(rest)?;
    match file.to_ascii_lowercase().as_str() {
        "channel.json" => Some(Target::ChannelMeta { folder }),
        "messages.json" => Some(Target::ChannelMessages { folder }),
        _ => None,
    }
}

/// Merge `index.json` into the channel name lookup; duplicate ids take the later name.
pub(crate) fn apply_index(content: &[u8], data: &mut PackageData) -> DecodeResult {
    let index: HashMap<String, Option<String>> = decode(content)?;
    // Deleted channels and some DMs have a null name
    data.channel_index
        .extend(index.into_iter().filter_map(|(id, name)| Some((id, name?))));
    Ok(())
}

pub(crate) fn apply_meta(folder: &str, content: &[u8], scratch: &mut Scratch) -> DecodeResult {
    scratch
        .channel_meta
        .insert(folder, decode::<ChannelMeta>(content)?);
    Ok(())
}

pub(crate) fn apply_messages(folder: &str, content: &[u8], scratch: &mut Scratch) -> DecodeResult {
    let mut messages: Vec<Message> = decode(content)?;
    for message in &mut messages {
        message.parsed_timestamp = Message::parse_timestamp(&message.timestamp);
    }
    sort_by_raw_timestamp(&mut messages);
    scratch.channel_messages.insert(folder, messages);
    Ok(())
}

/// Stable sort on the raw timestamp bytes.
///
/// Only chronological because exports write timestamps fixed-width; a
/// message whose timestamp failed to parse keeps its place by string order.
pub(crate) fn sort_by_raw_timestamp(messages: &mut [Message]) {
    messages.sort_by(|a, b| a.timestamp.as_bytes().cmp(b.timestamp.as_bytes()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, timestamp: &str) -> Message {
        Message {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            ..Message::default()
        }
    }

    #[test]
    fn sort_is_ordinal_and_stable() {
        let mut messages = vec![
            message("1", "2023-01-02 00:00:00"),
            message("2", "2023-01-01 00:00:00"),
            message("3", "2023-01-01 00:00:00"),
            message("4", "2023-01-01 00:00:00 UTC"),
            message("5", ""),
        ];
        sort_by_raw_timestamp(&mut messages);
        let ids: Vec<_> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["5", "2", "3", "4", "1"]);
    }

    #[test]
    fn messages_keep_unparseable_timestamps() {
        let mut scratch = Scratch::default();
        apply_messages(
            "c9",
            br#"[{"ID": 2, "Timestamp": "2023-01-02 00:00:00"},
                 {"ID": 1, "Timestamp": "yesterday"},
                 {"ID": 3, "Timestamp": "2023-01-01 00:00:00"}]"#,
            &mut scratch,
        )
        .unwrap();
        let (_, messages) = scratch.channel_messages.remove("c9").unwrap();
        let ids: Vec<_> = messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["3", "2", "1"]);
        assert!(messages[0].parsed_timestamp.is_some());
        assert!(messages[2].parsed_timestamp.is_none());
    }

    #[test]
    fn index_merges_and_drops_null_names() {
        let mut data = PackageData::default();
        apply_index(br#"{"1": "general", "2": null}"#, &mut data).unwrap();
        apply_index(br#"{"1": "renamed", "3": "Direct Message with x"}"#, &mut data).unwrap();
        assert_eq!(data.channel_index["1"], "renamed");
        assert!(!data.channel_index.contains_key("2"));
        assert_eq!(data.channel_index.len(), 2);
    }

    #[test]
    fn classify_requires_c_folder() {
        assert_eq!(classify("c1/channel.json"), Some(Target::ChannelMeta { folder: "c1" }));
        assert_eq!(classify("C1/channel.json"), None);
        assert_eq!(classify("c1/sub/messages.json"), None);
    }
}
