use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Pattern of the `Timestamp` column in `messages.json`
pub const MESSAGE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of `Messages/c<id>/messages.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    #[serde(rename = "ID", alias = "id", deserialize_with = "lenient::string")]
    pub id: String,
    /// Raw timestamp exactly as exported; also the sort key.
    #[serde(rename = "Timestamp", alias = "timestamp", deserialize_with = "lenient::string")]
    pub timestamp: String,
    #[serde(rename = "Contents", alias = "contents", deserialize_with = "lenient::string")]
    pub contents: String,
    #[serde(rename = "Attachments", alias = "attachments", deserialize_with = "lenient::string")]
    pub attachments: String,
    /// Best-effort parse of `timestamp`, filled in after decoding.
    #[serde(skip_deserializing)]
    pub parsed_timestamp: Option<NaiveDateTime>,
}

impl Message {
    /// Parse `timestamp` with the fixed export pattern; `None` if it does not match.
    pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(raw, MESSAGE_TIMESTAMP_FORMAT).ok()
    }
}

/// `Messages/c<id>/channel.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelMeta {
    #[serde(alias = "Id", alias = "ID", deserialize_with = "lenient::string")]
    pub id: String,
    /// `DM`, `GROUP_DM`, `GUILD_TEXT`, ... (numeric in some exports)
    #[serde(rename = "type", alias = "Type", deserialize_with = "lenient::string")]
    pub kind: String,
    /// Only present for guild channels.
    #[serde(alias = "Name")]
    pub name: Option<String>,
    /// Only present for guild channels.
    #[serde(alias = "Guild")]
    pub guild: Option<ChannelGuild>,
    /// Only present for DM channels.
    #[serde(alias = "Recipients")]
    pub recipients: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelGuild {
    #[serde(alias = "Id", alias = "ID", deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(alias = "Name", deserialize_with = "lenient::string")]
    pub name: String,
}

/// A channel as published: metadata, messages and resolved display name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadedChannel {
    pub channel_id: String,
    pub display_name: String,
    pub meta: Option<ChannelMeta>,
    /// Ascending by raw timestamp string
    pub messages: Vec<Message>,
}

impl LoadedChannel {
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn is_dm(&self) -> bool {
        self.meta.as_ref().is_some_and(|m| m.kind == "DM")
    }

    /// Server name if this is a guild channel.
    pub fn server_name(&self) -> Option<&str> {
        self.meta.as_ref()?.guild.as_ref().map(|g| g.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_export_row() {
        let raw = r#"{"ID": 1066385391054323712, "Timestamp": "2023-01-22 17:03:18",
                      "Contents": "hi", "Attachments": ""}"#;
        let msg: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(msg.id, "1066385391054323712");
        assert_eq!(msg.contents, "hi");
        assert!(msg.parsed_timestamp.is_none());
    }

    #[test]
    fn lower_case_fields_are_accepted() {
        let msg: Message =
            serde_json::from_str(r#"{"id": "5", "timestamp": "x", "contents": null}"#).unwrap();
        assert_eq!(msg.id, "5");
        assert_eq!(msg.timestamp, "x");
        assert_eq!(msg.contents, "");
    }

    #[test]
    fn timestamp_pattern() {
        assert!(Message::parse_timestamp("2023-01-02 00:00:00").is_some());
        assert!(Message::parse_timestamp("2023-01-02T00:00:00.000+00:00").is_none());
        assert!(Message::parse_timestamp("").is_none());
    }

    #[test]
    fn channel_helpers() {
        let meta: ChannelMeta = serde_json::from_str(
            r#"{"id": "1", "type": "GUILD_TEXT", "name": "general",
                "guild": {"id": 9, "name": "Guild"}}"#,
        )
        .unwrap();
        let channel = LoadedChannel {
            channel_id: "1".into(),
            display_name: "general".into(),
            meta: Some(meta),
            messages: Vec::new(),
        };
        assert!(!channel.is_dm());
        assert_eq!(channel.server_name(), Some("Guild"));

        let dm: ChannelMeta =
            serde_json::from_str(r#"{"id": "2", "type": "DM", "recipients": ["1", "2"]}"#).unwrap();
        assert_eq!(dm.kind, "DM");
        assert_eq!(dm.recipients.map(|r| r.len()), Some(2));
    }

    #[test]
    fn channel_meta_accepts_pascal_case_and_nulls() {
        let meta: ChannelMeta = serde_json::from_str(
            r#"{"Id": 3, "Type": "GUILD_TEXT", "Name": "rules",
                "Guild": {"ID": "9", "Name": null}}"#,
        )
        .unwrap();
        assert_eq!(meta.id, "3");
        assert_eq!(meta.kind, "GUILD_TEXT");
        assert_eq!(meta.name.as_deref(), Some("rules"));
        assert_eq!(meta.guild.as_ref().map(|g| g.id.as_str()), Some("9"));
        assert_eq!(meta.guild.map(|g| g.name), Some(String::new()));
    }
}
