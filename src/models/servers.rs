use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::lenient;

/// `Servers/<id>/guild.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildInfo {
    #[serde(alias = "Id", alias = "ID", deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(alias = "Name", deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(alias = "Description")]
    pub description: Option<String>,
    #[serde(alias = "OwnerId", alias = "Owner_Id", deserialize_with = "lenient::opt_string")]
    pub owner_id: Option<String>,
    #[serde(alias = "Region")]
    pub region: Option<String>,
    #[serde(alias = "VerificationLevel")]
    pub verification_level: Option<i64>,
    #[serde(alias = "Features")]
    pub features: Option<Vec<String>>,
    #[serde(alias = "Roles")]
    pub roles: Option<BTreeMap<String, GuildRole>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildRole {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub color: i64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub position: i64,
    /// Permission bitfield; exported as a decimal string or number
    #[serde(deserialize_with = "lenient::string")]
    pub permissions: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub mentionable: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub hoist: bool,
}

/// Entry of `Servers/<id>/channels.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildChannel {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(rename = "type", deserialize_with = "lenient::or_default")]
    pub kind: i64,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    pub position: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub parent_id: Option<String>,
}

/// Entry of `Servers/<id>/audit-log.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditLogEntry {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    pub action_type: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub target_id: Option<String>,
    pub reason: Option<String>,
}

/// Entry of `Servers/<id>/emoji.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmojiMeta {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    pub animated: Option<bool>,
}

/// Entry of `Servers/<id>/webhooks.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub channel_id: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::or_default")]
    pub kind: i64,
}

/// A server as published, keyed by its archive folder name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadedServer {
    pub server_id: String,
    pub display_name: String,
    pub guild: Option<GuildInfo>,
    pub channels: Vec<GuildChannel>,
    pub audit_log: Vec<AuditLogEntry>,
    pub emojis: Vec<EmojiMeta>,
    pub webhooks: Vec<WebhookInfo>,
    /// `data:<mime>;base64,...`
    pub icon_data_url: Option<String>,
    /// Emoji id to `data:image/png;base64,...`
    pub emoji_data_urls: BTreeMap<String, String>,
}
