use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use super::lenient;

/// `Account/user.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub username: String,
    #[serde(deserialize_with = "lenient::string")]
    pub discriminator: String,
    pub global_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub verified: bool,
    pub avatar_hash: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub has_mobile: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub needs_email_verification: bool,
    pub premium_until: Option<String>,
    pub phone: Option<String>,
    pub temp_banned_until: Option<String>,
    pub ip: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub flags: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub connections: Vec<Connection>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub user_sessions: Vec<UserSession>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub relationships: Vec<Relationship>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub guild_settings: Vec<GuildSetting>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub user_activity_application_statistics: Vec<ActivityStat>,
    pub user_profile_metadata: Option<UserProfileMetadata>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub current_orbs_balance: i64,
    pub notes: Option<BTreeMap<String, String>>,
}

impl UserProfile {
    /// Relationships of type `FRIEND`
    pub fn friend_count(&self) -> usize {
        self.relationships
            .iter()
            .filter(|r| r.kind.eq_ignore_ascii_case("FRIEND"))
            .count()
    }
}

/// Linked third-party account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connection {
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub visibility: i64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub friend_sync: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub show_activity: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub verified: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub two_way_link: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub metadata_visibility: i64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub revoked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSession {
    #[serde(deserialize_with = "lenient::string")]
    pub id_hash: String,
    pub user_data: Option<SessionUserData>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub is_soft_deleted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionUserData {
    #[serde(deserialize_with = "lenient::or_default")]
    pub version: i64,
    pub creation_time: Option<String>,
    pub expiration_time: Option<String>,
    pub approx_last_used_time: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub is_mfa: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub is_bot: bool,
    pub client_info: Option<ClientInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientInfo {
    pub ip: Option<String>,
    pub os: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relationship {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    /// `FRIEND`, `BLOCKED`, ... (numeric in older exports)
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,
    pub nickname: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub user_ignored: bool,
    pub user: Option<RelationshipUser>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub is_spam_request: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipUser {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub username: String,
    pub global_name: Option<String>,
    pub avatar: Option<String>,
}

/// Per-guild notification settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuildSetting {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub guild_id: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub suppress_everyone: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub suppress_roles: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub mute_scheduled_events: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub message_notifications: i64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub flags: i64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub mobile_push: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub muted: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub hide_muted_channels: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub notify_highlights: i64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub version: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityStat {
    #[serde(deserialize_with = "lenient::string")]
    pub application_id: String,
    pub last_played_at: Option<String>,
    pub first_played_at: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub total_duration: i64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub total_discord_sku_duration: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfileMetadata {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub user_id: Option<String>,
    pub boosting_started_at: Option<String>,
    pub premium_started_at: Option<String>,
    pub legacy_username: Option<String>,
}

/// `Account/avatar.<ext>` as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

impl Avatar {
    pub fn data_url(&self) -> String {
        data_url(self.mime, &self.bytes)
    }
}

// Serialized as a data URL so JSON consumers can embed it directly
impl Serialize for Avatar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.data_url())
    }
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friend_count_ignores_case_and_other_kinds() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id": "1", "username": "me", "discriminator": 0,
                "relationships": [
                    {"id": "2", "type": "FRIEND"},
                    {"id": "3", "type": "friend"},
                    {"id": "4", "type": "BLOCKED"}
                ]}"#,
        )
        .unwrap();
        assert_eq!(profile.discriminator, "0");
        assert_eq!(profile.friend_count(), 2);
    }

    #[test]
    fn phone_only_account_keeps_profile() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id": "1", "username": "phoneonly", "email": null, "verified": null,
                "flags": null, "connections": null, "current_orbs_balance": null,
                "phone": "+15550100",
                "guild_settings": [{"guild_id": null, "muted": null, "version": null}]}"#,
        )
        .unwrap();
        assert_eq!(profile.username, "phoneonly");
        assert_eq!(profile.email, "");
        assert!(!profile.verified);
        assert!(profile.flags.is_empty());
        assert!(profile.connections.is_empty());
        assert_eq!(profile.current_orbs_balance, 0);
        assert_eq!(profile.phone.as_deref(), Some("+15550100"));
        assert!(!profile.guild_settings[0].muted);
    }

    #[test]
    fn avatar_serializes_as_data_url() {
        let avatar = Avatar {
            bytes: vec![0x89, b'P', b'N', b'G'],
            mime: "image/png",
        };
        assert_eq!(avatar.data_url(), "data:image/png;base64,iVBORw==");
        assert_eq!(
            serde_json::to_string(&avatar).unwrap(),
            "\"data:image/png;base64,iVBORw==\""
        );
    }
}
