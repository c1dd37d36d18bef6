use serde::{Deserialize, Serialize};

use super::lenient;

/// `Ads/traits.json`: the advertising profile Discord derived for the account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdTraits {
    pub day_pt: Option<String>,
    pub user_id: Option<String>,
    pub reg_country_code: Option<String>,
    pub reg_region: Option<String>,
    pub reg_region_code: Option<String>,
    pub primary_platform_l30: Option<String>,
    pub age_group: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub is_underage: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub has_active_mobile_subscription: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub has_active_subscription: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub subscription_premium_type: i64,
    #[serde(rename = "game_names_clean_l365", deserialize_with = "lenient::or_default")]
    pub game_names_l365: Vec<String>,
    #[serde(rename = "game_names_clean_l90", deserialize_with = "lenient::or_default")]
    pub game_names_l90: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub game_ids_l30: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub game_ids_l90: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub game_ids_l365: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub game_ids_l730: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub genre_names_l90: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub genre_ids_l90: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub theme_names_l90: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub theme_ids_l90: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub quest_history_enrolled: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub quest_history_reward_claimed: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub ml_genre_ids_v1: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub mobile_genre_names: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub ml_mobile_genre_names_v1: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub movie_and_tv_genre_names: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub music_and_audio_genre_names: Vec<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub custom_audiences: Vec<String>,
}
