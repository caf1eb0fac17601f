//! Site content and settings (flat key/value text)

use crate::validation::{MAX_SHORT_TEXT_LEN, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Setting key for the public ordering switch
pub const SETTING_ORDERING_ENABLED: &str = "ordering_enabled";
/// Setting key for the Google Places API key
pub const SETTING_GOOGLE_API_KEY: &str = "google_places_api_key";
/// Setting key for the Google place id
pub const SETTING_GOOGLE_PLACE_ID: &str = "google_place_id";

/// Site content row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SiteContentEntry {
    pub key: String,
    pub value: String,
    pub updated_at: i64,
}

/// Upsert payload for `PUT /api/site-content/{key}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteContentUpdate {
    pub value: String,
}

/// Check a content key taken from the path
pub fn validate_key(key: &str) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::new();
    errs.require_text(key, "key", "Key", MAX_SHORT_TEXT_LEN);
    errs.into_result()
}

/// Interpret a stored boolean setting; anything but "false" is on
pub fn parse_flag(value: Option<&str>) -> bool {
    !matches!(value.map(str::trim), Some("false"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(None));
        assert!(parse_flag(Some("true")));
        assert!(!parse_flag(Some("false")));
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("hero_title").is_ok());
        assert!(validate_key(" ").is_err());
    }
}
