//! Gallery Image Model

use crate::validation::{MAX_NAME_LEN, MAX_URL_LEN, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Gallery image entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: i64,
    pub image_url: String,
    pub alt_text: String,
    /// Sort key, ascending
    pub display_order: i32,
    pub created_at: i64,
}

/// Create gallery image payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageCreate {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub alt_text: String,
    pub display_order: Option<i32>,
}

impl GalleryImageCreate {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();
        errs.require_text(&self.image_url, "imageUrl", "Image URL", MAX_URL_LEN);
        errs.require_text(&self.alt_text, "altText", "Alt text", MAX_NAME_LEN);
        errs.into_result()
    }
}
