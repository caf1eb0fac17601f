//! Full data export

use super::{Coupon, GalleryImage, MenuItem, Review};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of every collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    pub menu_items: Vec<MenuItem>,
    pub gallery_images: Vec<GalleryImage>,
    pub site_content: BTreeMap<String, String>,
    pub coupons: Vec<Coupon>,
    pub reviews: Vec<Review>,
}
