//! Dashboard analytics

use super::menu_item::MenuItem;
use serde::{Deserialize, Serialize};

/// Max featured items listed in the analytics summary
pub const TOP_FEATURED_LIMIT: i64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuStats {
    pub total: i64,
    pub available: i64,
    pub featured: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total: i64,
    pub approved: i64,
    /// Mean rating over approved reviews, 0.0 when there are none
    pub average_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponStats {
    pub total: i64,
    pub active: i64,
}

/// Read-only dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub menu_items: MenuStats,
    pub reviews: ReviewStats,
    pub coupons: CouponStats,
    pub top_items: Vec<MenuItem>,
}

/// Mean of `count` ratings summing to `sum`; 0.0 for an empty set
pub fn average_rating(sum: i64, count: i64) -> f64 {
    if count <= 0 {
        return 0.0;
    }
    sum as f64 / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(0, 0), 0.0);
        assert_eq!(average_rating(9, 2), 4.5);
        assert!((average_rating(13, 3) - 4.333).abs() < 0.001);
    }
}
