//! Coupon Model

use super::serde_helpers::{bool_true, double_option};
use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Max coupon code length
pub const MAX_COUPON_CODE_LEN: usize = 50;

/// Discount type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }
}

impl FromStr for DiscountType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            _ => Err(()),
        }
    }
}

/// Coupon entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: i64,
    /// Stored trimmed + uppercase
    pub code: String,
    pub discount_type: DiscountType,
    /// Percent (10 = 10%) or fixed amount in RSD
    pub discount_value: i64,
    pub min_order: Option<i64>,
    /// None = unlimited
    pub max_uses: Option<i64>,
    pub used_count: i64,
    /// Expiry (Unix millis)
    pub expires_at: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
}

/// Why a coupon cannot be applied to an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CouponRejection {
    #[error("Coupon is not active")]
    Inactive,
    #[error("Coupon has expired")]
    Expired,
    #[error("Order value is below the coupon minimum of {min_order}")]
    BelowMinimumOrder { min_order: i64 },
    #[error("Coupon usage limit has been reached")]
    UsageLimitReached,
}

impl CouponRejection {
    /// Machine-readable reason tag
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Expired => "expired",
            Self::BelowMinimumOrder { .. } => "below_minimum_order",
            Self::UsageLimitReached => "usage_limit_reached",
        }
    }
}

impl Coupon {
    /// Redemption gate. Pure: depends only on the coupon, the order value
    /// and the clock.
    pub fn check(&self, order_value: f64, now: i64) -> Result<(), CouponRejection> {
        if !self.is_active {
            return Err(CouponRejection::Inactive);
        }
        if let Some(expires_at) = self.expires_at
            && expires_at < now
        {
            return Err(CouponRejection::Expired);
        }
        if let Some(min_order) = self.min_order
            && order_value < min_order as f64
        {
            return Err(CouponRejection::BelowMinimumOrder { min_order });
        }
        if let Some(max_uses) = self.max_uses
            && self.used_count >= max_uses
        {
            return Err(CouponRejection::UsageLimitReached);
        }
        Ok(())
    }

    /// Discount in whole RSD this coupon takes off `order_value`
    pub fn discount_amount(&self, order_value: f64) -> i64 {
        let ceiling = order_value.max(0.0).floor() as i64;
        let amount = match self.discount_type {
            DiscountType::Percentage => {
                (order_value.max(0.0) * self.discount_value as f64 / 100.0).round() as i64
            }
            DiscountType::Fixed => self.discount_value,
        };
        amount.clamp(0, ceiling)
    }
}

/// Canonical form of a coupon code
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Create coupon payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponCreate {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub discount_type: String,
    #[serde(default)]
    pub discount_value: i64,
    pub min_order: Option<i64>,
    pub max_uses: Option<i64>,
    pub expires_at: Option<i64>,
    #[serde(default = "default_true", deserialize_with = "bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Update coupon payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponUpdate {
    pub code: Option<String>,
    pub discount_type: Option<String>,
    pub discount_value: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub min_order: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub max_uses: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub expires_at: Option<Option<i64>>,
    pub is_active: Option<bool>,
}

/// A validated coupon definition, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponDraft {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_order: Option<i64>,
    pub max_uses: Option<i64>,
    pub expires_at: Option<i64>,
    pub is_active: bool,
}

impl CouponCreate {
    pub fn validate(&self) -> Result<CouponDraft, ValidationErrors> {
        let mut errs = ValidationErrors::new();

        let code = normalize_code(&self.code);
        errs.require_text(&code, "code", "Coupon code", MAX_COUPON_CODE_LEN);

        let discount_type = self.discount_type.trim().parse::<DiscountType>().ok();
        match discount_type {
            None => errs.add(
                "discountType",
                "Discount type must be 'percentage' or 'fixed'",
            ),
            Some(DiscountType::Percentage) if !(1..=100).contains(&self.discount_value) => errs
                .add(
                    "discountValue",
                    "Percentage discount must be between 1 and 100",
                ),
            Some(DiscountType::Fixed) if self.discount_value < 1 => {
                errs.add("discountValue", "Fixed discount must be greater than 0")
            }
            Some(_) => {}
        }

        if self.min_order.is_some_and(|m| m < 0) {
            errs.add("minOrder", "Minimum order cannot be negative");
        }
        if self.max_uses.is_some_and(|m| m < 1) {
            errs.add("maxUses", "Max uses must be at least 1");
        }

        errs.into_result()?;

        let Some(discount_type) = discount_type else {
            let mut errs = ValidationErrors::new();
            errs.add(
                "discountType",
                "Discount type must be 'percentage' or 'fixed'",
            );
            return Err(errs);
        };

        Ok(CouponDraft {
            code,
            discount_type,
            discount_value: self.discount_value,
            min_order: self.min_order,
            max_uses: self.max_uses,
            expires_at: self.expires_at,
            is_active: self.is_active,
        })
    }
}

impl CouponUpdate {
    /// Merge this patch onto the stored coupon
    pub fn apply_to(self, current: &Coupon) -> CouponCreate {
        CouponCreate {
            code: self.code.unwrap_or_else(|| current.code.clone()),
            discount_type: self
                .discount_type
                .unwrap_or_else(|| current.discount_type.as_str().to_string()),
            discount_value: self.discount_value.unwrap_or(current.discount_value),
            min_order: self.min_order.unwrap_or(current.min_order),
            max_uses: self.max_uses.unwrap_or(current.max_uses),
            expires_at: self.expires_at.unwrap_or(current.expires_at),
            is_active: self.is_active.unwrap_or(current.is_active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: i64 = 1_750_000_000_000;

    fn summer10() -> Coupon {
        Coupon {
            id: 1,
            code: "SUMMER10".into(),
            discount_type: DiscountType::Percentage,
            discount_value: 10,
            min_order: Some(1000),
            max_uses: Some(3),
            used_count: 0,
            expires_at: None,
            is_active: true,
            created_at: 0,
        }
    }

    #[test]
    fn test_check_accepts_valid_order() {
        assert_eq!(summer10().check(1500.0, NOW), Ok(()));
        assert_eq!(summer10().check(1000.0, NOW), Ok(()));
    }

    #[test]
    fn test_check_below_minimum() {
        assert_eq!(
            summer10().check(500.0, NOW),
            Err(CouponRejection::BelowMinimumOrder { min_order: 1000 })
        );
    }

    #[test]
    fn test_check_inactive_wins() {
        let coupon = Coupon {
            is_active: false,
            expires_at: Some(NOW - 1),
            ..summer10()
        };
        assert_eq!(coupon.check(5000.0, NOW), Err(CouponRejection::Inactive));
    }

    #[test]
    fn test_check_expired() {
        let coupon = Coupon {
            expires_at: Some(NOW - 1),
            ..summer10()
        };
        assert_eq!(coupon.check(5000.0, NOW), Err(CouponRejection::Expired));

        let coupon = Coupon {
            expires_at: Some(NOW),
            ..summer10()
        };
        assert_eq!(coupon.check(5000.0, NOW), Ok(()));
    }

    #[test]
    fn test_check_usage_limit() {
        let coupon = Coupon {
            used_count: 3,
            ..summer10()
        };
        assert_eq!(
            coupon.check(5000.0, NOW),
            Err(CouponRejection::UsageLimitReached)
        );

        let unlimited = Coupon {
            max_uses: None,
            used_count: 10_000,
            ..summer10()
        };
        assert_eq!(unlimited.check(5000.0, NOW), Ok(()));
    }

    #[test]
    fn test_discount_amount() {
        assert_eq!(summer10().discount_amount(1500.0), 150);
        let fixed = Coupon {
            discount_type: DiscountType::Fixed,
            discount_value: 300,
            ..summer10()
        };
        assert_eq!(fixed.discount_amount(1500.0), 300);
        assert_eq!(fixed.discount_amount(200.0), 200);
    }

    #[test]
    fn test_fractional_order_value() {
        assert_eq!(summer10().check(1250.5, NOW), Ok(()));
        assert_eq!(
            summer10().check(999.99, NOW),
            Err(CouponRejection::BelowMinimumOrder { min_order: 1000 })
        );
        assert_eq!(summer10().discount_amount(1250.5), 125);

        let fixed = Coupon {
            discount_type: DiscountType::Fixed,
            discount_value: 300,
            ..summer10()
        };
        assert_eq!(fixed.discount_amount(120.75), 120);
    }

    #[test]
    fn test_create_normalizes_code() {
        let draft = CouponCreate {
            code: "  summer10 ".into(),
            discount_type: "percentage".into(),
            discount_value: 10,
            is_active: true,
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(draft.code, "SUMMER10");
        assert_eq!(draft.discount_type, DiscountType::Percentage);
    }

    #[test]
    fn test_create_discount_bounds() {
        let pct = |v| CouponCreate {
            code: "X".into(),
            discount_type: "percentage".into(),
            discount_value: v,
            ..Default::default()
        };
        assert!(pct(0).validate().is_err());
        assert!(pct(1).validate().is_ok());
        assert!(pct(100).validate().is_ok());
        assert!(pct(101).validate().is_err());

        let fixed = CouponCreate {
            code: "X".into(),
            discount_type: "fixed".into(),
            discount_value: 0,
            ..Default::default()
        };
        let errs = fixed.validate().unwrap_err();
        assert!(errs.has_field("discountValue"));
    }

    #[test]
    fn test_create_rejects_bad_type_and_limits() {
        let errs = CouponCreate {
            code: " ".into(),
            discount_type: "bogo".into(),
            discount_value: 5,
            min_order: Some(-1),
            max_uses: Some(0),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(errs.has_field("code"));
        assert!(errs.has_field("discountType"));
        assert!(errs.has_field("minOrder"));
        assert!(errs.has_field("maxUses"));
    }

    #[test]
    fn test_update_merges_and_revalidates() {
        let patch: CouponUpdate =
            serde_json::from_value(json!({"discountValue": 150, "maxUses": null})).unwrap();
        let merged = patch.apply_to(&summer10());
        assert_eq!(merged.max_uses, None);
        assert_eq!(merged.min_order, Some(1000));
        assert!(merged.validate().is_err());

        let patch: CouponUpdate =
            serde_json::from_value(json!({"discountType": "fixed", "discountValue": 150}))
                .unwrap();
        let draft = patch.apply_to(&summer10()).validate().unwrap();
        assert_eq!(draft.discount_type, DiscountType::Fixed);
        assert_eq!(draft.code, "SUMMER10");
    }
}
