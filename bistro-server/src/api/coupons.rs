//! Coupon endpoints
//!
//! `validate` is the public, read-only gate a checkout calls before showing
//! a discount; `redeem` is the admin-side counterpart that records a use.

use axum::extract::State;
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Coupon, CouponCreate, CouponRejection, CouponUpdate, normalize_code};
use shared::validation::ValidationErrors;

use crate::db;
use crate::state::AppState;

use super::ApiResult;
use super::extract::{Json, Path};

#[derive(Serialize)]
pub struct CouponsPayload {
    pub coupons: Vec<Coupon>,
}

#[derive(Serialize)]
pub struct CouponPayload {
    pub coupon: Coupon,
}

/// A coupon that passed the gate, with what it takes off the order
#[derive(Serialize)]
pub struct AppliedCouponPayload {
    pub coupon: Coupon,
    pub discount: i64,
}

/// Body of `validate` and `redeem`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponCheckRequest {
    #[serde(default)]
    pub code: String,
    /// Any JSON number; RSD
    #[serde(default)]
    pub order_value: f64,
}

impl CouponCheckRequest {
    fn normalized_code(&self) -> Result<String, ValidationErrors> {
        let code = normalize_code(&self.code);
        let mut errs = ValidationErrors::new();
        if code.is_empty() {
            errs.add("code", "Coupon code is required");
        }
        if self.order_value < 0.0 {
            errs.add("orderValue", "Order value cannot be negative");
        }
        errs.into_result().map(|()| code)
    }
}

fn not_valid(reason: &str) -> AppError {
    AppError::new(ErrorCode::CouponNotValid).with_detail("reason", reason)
}

fn rejected(rejection: CouponRejection) -> AppError {
    not_valid(rejection.reason()).with_detail("explanation", rejection.to_string())
}

/// GET /api/coupons
pub async fn list(State(state): State<AppState>) -> ApiResult<CouponsPayload> {
    let coupons = db::coupons::list(&state.pool).await?;
    Ok(ApiResponse::success(CouponsPayload { coupons }))
}

/// POST /api/coupons/validate
pub async fn validate(
    State(state): State<AppState>,
    Json(req): Json<CouponCheckRequest>,
) -> ApiResult<AppliedCouponPayload> {
    let code = req.normalized_code()?;

    let coupon = db::coupons::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| not_valid("not_found"))?;

    coupon
        .check(req.order_value, shared::util::now_millis())
        .map_err(rejected)?;

    let discount = coupon.discount_amount(req.order_value);
    Ok(ApiResponse::success(AppliedCouponPayload { coupon, discount }))
}

/// POST /api/coupons/redeem
pub async fn redeem(
    State(state): State<AppState>,
    Json(req): Json<CouponCheckRequest>,
) -> ApiResult<AppliedCouponPayload> {
    let code = req.normalized_code()?;
    let now = shared::util::now_millis();

    let Some(coupon) = db::coupons::redeem(&state.pool, &code, req.order_value, now).await? else {
        // Explain the refusal from the current row
        let error = match db::coupons::find_by_code(&state.pool, &code).await? {
            None => not_valid("not_found"),
            Some(coupon) => match coupon.check(req.order_value, now) {
                Err(rejection) => rejected(rejection),
                Ok(()) => not_valid("usage_limit_reached"),
            },
        };
        return Err(error.into());
    };

    tracing::info!(code = %coupon.code, used = coupon.used_count, "Coupon redeemed");
    let discount = coupon.discount_amount(req.order_value);
    Ok(ApiResponse::success_with_message(
        "Coupon redeemed",
        AppliedCouponPayload { coupon, discount },
    ))
}

/// POST /api/coupons
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CouponCreate>,
) -> ApiResult<CouponPayload> {
    let draft = req.validate()?;
    let coupon = db::coupons::create(&state.pool, &draft, shared::util::now_millis()).await?;

    tracing::info!(code = %coupon.code, "Coupon created");
    Ok(ApiResponse::success_with_message("Coupon created", CouponPayload { coupon }))
}

/// PUT /api/coupons/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<CouponUpdate>,
) -> ApiResult<CouponPayload> {
    let coupon = db::coupons::update(&state.pool, id, patch).await?;
    Ok(ApiResponse::success_with_message("Coupon updated", CouponPayload { coupon }))
}

/// DELETE /api/coupons/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    if !db::coupons::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::CouponNotFound).into());
    }
    Ok(ApiResponse::ok_with_message("Coupon deleted"))
}
