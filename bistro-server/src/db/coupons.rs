//! Coupon database operations

use shared::error::{AppError, ErrorCode};
use shared::models::{Coupon, CouponDraft, CouponUpdate, DiscountType};
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::error::{ServiceResult, unique_or_db};

const COLUMNS: &str = "id, code, discount_type, discount_value, min_order, max_uses, \
                       used_count, expires_at, is_active, created_at";

#[derive(sqlx::FromRow)]
struct CouponRow {
    id: i64,
    code: String,
    discount_type: String,
    discount_value: i64,
    min_order: Option<i64>,
    max_uses: Option<i64>,
    used_count: i64,
    expires_at: Option<i64>,
    is_active: bool,
    created_at: i64,
}

impl CouponRow {
    fn into_coupon(self) -> Coupon {
        let discount_type = self.discount_type.parse::<DiscountType>().unwrap_or_else(|_| {
            tracing::warn!(id = self.id, discount_type = %self.discount_type, "Invalid discount_type, defaulting to fixed");
            DiscountType::Fixed
        });

        Coupon {
            id: self.id,
            code: self.code,
            discount_type,
            discount_value: self.discount_value,
            min_order: self.min_order,
            max_uses: self.max_uses,
            used_count: self.used_count,
            expires_at: self.expires_at,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

fn code_taken() -> AppError {
    AppError::new(ErrorCode::CouponCodeExists)
}

pub async fn list(executor: impl PgExecutor<'_>) -> Result<Vec<Coupon>, sqlx::Error> {
    let rows: Vec<CouponRow> =
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM coupons ORDER BY created_at DESC, id DESC"))
            .fetch_all(executor)
            .await?;
    Ok(rows.into_iter().map(CouponRow::into_coupon).collect())
}

/// Look up by already-normalized code
pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Coupon>, sqlx::Error> {
    let row: Option<CouponRow> =
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM coupons WHERE code = $1"))
            .bind(code)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(CouponRow::into_coupon))
}

pub async fn create(pool: &PgPool, draft: &CouponDraft, now: i64) -> ServiceResult<Coupon> {
    let row: CouponRow = sqlx::query_as(&format!(
        r#"
        INSERT INTO coupons (
            code, discount_type, discount_value, min_order, max_uses,
            used_count, expires_at, is_active, created_at
        )
        VALUES ($1, $2, $3, $4, $5, 0, $6, $7, $8)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&draft.code)
    .bind(draft.discount_type.as_str())
    .bind(draft.discount_value)
    .bind(draft.min_order)
    .bind(draft.max_uses)
    .bind(draft.expires_at)
    .bind(draft.is_active)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| unique_or_db(e, code_taken()))?;
    Ok(row.into_coupon())
}

async fn lock(tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<Option<Coupon>, sqlx::Error> {
    let row: Option<CouponRow> =
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM coupons WHERE id = $1 FOR UPDATE"))
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
    Ok(row.map(CouponRow::into_coupon))
}

/// Apply a partial update, validated against the merged coupon
pub async fn update(pool: &PgPool, id: i64, patch: CouponUpdate) -> ServiceResult<Coupon> {
    let mut tx = pool.begin().await?;

    let current = lock(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CouponNotFound))?;

    let draft = patch.apply_to(&current).validate()?;

    let row: CouponRow = sqlx::query_as(&format!(
        r#"
        UPDATE coupons SET
            code = $2, discount_type = $3, discount_value = $4, min_order = $5,
            max_uses = $6, expires_at = $7, is_active = $8
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&draft.code)
    .bind(draft.discount_type.as_str())
    .bind(draft.discount_value)
    .bind(draft.min_order)
    .bind(draft.max_uses)
    .bind(draft.expires_at)
    .bind(draft.is_active)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| unique_or_db(e, code_taken()))?;

    tx.commit().await?;
    Ok(row.into_coupon())
}

/// Returns `false` when nothing was deleted
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM coupons WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Record one use of a coupon.
///
/// A single conditional update re-checks the whole gate, so concurrent
/// redemptions cannot push `used_count` past `max_uses`. `None` means the
/// coupon did not pass the gate at that instant.
pub async fn redeem(
    pool: &PgPool,
    code: &str,
    order_value: f64,
    now: i64,
) -> Result<Option<Coupon>, sqlx::Error> {
    let row: Option<CouponRow> = sqlx::query_as(&format!(
        r#"
        UPDATE coupons SET used_count = used_count + 1
        WHERE code = $1
          AND is_active
          AND (expires_at IS NULL OR expires_at >= $3)
          AND (min_order IS NULL OR $2::DOUBLE PRECISION >= min_order)
          AND (max_uses IS NULL OR used_count < max_uses)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(code)
    .bind(order_value)
    .bind(now)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(CouponRow::into_coupon))
}
