//! Dashboard aggregates

use shared::models::{
    Analytics, CouponStats, MenuStats, ReviewStats, TOP_FEATURED_LIMIT, average_rating,
};
use sqlx::PgPool;

use super::menu_items;

pub async fn summary(pool: &PgPool) -> Result<Analytics, sqlx::Error> {
    let (total, available, featured): (i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE available), COUNT(*) FILTER (WHERE featured)
         FROM menu_items",
    )
    .fetch_one(pool)
    .await?;

    let (reviews_total, approved, rating_sum): (i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_approved),
                COALESCE(SUM(rating) FILTER (WHERE is_approved), 0)::BIGINT
         FROM reviews",
    )
    .fetch_one(pool)
    .await?;

    let (coupons_total, active): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COUNT(*) FILTER (WHERE is_active) FROM coupons")
            .fetch_one(pool)
            .await?;

    let top_items = menu_items::top_featured(pool, TOP_FEATURED_LIMIT).await?;

    Ok(Analytics {
        menu_items: MenuStats {
            total,
            available,
            featured,
        },
        reviews: ReviewStats {
            total: reviews_total,
            approved,
            average_rating: average_rating(rating_sum, approved),
        },
        coupons: CouponStats {
            total: coupons_total,
            active,
        },
        top_items,
    })
}
