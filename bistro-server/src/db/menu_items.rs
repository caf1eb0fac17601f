//! Menu item database operations

use shared::error::{AppError, ErrorCode};
use shared::models::{Category, MenuItem, MenuItemDraft, MenuItemUpdate, ProductSize};
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::error::ServiceResult;

const COLUMNS: &str = "id, name, description, category, price, price32, price42, sizes, \
                       image_url, available, featured, is_new, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: i64,
    name: String,
    description: String,
    category: String,
    price: Option<i64>,
    price32: Option<i64>,
    price42: Option<i64>,
    sizes: Option<Json<Vec<ProductSize>>>,
    image_url: Option<String>,
    available: bool,
    featured: bool,
    is_new: bool,
    created_at: i64,
    updated_at: i64,
}

impl MenuItemRow {
    fn into_menu_item(self) -> MenuItem {
        let category = self.category.parse::<Category>().unwrap_or_else(|e| {
            tracing::warn!(id = self.id, error = %e, "Invalid stored category, defaulting to main_course");
            Category::MainCourse
        });

        MenuItem {
            id: self.id,
            name: self.name,
            description: self.description,
            category,
            price: self.price,
            price32: self.price32,
            price42: self.price42,
            sizes: self.sizes.map(|Json(s)| s),
            image_url: self.image_url,
            available: self.available,
            featured: self.featured,
            is_new: self.is_new,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn into_items(rows: Vec<MenuItemRow>) -> Vec<MenuItem> {
    rows.into_iter().map(MenuItemRow::into_menu_item).collect()
}

pub async fn list(
    executor: impl PgExecutor<'_>,
    available_only: bool,
) -> Result<Vec<MenuItem>, sqlx::Error> {
    let rows: Vec<MenuItemRow> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM menu_items WHERE ($1 = FALSE OR available) ORDER BY id"
    ))
    .bind(available_only)
    .fetch_all(executor)
    .await?;
    Ok(into_items(rows))
}

/// Featured and available
pub async fn list_featured(pool: &PgPool) -> Result<Vec<MenuItem>, sqlx::Error> {
    let rows: Vec<MenuItemRow> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM menu_items WHERE featured AND available ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(into_items(rows))
}

/// Available items of one category
pub async fn list_by_category(
    pool: &PgPool,
    category: Category,
) -> Result<Vec<MenuItem>, sqlx::Error> {
    let rows: Vec<MenuItemRow> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM menu_items WHERE category = $1 AND available ORDER BY id"
    ))
    .bind(category.as_str())
    .fetch_all(pool)
    .await?;
    Ok(into_items(rows))
}

/// Featured items regardless of availability, for the dashboard
pub async fn top_featured(pool: &PgPool, limit: i64) -> Result<Vec<MenuItem>, sqlx::Error> {
    let rows: Vec<MenuItemRow> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM menu_items WHERE featured ORDER BY id LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(into_items(rows))
}

pub async fn create(
    pool: &PgPool,
    draft: &MenuItemDraft,
    now: i64,
) -> Result<MenuItem, sqlx::Error> {
    let row: MenuItemRow = sqlx::query_as(&format!(
        r#"
        INSERT INTO menu_items (
            name, description, category, price, price32, price42, sizes,
            image_url, available, featured, is_new, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, NULL, NULL, $5, $6, $7, $8, $9, $10, $10)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&draft.name)
    .bind(&draft.description)
    .bind(draft.category.as_str())
    .bind(draft.pricing.price())
    .bind(draft.pricing.sizes().map(Json))
    .bind(&draft.image_url)
    .bind(draft.available)
    .bind(draft.featured)
    .bind(draft.is_new)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row.into_menu_item())
}

async fn lock(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
) -> Result<Option<MenuItem>, sqlx::Error> {
    let row: Option<MenuItemRow> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM menu_items WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;
    Ok(row.map(MenuItemRow::into_menu_item))
}

/// Apply a partial update.
///
/// The stored row is locked, the patch merged onto it and the merged item
/// re-validated before anything is written. Legacy size columns are always
/// cleared.
pub async fn update(
    pool: &PgPool,
    id: i64,
    patch: MenuItemUpdate,
    now: i64,
) -> ServiceResult<MenuItem> {
    let mut tx = pool.begin().await?;

    let current = lock(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;

    let draft = patch.apply_to(&current).validate()?;

    let row: MenuItemRow = sqlx::query_as(&format!(
        r#"
        UPDATE menu_items SET
            name = $2, description = $3, category = $4, price = $5,
            price32 = NULL, price42 = NULL, sizes = $6, image_url = $7,
            available = $8, featured = $9, is_new = $10, updated_at = $11
        WHERE id = $1
        RETURNING {COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&draft.name)
    .bind(&draft.description)
    .bind(draft.category.as_str())
    .bind(draft.pricing.price())
    .bind(draft.pricing.sizes().map(Json))
    .bind(&draft.image_url)
    .bind(draft.available)
    .bind(draft.featured)
    .bind(draft.is_new)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row.into_menu_item())
}

/// Returns `false` when nothing was deleted
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
