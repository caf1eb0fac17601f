//! Full export of every collection

use shared::models::Backup;
use sqlx::{PgPool, Postgres, Transaction};

use super::{coupons, gallery, menu_items, reviews, site_content};

/// Open a read-only transaction that sees one snapshot for all its reads
async fn begin_snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

pub async fn export(pool: &PgPool) -> Result<Backup, sqlx::Error> {
    let mut tx = begin_snapshot(pool).await?;

    let menu_items = menu_items::list(&mut *tx, false).await?;
    let gallery_images = gallery::list(&mut *tx).await?;
    let site_content = site_content::list(&mut *tx)
        .await?
        .into_iter()
        .map(|entry| (entry.key, entry.value))
        .collect();
    let coupons = coupons::list(&mut *tx).await?;
    let reviews = reviews::list(&mut *tx, true).await?;

    tx.commit().await?;

    Ok(Backup {
        menu_items,
        gallery_images,
        site_content,
        coupons,
        reviews,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;

    #[tokio::test]
    async fn test_snapshot_is_read_only() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let mut tx = begin_snapshot(&pool).await.unwrap();
        let err = sqlx::query("INSERT INTO settings (key, value) VALUES ('snapshot_write', 'x')")
            .execute(&mut *tx)
            .await
            .unwrap_err();
        // read_only_sql_transaction
        assert_eq!(
            err.as_database_error().and_then(|e| e.code()).as_deref(),
            Some("25006")
        );
    }

    #[tokio::test]
    async fn test_snapshot_ignores_concurrent_writes() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let key = format!("snapshot_{}", uuid::Uuid::new_v4().simple());

        let mut tx = begin_snapshot(&pool).await.unwrap();
        let before = site_content::list(&mut *tx).await.unwrap();

        site_content::upsert(&pool, &key, "late", shared::util::now_millis())
            .await
            .unwrap();

        let after = site_content::list(&mut *tx).await.unwrap();
        assert_eq!(before.len(), after.len());
        assert!(after.iter().all(|entry| entry.key != key));
        tx.commit().await.unwrap();

        let exported = export(&pool).await.unwrap();
        assert_eq!(exported.site_content.get(&key).map(String::as_str), Some("late"));
    }
}
