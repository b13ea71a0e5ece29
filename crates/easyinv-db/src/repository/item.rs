//! # Item Repository
//!
//! Database operations for catalog items.
//!
//! ## The Tombstone/Resurrection Scheme
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 add_item() decision tree                                │
//! │                                                                         │
//! │  SELECT id, active FROM items WHERE sku = ?                            │
//! │       │                                                                 │
//! │       ├── row found, active = 1                                        │
//! │       │        └──► Err(DuplicateSku) - never a second row            │
//! │       │                                                                 │
//! │       ├── row found, active = 0  (tombstone)                           │
//! │       │        └──► UPDATE in place: all fields overwritten,           │
//! │       │             active = 1, created_at refreshed.                  │
//! │       │             Returns the ORIGINAL id - past sales keep their    │
//! │       │             weak references intact.                            │
//! │       │                                                                 │
//! │       └── no row                                                       │
//! │                └──► INSERT, return the new rowid                       │
//! │                                                                         │
//! │  "no row" and "inactive row" are different states; collapsing them    │
//! │  into a hard unique-or-fail insert would break resurrection.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use easyinv_core::{restock, validation, Item, ItemUpdate, NewItem, ProviderStockLine, ReorderLine};

/// Every item read joins the provider name in; the column list is shared so
/// the `Item` record always maps one-to-one.
const ITEM_COLUMNS: &str = "
    i.id, i.sku, i.name, i.description,
    i.price_public_cents, i.price_wholesale_cents, i.price_distributor_cents,
    i.stock, i.min_stock, i.max_stock, i.location,
    i.provider_id, i.active, i.created_at,
    p.name AS provider_name
";

/// Repository for item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Creates an item, or resurrects a soft-deleted one with the same SKU.
    ///
    /// ## Returns
    /// * `Ok(id)` - the new rowid, or the *original* rowid on resurrection
    /// * `Err(DbError::DuplicateSku)` - an active item already owns this SKU
    ///
    /// The lookup and the branch run inside one transaction so the decision
    /// cannot be invalidated between the SELECT and the write.
    pub async fn add_item(&self, item: &NewItem) -> DbResult<i64> {
        validation::validate_new_item(item)?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let existing: Option<(i64, bool)> =
            sqlx::query_as("SELECT id, active FROM items WHERE sku = ?1")
                .bind(&item.sku)
                .fetch_optional(&mut *tx)
                .await?;

        match existing {
            Some((id, true)) => {
                debug!(sku = %item.sku, id = id, "Rejecting duplicate active SKU");
                Err(DbError::duplicate_sku(&item.sku))
            }

            Some((id, false)) => {
                debug!(sku = %item.sku, id = id, "Resurrecting soft-deleted item");

                sqlx::query(
                    r#"
                    UPDATE items SET
                        name = ?2,
                        description = ?3,
                        price_public_cents = ?4,
                        price_wholesale_cents = ?5,
                        price_distributor_cents = ?6,
                        stock = ?7,
                        min_stock = ?8,
                        max_stock = ?9,
                        location = ?10,
                        provider_id = ?11,
                        active = 1,
                        created_at = ?12
                    WHERE id = ?1
                    "#,
                )
                .bind(id)
                .bind(&item.name)
                .bind(&item.description)
                .bind(item.price_public_cents)
                .bind(item.price_wholesale_cents)
                .bind(item.price_distributor_cents)
                .bind(item.stock)
                .bind(item.min_stock)
                .bind(item.max_stock)
                .bind(&item.location)
                .bind(item.provider_id)
                .bind(now)
                .execute(&mut *tx)
                .await?;

                tx.commit().await?;
                Ok(id)
            }

            None => {
                debug!(sku = %item.sku, "Inserting new item");

                let result = sqlx::query(
                    r#"
                    INSERT INTO items (
                        sku, name, description,
                        price_public_cents, price_wholesale_cents, price_distributor_cents,
                        stock, min_stock, max_stock, location,
                        provider_id, active, created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 1, ?12)
                    "#,
                )
                .bind(&item.sku)
                .bind(&item.name)
                .bind(&item.description)
                .bind(item.price_public_cents)
                .bind(item.price_wholesale_cents)
                .bind(item.price_distributor_cents)
                .bind(item.stock)
                .bind(item.min_stock)
                .bind(item.max_stock)
                .bind(&item.location)
                .bind(item.provider_id)
                .bind(now)
                .execute(&mut *tx)
                .await?;

                let id = result.last_insert_rowid();
                tx.commit().await?;
                Ok(id)
            }
        }
    }

    /// Unconditionally overwrites an item's mutable fields by id.
    ///
    /// The SKU is not touched (immutable post-creation by convention), and
    /// neither are `active` / `created_at`.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no row with this id
    pub async fn update_item(&self, id: i64, update: &ItemUpdate) -> DbResult<()> {
        validation::validate_item_update(update)?;
        debug!(id = id, "Updating item");

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                description = ?3,
                price_public_cents = ?4,
                price_wholesale_cents = ?5,
                price_distributor_cents = ?6,
                stock = ?7,
                min_stock = ?8,
                max_stock = ?9,
                location = ?10,
                provider_id = ?11
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.price_public_cents)
        .bind(update.price_wholesale_cents)
        .bind(update.price_distributor_cents)
        .bind(update.stock)
        .bind(update.min_stock)
        .bind(update.max_stock)
        .bind(&update.location)
        .bind(update.provider_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Adjusts stock by a relative delta (negative for sales outside the
    /// ledger path, positive for restocking and import top-ups).
    pub async fn adjust_stock(&self, id: i64, delta: i64) -> DbResult<()> {
        debug!(id = id, delta = delta, "Adjusting stock");

        let result = sqlx::query("UPDATE items SET stock = stock + ?2 WHERE id = ?1")
            .bind(id)
            .bind(delta)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    /// Soft-deletes an item by SKU.
    ///
    /// ## Returns
    /// Whether a row was affected. Deleting twice is a no-op reported as
    /// `Ok(false)`, not an error.
    pub async fn delete_by_sku(&self, sku: &str) -> DbResult<bool> {
        debug!(sku = %sku, "Soft-deleting item");

        // The active filter matters for the return value: SQLite counts a
        // matched row as affected even when nothing changes, so deleting an
        // already-dead SKU would otherwise report true
        let result = sqlx::query("UPDATE items SET active = 0 WHERE sku = ?1 AND active = 1")
            .bind(sku)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Gets an item by id, active or not.
    ///
    /// No active filter: the sale detail view resolves historical references
    /// to soft-deleted items through this lookup.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Item>> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM items i \
             LEFT JOIN providers p ON i.provider_id = p.id \
             WHERE i.id = ?1"
        );

        let item = sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Gets an item by SKU, active or not.
    ///
    /// The bulk importer branches on `active` to decide between overwrite
    /// and resurrection.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<Item>> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM items i \
             LEFT JOIN providers p ON i.provider_id = p.id \
             WHERE i.sku = ?1"
        );

        let item = sqlx::query_as::<_, Item>(&query)
            .bind(sku)
            .fetch_optional(&self.pool)
            .await?;

        Ok(item)
    }

    /// Lists active items, newest first.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Item>> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM items i \
             LEFT JOIN providers p ON i.provider_id = p.id \
             WHERE i.active = 1 \
             ORDER BY i.id DESC LIMIT ?1"
        );

        let items = sqlx::query_as::<_, Item>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    /// Lists one provider's active items with the restock advisor's
    /// suggestion attached, ordered by name.
    pub async fn list_by_provider(&self, provider_id: i64) -> DbResult<Vec<ProviderStockLine>> {
        let rows: Vec<(i64, String, String, i64, i64, i64)> = sqlx::query_as(
            r#"
            SELECT id, sku, name, stock, min_stock, max_stock
            FROM items
            WHERE provider_id = ?1 AND active = 1
            ORDER BY name ASC
            "#,
        )
        .bind(provider_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, sku, name, stock, min_stock, max_stock)| {
                restock::provider_stock_line(id, sku, name, stock, min_stock, max_stock)
            })
            .collect())
    }

    /// Lists active items at or below their reorder threshold, left-joined
    /// to their provider, ordered by provider name then item name.
    ///
    /// Feeds the reorder CSV report.
    pub async fn list_needing_reorder(&self) -> DbResult<Vec<ReorderLine>> {
        let rows: Vec<(String, String, Option<String>, i64, i64, i64)> = sqlx::query_as(
            r#"
            SELECT i.sku, i.name, p.name AS provider_name,
                   i.stock, i.min_stock, i.max_stock
            FROM items i
            LEFT JOIN providers p ON i.provider_id = p.id
            WHERE i.active = 1 AND i.stock <= i.min_stock
            ORDER BY p.name ASC, i.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(sku, name, provider_name, stock, min_stock, max_stock)| {
                restock::reorder_line(sku, name, provider_name, stock, min_stock, max_stock)
            })
            .collect())
    }

    /// Counts active items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn widget(sku: &str) -> NewItem {
        NewItem {
            sku: sku.to_string(),
            name: "Widget".to_string(),
            description: Some("A widget".to_string()),
            price_public_cents: 1000,
            price_wholesale_cents: 900,
            price_distributor_cents: 800,
            stock: 10,
            min_stock: 2,
            max_stock: 20,
            location: "A-1".to_string(),
            provider_id: None,
        }
    }

    #[tokio::test]
    async fn test_add_and_get_item() {
        let db = test_db().await;
        let repo = db.items();

        let id = repo.add_item(&widget("W-1")).await.unwrap();
        let item = repo.get_by_id(id).await.unwrap().unwrap();

        assert_eq!(item.sku, "W-1");
        assert_eq!(item.price_public_cents, 1000);
        assert!(item.active);
        assert!(item.provider_name.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_active_sku_rejected() {
        let db = test_db().await;
        let repo = db.items();

        repo.add_item(&widget("W-1")).await.unwrap();
        let err = repo.add_item(&widget("W-1")).await.unwrap_err();

        assert!(matches!(err, DbError::DuplicateSku { sku } if sku == "W-1"));
    }

    #[tokio::test]
    async fn test_resurrection_reuses_row() {
        let db = test_db().await;
        let repo = db.items();

        let original_id = repo.add_item(&widget("W-1")).await.unwrap();
        assert!(repo.delete_by_sku("W-1").await.unwrap());

        // Second add with the same SKU must reuse the tombstoned row
        let mut replacement = widget("W-1");
        replacement.name = "Widget v2".to_string();
        replacement.stock = 3;
        let new_id = repo.add_item(&replacement).await.unwrap();

        assert_eq!(new_id, original_id);

        let item = repo.get_by_id(original_id).await.unwrap().unwrap();
        assert!(item.active);
        assert_eq!(item.name, "Widget v2");
        assert_eq!(item.stock, 3);

        // Still exactly one row for this SKU
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE sku = 'W-1'")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_soft_delete_is_idempotent() {
        let db = test_db().await;
        let repo = db.items();

        repo.add_item(&widget("W-1")).await.unwrap();

        assert!(repo.delete_by_sku("W-1").await.unwrap());
        // Second delete: nothing affected, not an error
        assert!(!repo.delete_by_sku("W-1").await.unwrap());
        // Unknown SKU behaves the same
        assert!(!repo.delete_by_sku("NOPE").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters_inactive_but_get_by_id_does_not() {
        let db = test_db().await;
        let repo = db.items();

        let id = repo.add_item(&widget("W-1")).await.unwrap();
        repo.add_item(&widget("W-2")).await.unwrap();
        repo.delete_by_sku("W-1").await.unwrap();

        let listed = repo.list(100).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].sku, "W-2");

        // Historical lookup still resolves the tombstone
        let hidden = repo.get_by_id(id).await.unwrap().unwrap();
        assert!(!hidden.active);
    }

    #[tokio::test]
    async fn test_update_item_overwrites_fields() {
        let db = test_db().await;
        let repo = db.items();

        let id = repo.add_item(&widget("W-1")).await.unwrap();

        let mut update: ItemUpdate = widget("W-1").into();
        update.name = "Renamed".to_string();
        update.stock = 99;
        repo.update_item(id, &update).await.unwrap();

        let item = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(item.name, "Renamed");
        assert_eq!(item.stock, 99);
        assert_eq!(item.sku, "W-1"); // untouched
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let db = test_db().await;
        let repo = db.items();

        let update: ItemUpdate = widget("W-1").into();
        let err = repo.update_item(4242, &update).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_by_provider_attaches_restock_qty() {
        let db = test_db().await;
        let provider_id = db
            .providers()
            .add("Acme Parts", Some("555-0100"))
            .await
            .unwrap();

        let repo = db.items();
        let mut low = widget("LOW");
        low.provider_id = Some(provider_id);
        low.stock = 5;
        low.max_stock = 50;
        repo.add_item(&low).await.unwrap();

        let mut unbanded = widget("NOBAND");
        unbanded.provider_id = Some(provider_id);
        unbanded.stock = 1;
        unbanded.max_stock = 0;
        repo.add_item(&unbanded).await.unwrap();

        let lines = repo.list_by_provider(provider_id).await.unwrap();
        assert_eq!(lines.len(), 2);

        let low_line = lines.iter().find(|l| l.sku == "LOW").unwrap();
        assert_eq!(low_line.restock_qty, 45);

        let unbanded_line = lines.iter().find(|l| l.sku == "NOBAND").unwrap();
        assert_eq!(unbanded_line.restock_qty, 0);
    }

    #[tokio::test]
    async fn test_reorder_list_filters_and_sorts() {
        let db = test_db().await;
        let repo = db.items();

        let mut needs = widget("NEEDS");
        needs.stock = 1;
        needs.min_stock = 5;
        needs.max_stock = 10;
        repo.add_item(&needs).await.unwrap();

        let mut fine = widget("FINE");
        fine.stock = 50;
        fine.min_stock = 5;
        repo.add_item(&fine).await.unwrap();

        let lines = repo.list_needing_reorder().await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].sku, "NEEDS");
        assert_eq!(lines[0].to_order, 9);
    }
}
