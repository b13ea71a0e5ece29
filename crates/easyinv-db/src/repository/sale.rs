//! # Sale Repository
//!
//! The atomic sale ledger.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     register_sale() - one transaction                   │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ├─ INSERT sales (title, client_id, total, payment_method, ts)       │
//! │    │       total is computed HERE, from the lines. The caller          │
//! │    │       cannot supply one - there is no parameter for it.           │
//! │    │                                                                    │
//! │    ├─ for each line:                                                   │
//! │    │     UPDATE items SET stock = stock - qty WHERE id = ?             │
//! │    │        └── 0 rows affected → the item id vanished → FAIL          │
//! │    │     INSERT sale_items (sale_id, item_id, item_name, qty, price)   │
//! │    │                                                                    │
//! │  COMMIT ──► Ok(sale_id)                                                │
//! │                                                                         │
//! │  any error ──► ROLLBACK (tx dropped) ──► Err(SaleRegistration)         │
//! │               no header, no lines, no stock change                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock sufficiency is NOT re-checked inside the transaction; the caller
//! validates against a recent read, and a concurrent oversell leaves a
//! negative stock count rather than a lost sale.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use easyinv_core::{validation, NewSale, Sale, SaleDetailLine, SaleLineItem, DEFAULT_SALE_TITLE};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Registers a sale: header, line items, and stock decrements, all or
    /// nothing.
    ///
    /// ## Returns
    /// * `Ok(sale_id)` - everything committed
    /// * `Err(DbError::SaleRegistration)` - rolled back; the source error
    ///   says what went wrong
    pub async fn register_sale(&self, new_sale: &NewSale) -> DbResult<i64> {
        validation::validate_new_sale(new_sale)
            .map_err(|e| DbError::sale_registration(DbError::Validation(e)))?;

        let title = if new_sale.title.trim().is_empty() {
            DEFAULT_SALE_TITLE
        } else {
            new_sale.title.trim()
        };
        let total = new_sale.computed_total();

        debug!(
            lines = new_sale.lines.len(),
            total_cents = total.cents(),
            "Registering sale"
        );

        match self.register_in_tx(title, new_sale, total.cents()).await {
            Ok(sale_id) => {
                info!(sale_id = sale_id, total_cents = total.cents(), "Sale registered");
                Ok(sale_id)
            }
            Err(e) => Err(DbError::sale_registration(e)),
        }
    }

    /// The transactional body. Dropping `tx` on any error path rolls back.
    async fn register_in_tx(&self, title: &str, new_sale: &NewSale, total_cents: i64) -> DbResult<i64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO sales (title, client_id, total_cents, payment_method, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(title)
        .bind(new_sale.client_id)
        .bind(total_cents)
        .bind(&new_sale.payment_method)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let sale_id = result.last_insert_rowid();

        for line in &new_sale.lines {
            let updated = sqlx::query("UPDATE items SET stock = stock - ?1 WHERE id = ?2")
                .bind(line.qty)
                .bind(line.item_id)
                .execute(&mut *tx)
                .await?;

            if updated.rows_affected() == 0 {
                return Err(DbError::not_found("Item", line.item_id));
            }

            sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, item_id, item_name, qty, unit_price_cents)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(sale_id)
            .bind(line.item_id)
            .bind(&line.item_name)
            .bind(line.qty)
            .bind(line.unit_price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(sale_id)
    }

    /// Lists sales, newest first.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT id, title, client_id, total_cents, payment_method, created_at \
             FROM sales ORDER BY id DESC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Gets a sale header by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            "SELECT id, title, client_id, total_cents, payment_method, created_at \
             FROM sales WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Resolves a sale's line items for the detail view.
    ///
    /// The subtotal is computed in the query; the SKU comes from a LEFT JOIN
    /// against `items` and is NULL if the item row is gone (never the case
    /// under soft delete, but the join does not assume that).
    pub async fn details(&self, sale_id: i64) -> DbResult<Vec<SaleDetailLine>> {
        let lines = sqlx::query_as::<_, SaleDetailLine>(
            r#"
            SELECT si.item_name, si.qty, si.unit_price_cents,
                   si.qty * si.unit_price_cents AS subtotal_cents,
                   i.sku AS sku
            FROM sale_items si
            LEFT JOIN items i ON si.item_id = i.id
            WHERE si.sale_id = ?1
            ORDER BY si.id ASC
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Returns the raw ledger rows of one sale.
    pub async fn line_items(&self, sale_id: i64) -> DbResult<Vec<SaleLineItem>> {
        let lines = sqlx::query_as::<_, SaleLineItem>(
            "SELECT id, sale_id, item_id, item_name, qty, unit_price_cents \
             FROM sale_items WHERE sale_id = ?1 ORDER BY id ASC",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Lists sales whose calendar date falls in `[start, end]` inclusive,
    /// oldest first. Feeds the sales report.
    pub async fn list_between(&self, start: NaiveDate, end: NaiveDate) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT id, title, client_id, total_cents, payment_method, created_at \
             FROM sales WHERE date(created_at) BETWEEN ?1 AND ?2 ORDER BY id ASC",
        )
        .bind(start.format("%Y-%m-%d").to_string())
        .bind(end.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
