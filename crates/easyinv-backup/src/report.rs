//! # Reports
//!
//! Two read-only export documents:
//!
//! - **Sales report** - a JSON document of every sale in a date range, each
//!   embedding its resolved line items with computed subtotals.
//! - **Reorder report** - a semicolon-delimited CSV of items at or below
//!   their reorder threshold, with the advisor's quantity-to-order.
//!
//! Neither touches live state; both read through the normal repositories.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::BackupError;
use easyinv_db::Database;

/// One resolved line of a reported sale.
#[derive(Debug, Clone, Serialize)]
pub struct SaleReportLine {
    pub item_name: String,
    pub sku: Option<String>,
    pub qty: i64,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}

/// One sale in the sales report document.
#[derive(Debug, Clone, Serialize)]
pub struct SaleReport {
    pub sale_id: i64,
    pub title: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
    pub total_cents: i64,
    pub items_sold: Vec<SaleReportLine>,
}

/// Builds the sales report for sales dated in `[start, end]` inclusive.
pub async fn export_sales_report(
    db: &Database,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<SaleReport>, BackupError> {
    let sales = db.sales().list_between(start, end).await?;
    let mut report = Vec::with_capacity(sales.len());

    for sale in sales {
        let lines = db.sales().details(sale.id).await?;

        report.push(SaleReport {
            sale_id: sale.id,
            title: sale.title,
            payment_method: sale.payment_method,
            created_at: sale.created_at,
            total_cents: sale.total_cents,
            items_sold: lines
                .into_iter()
                .map(|l| SaleReportLine {
                    item_name: l.item_name,
                    sku: l.sku,
                    qty: l.qty,
                    unit_price_cents: l.unit_price_cents,
                    subtotal_cents: l.subtotal_cents,
                })
                .collect(),
        });
    }

    info!(sales = report.len(), %start, %end, "Sales report built");
    Ok(report)
}

/// Writes the sales report as pretty-printed JSON to `dest`.
///
/// ## Returns
/// The number of sales in the report.
pub async fn write_sales_report(
    db: &Database,
    start: NaiveDate,
    end: NaiveDate,
    dest: &Path,
) -> Result<usize, BackupError> {
    let report = export_sales_report(db, start, end).await?;
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(dest, json)?;

    info!(dest = %dest.display(), sales = report.len(), "Sales report written");
    Ok(report.len())
}

/// Writes the reorder report (items with `stock <= min_stock`) as a
/// semicolon-delimited CSV to `dest`, sorted provider-then-name.
///
/// ## Returns
/// The number of item rows written (excluding the header).
pub async fn export_reorder_report(db: &Database, dest: &Path) -> Result<usize, BackupError> {
    let lines = db.items().list_needing_reorder().await?;

    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_path(dest)?;

    writer.write_record([
        "SKU", "Name", "Provider", "Stock", "MinStock", "MaxStock", "ToOrder",
    ])?;

    for line in &lines {
        writer.write_record([
            line.sku.as_str(),
            line.name.as_str(),
            line.provider_name.as_deref().unwrap_or(""),
            &line.stock.to_string(),
            &line.min_stock.to_string(),
            &line.max_stock.to_string(),
            &line.to_order.to_string(),
        ])?;
    }

    writer.flush()?;

    info!(dest = %dest.display(), rows = lines.len(), "Reorder report written");
    Ok(lines.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use easyinv_core::{NewItem, NewSale, SaleLine};
    use easyinv_db::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn item(sku: &str, stock: i64, min_stock: i64, max_stock: i64) -> NewItem {
        NewItem {
            sku: sku.to_string(),
            name: format!("Item {sku}"),
            description: None,
            price_public_cents: 1000,
            price_wholesale_cents: 900,
            price_distributor_cents: 800,
            stock,
            min_stock,
            max_stock,
            location: String::new(),
            provider_id: None,
        }
    }

    #[tokio::test]
    async fn test_sales_report_embeds_lines_and_subtotals() {
        let db = test_db().await;
        let id = db.items().add_item(&item("A", 10, 0, 0)).await.unwrap();

        db.sales()
            .register_sale(&NewSale {
                title: "Report me".to_string(),
                client_id: None,
                lines: vec![SaleLine {
                    item_id: id,
                    item_name: "Item A".to_string(),
                    qty: 3,
                    unit_price_cents: 400,
                }],
                payment_method: "cash".to_string(),
            })
            .await
            .unwrap();

        let today = Utc::now().date_naive();
        let report = export_sales_report(&db, today, today).await.unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].total_cents, 1200);
        assert_eq!(report[0].items_sold.len(), 1);
        assert_eq!(report[0].items_sold[0].subtotal_cents, 1200);
        assert_eq!(report[0].items_sold[0].sku.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_written_report_is_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("sales.json");
        let db = test_db().await;

        let today = Utc::now().date_naive();
        let count = write_sales_report(&db, today, today, &dest).await.unwrap();
        assert_eq!(count, 0);

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&dest).unwrap()).unwrap();
        assert!(parsed.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reorder_report_rows_and_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("reorder.csv");
        let db = test_db().await;

        db.items().add_item(&item("LOW", 1, 5, 20)).await.unwrap();
        db.items().add_item(&item("OK", 50, 5, 60)).await.unwrap();

        let rows = export_reorder_report(&db, &dest).await.unwrap();
        assert_eq!(rows, 1);

        let content = std::fs::read_to_string(&dest).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "SKU;Name;Provider;Stock;MinStock;MaxStock;ToOrder"
        );
        assert_eq!(lines.next().unwrap(), "LOW;Item LOW;;1;5;20;19");
    }
}
