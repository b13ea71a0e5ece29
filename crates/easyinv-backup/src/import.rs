//! # Bulk Item Import
//!
//! Imports catalog items from a CSV file.
//!
//! ## Batch Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      import_items_csv()                                 │
//! │                                                                         │
//! │  bytes ──UTF-8 + BOM strip──► header ──delimiter sniff (';' vs ',')    │
//! │                                  │                                      │
//! │                                  ▼  per row                             │
//! │            ┌── parse fields (Money accepts "10.99" and "10,99")        │
//! │            │        └── malformed → RowError recorded, row skipped     │
//! │            ├── provider name → lookup, auto-create on miss             │
//! │            └── upsert by SKU:                                          │
//! │                  active row   → overwrite fields, stock is ADDED       │
//! │                  tombstone    → resurrection (overwrite, incl. stock)  │
//! │                  no row       → insert                                 │
//! │                                                                         │
//! │  A bad row NEVER aborts the batch. The report carries both the         │
//! │  imported count and every skipped row with its line number.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::ImportError;
use easyinv_core::{Money, NewItem};
use easyinv_db::Database;

/// Column contract of the import file, in template order.
pub const TEMPLATE_HEADERS: [&str; 12] = [
    "SKU",
    "Name",
    "Provider",
    "ProviderPhone",
    "Location",
    "Description",
    "PricePublic",
    "PriceWholesale",
    "PriceDistributor",
    "Stock",
    "MinStock",
    "MaxStock",
];

/// One skipped row.
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based line number in the file (the header is line 1).
    pub line: usize,
    pub message: String,
}

/// Outcome of an import batch.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Rows inserted or merged.
    pub imported: usize,
    /// Rows skipped, with reasons.
    pub errors: Vec<RowError>,
}

/// Writes the import template (header row only, semicolon-delimited).
pub fn write_import_template(dest: &Path) -> Result<(), ImportError> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_path(dest)?;
    writer.write_record(TEMPLATE_HEADERS)?;
    writer.flush()?;
    Ok(())
}

/// Imports items from CSV bytes. See the module docs for the batch
/// semantics.
pub async fn import_items_csv(db: &Database, bytes: &[u8]) -> Result<ImportReport, ImportError> {
    let text = decode(bytes)?;
    let delimiter = sniff_delimiter(text);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = map_columns(reader.headers()?)?;

    let mut report = ImportReport::default();

    // Header is line 1; the first data row is line 2
    for (offset, record) in reader.records().enumerate() {
        let line = offset + 2;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                report.errors.push(RowError {
                    line,
                    message: format!("unreadable row: {e}"),
                });
                continue;
            }
        };

        match import_row(db, &columns, &record).await {
            Ok(()) => report.imported += 1,
            Err(message) => {
                warn!(line = line, message = %message, "Skipping import row");
                report.errors.push(RowError { line, message });
            }
        }
    }

    info!(
        imported = report.imported,
        skipped = report.errors.len(),
        "Import batch finished"
    );
    Ok(report)
}

/// Validates UTF-8 and strips an optional BOM.
fn decode(bytes: &[u8]) -> Result<&str, ImportError> {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|_| ImportError::NotUtf8)
}

/// Picks `;` or `,` by counting occurrences in the header line.
fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();

    if commas > semicolons {
        b','
    } else {
        b';'
    }
}

/// Maps lowercase header names to column indices. SKU and Name are
/// mandatory; every other column is optional.
fn map_columns(headers: &StringRecord) -> Result<HashMap<String, usize>, ImportError> {
    let map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim().to_lowercase(), i))
        .collect();

    for required in ["sku", "name"] {
        if !map.contains_key(required) {
            return Err(ImportError::InvalidHeader(format!(
                "missing required column '{required}'"
            )));
        }
    }

    Ok(map)
}

fn field<'a>(columns: &HashMap<String, usize>, record: &'a StringRecord, name: &str) -> &'a str {
    columns
        .get(name)
        .and_then(|&i| record.get(i))
        .unwrap_or("")
}

fn parse_price(columns: &HashMap<String, usize>, record: &StringRecord, name: &str) -> Result<i64, String> {
    let raw = field(columns, record, name);
    if raw.is_empty() {
        return Ok(0);
    }
    Money::from_str(raw)
        .map(|m| m.cents())
        .map_err(|e| format!("column '{name}': {e}"))
}

fn parse_int(columns: &HashMap<String, usize>, record: &StringRecord, name: &str) -> Result<i64, String> {
    let raw = field(columns, record, name);
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<i64>()
        .map_err(|_| format!("column '{name}': '{raw}' is not a whole number"))
}

/// Imports one row. Returns a human-readable reason on failure; the caller
/// records it and moves on.
async fn import_row(
    db: &Database,
    columns: &HashMap<String, usize>,
    record: &StringRecord,
) -> Result<(), String> {
    let sku = field(columns, record, "sku");
    let name = field(columns, record, "name");

    if sku.is_empty() {
        return Err("missing SKU".to_string());
    }
    if name.is_empty() {
        return Err("missing name".to_string());
    }

    let price_public_cents = parse_price(columns, record, "pricepublic")?;
    let price_wholesale_cents = parse_price(columns, record, "pricewholesale")?;
    let price_distributor_cents = parse_price(columns, record, "pricedistributor")?;
    let stock = parse_int(columns, record, "stock")?;
    let min_stock = parse_int(columns, record, "minstock")?;
    let max_stock = parse_int(columns, record, "maxstock")?;

    let provider_id = resolve_provider(
        db,
        field(columns, record, "provider"),
        field(columns, record, "providerphone"),
    )
    .await?;

    let description = match field(columns, record, "description") {
        "" => None,
        d => Some(d.to_string()),
    };

    let new_item = NewItem {
        sku: sku.to_string(),
        name: name.to_string(),
        description,
        price_public_cents,
        price_wholesale_cents,
        price_distributor_cents,
        stock,
        min_stock,
        max_stock,
        location: field(columns, record, "location").to_string(),
        provider_id,
    };

    let items = db.items();
    match items.get_by_sku(sku).await.map_err(|e| e.to_string())? {
        // Active row: merge - fields overwritten, stock ADDED to the
        // current count
        Some(existing) if existing.active => {
            debug!(sku = %sku, id = existing.id, "Merging into existing item");
            let mut update: easyinv_core::ItemUpdate = new_item.into();
            update.stock = existing.stock + stock;
            items
                .update_item(existing.id, &update)
                .await
                .map_err(|e| e.to_string())
        }

        // Tombstone or no row: add_item resurrects or inserts, row stock
        // taken as-is
        _ => {
            items
                .add_item(&new_item)
                .await
                .map(|_| ())
                .map_err(|e| e.to_string())
        }
    }
}

/// Resolves a provider name to an id, creating the provider on a miss.
/// An empty name means "no provider".
async fn resolve_provider(
    db: &Database,
    name: &str,
    phone: &str,
) -> Result<Option<i64>, String> {
    if name.is_empty() {
        return Ok(None);
    }

    let providers = db.providers();
    if let Some(existing) = providers.get_by_name(name).await.map_err(|e| e.to_string())? {
        return Ok(Some(existing.id));
    }

    let phone = if phone.is_empty() { None } else { Some(phone) };
    let id = providers.add(name, phone).await.map_err(|e| e.to_string())?;
    debug!(name = %name, id = id, "Auto-created provider during import");
    Ok(Some(id))
}

// =============================================================================
// Unit Tests
// =============================================================================
