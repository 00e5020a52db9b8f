//! Bulk loading of the shop's CSV data set.
//!
//! Each table is read from `<dir>/<table>.csv` (lower-case file name), one
//! headerless record per row, fields in table column order. Files are loaded
//! parents-first inside a single transaction so a bad row leaves the
//! database untouched.

use crate::dates::normalize_date;
use crate::db::ShopDb;
use crate::error::{Result, ShopError};
use rusqlite::{params_from_iter, Connection};
use serde::Serialize;
use std::path::Path;

struct CsvTable {
    table: &'static str,
    file: &'static str,
    columns: &'static [&'static str],
    /// Index of a date column that is normalized to `YYYY-MM-DD`.
    date_column: Option<usize>,
}

const CSV_TABLES: &[CsvTable] = &[
    CsvTable {
        table: "Customer",
        file: "customer.csv",
        columns: &["id", "fname", "lname", "phone", "address"],
        date_column: None,
    },
    CsvTable {
        table: "Mechanic",
        file: "mechanic.csv",
        columns: &["id", "fname", "lname", "experience"],
        date_column: None,
    },
    CsvTable {
        table: "Car",
        file: "car.csv",
        columns: &["vin", "make", "model", "year"],
        date_column: None,
    },
    CsvTable {
        table: "Owns",
        file: "owns.csv",
        columns: &["ownership_id", "customer_id", "car_vin"],
        date_column: None,
    },
    CsvTable {
        table: "Service_Request",
        file: "service_request.csv",
        columns: &["rid", "customer_id", "car_vin", "date", "odometer", "complain"],
        date_column: Some(3),
    },
    CsvTable {
        table: "Closed_Request",
        file: "closed_request.csv",
        columns: &["wid", "rid", "mid", "date", "comment", "bill"],
        date_column: Some(3),
    },
];

/// Rows loaded per table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportSummary {
    pub table: &'static str,
    pub rows: usize,
}

/// Loads every CSV file found in `dir`. Missing files are skipped.
pub fn import_dir(db: &ShopDb, dir: &Path) -> Result<Vec<ImportSummary>> {
    if !dir.is_dir() {
        return Err(ShopError::Config(format!(
            "Import directory does not exist: {}",
            dir.display()
        )));
    }

    let tx = db.conn().unchecked_transaction()?;
    let mut summary = Vec::new();

    for source in CSV_TABLES {
        let path = dir.join(source.file);
        if !path.exists() {
            tracing::debug!("Skipping {}: {} not found", source.table, path.display());
            continue;
        }
        let rows = import_file(&tx, source, &path)?;
        tracing::info!(table = source.table, rows, "imported");
        summary.push(ImportSummary {
            table: source.table,
            rows,
        });
    }

    tx.commit()?;
    Ok(summary)
}

fn import_file(conn: &Connection, source: &CsvTable, path: &Path) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let placeholders: Vec<String> = (1..=source.columns.len()).map(|i| format!("?{}", i)).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        source.table,
        source.columns.join(", "),
        placeholders.join(", ")
    );
    let mut stmt = conn.prepare(&sql)?;

    let mut count = 0;
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != source.columns.len() {
            return Err(ShopError::Validation(format!(
                "{} line {}: expected {} fields, found {}",
                source.file,
                line + 1,
                source.columns.len(),
                record.len()
            )));
        }

        let mut values: Vec<String> = record.iter().map(str::to_string).collect();
        if let Some(idx) = source.date_column {
            values[idx] = normalize_date(&values[idx])?;
        }

        stmt.execute(params_from_iter(values.iter()))?;
        count += 1;
    }

    Ok(count)
}
