use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;

const HEADER: [&str; 6] = ["id", "date", "category", "type", "amount", "note"];

/// Write the header plus one row per transaction. Returns the row count.
pub(crate) fn write_csv<'a, W: Write>(
    writer: W,
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER).context("Failed to write CSV header")?;

    let mut count = 0;
    for txn in transactions {
        wtr.write_record([
            txn.id.to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.category.clone(),
            txn.kind.as_str().to_string(),
            format!("{:.2}", txn.amount.round_dp(2)),
            txn.note.clone(),
        ])
        .with_context(|| format!("Failed to write transaction {}", txn.id))?;
        count += 1;
    }

    wtr.flush().context("Failed to flush CSV output")?;
    Ok(count)
}

/// Create (or overwrite) `path` with the CSV export.
pub(crate) fn export_to_path<'a>(
    path: &Path,
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = write_csv(file, transactions)?;
    log::info!("Exported {count} transactions to {}", path.display());
    Ok(count)
}

#[cfg(test)]
#[path = "csv_export_tests.rs"]
mod tests;
