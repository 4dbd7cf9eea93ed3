use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{new_null_array, Array, ArrayRef, AsArray};
use arrow::compute::{can_cast_types, cast};
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Cell, Column, ColumnKind, Listing, ListingTable};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures that halt a dashboard run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("could not parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listing table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "price": 9400, "condition": "good", ... }, ...]`
/// * `.parquet` – flat Parquet file with scalar columns
/// * anything else is read as comma-separated text with a header row
///
/// Rows with a negative `price` are dropped after parsing.
pub fn load_file(path: &Path) -> Result<ListingTable, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        _ => load_csv(path),
    };

    let (column_names, rows) = parsed.map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let table = ListingTable::new(column_names, drop_negative_prices(rows));
    log::info!(
        "Loaded {} listings from {} with columns {:?}",
        table.len(),
        path.display(),
        table.column_names
    );
    Ok(table)
}

/// Remove every row whose price is present and negative.
fn drop_negative_prices(rows: Vec<Listing>) -> Vec<Listing> {
    let before = rows.len();
    let kept: Vec<Listing> = rows
        .into_iter()
        .filter(|row| row.number(Column::Price).map_or(true, |p| p >= 0.0))
        .collect();
    let dropped = before - kept.len();
    if dropped > 0 {
        log::warn!("Dropped {dropped} listings with a negative price");
    }
    kept
}

/// Parse raw text according to the column it belongs to.
fn parse_cell(column: &str, raw: &str) -> Cell {
    match Column::from_name(column).map(Column::kind) {
        Some(ColumnKind::Numeric) => Cell::numeric(raw),
        Some(ColumnKind::Categorical) => Cell::categorical(raw),
        None => Cell::guess(raw),
    }
}

/// Coerce an already-typed value (JSON, Parquet) to the kind its column
/// expects.
fn coerce_cell(column: &str, cell: Cell) -> Cell {
    match (Column::from_name(column).map(Column::kind), cell) {
        (_, Cell::Number(v)) if !v.is_finite() => Cell::Missing,
        (Some(ColumnKind::Numeric), Cell::Text(s)) => Cell::numeric(&s),
        (Some(ColumnKind::Categorical), Cell::Number(v)) => Cell::Text(Cell::Number(v).to_string()),
        (_, Cell::Text(s)) if s.is_empty() => Cell::Missing,
        (_, cell) => cell,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names, one listing per record.
fn load_csv(path: &Path) -> Result<(Vec<String>, Vec<Listing>)> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(String::is_empty) {
        bail!("CSV has no header row");
    }

    let mut rows = Vec::new();
    let mut unparsed: BTreeMap<String, usize> = BTreeMap::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut cells = BTreeMap::new();
        for (col_idx, raw) in record.iter().enumerate() {
            let col_name = &headers[col_idx];
            let cell = parse_cell(col_name, raw);
            if cell.is_missing() && !raw.trim().is_empty() {
                *unparsed.entry(col_name.clone()).or_default() += 1;
            }
            cells.insert(col_name.clone(), cell);
        }

        rows.push(Listing { cells });
    }

    for (column, count) in unparsed {
        if Column::from_name(&column).is_some_and(|c| c.kind() == ColumnKind::Numeric) {
            log::warn!("{count} non-numeric values in '{column}' treated as missing");
        }
    }

    Ok((headers, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "price": 9400, "model_year": 2011, "condition": "good", "odometer": 145000 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<(Vec<String>, Vec<Listing>)> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut column_names: Vec<String> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut cells = BTreeMap::new();
        for (key, val) in obj {
            if seen.insert(key.clone()) {
                column_names.push(key.clone());
            }
            cells.insert(key.clone(), coerce_cell(key, json_to_cell(val)));
        }

        rows.push(Listing { cells });
    }

    Ok((column_names, rows))
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => n.as_f64().map_or(Cell::Missing, Cell::Number),
        JsonValue::Bool(b) => Cell::Text(b.to_string()),
        JsonValue::Null => Cell::Missing,
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet export of the listing table.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<(Vec<String>, Vec<Listing>)> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns: Vec<ArrayRef> = batch
            .columns()
            .iter()
            .zip(&column_names)
            .map(|(col, name)| normalize_column(name, col))
            .collect::<Result<_>>()?;

        for row in 0..batch.num_rows() {
            let mut cells = BTreeMap::new();
            for (col, col_name) in columns.iter().zip(&column_names) {
                let value = extract_cell(col, row);
                cells.insert(col_name.clone(), coerce_cell(col_name, value));
            }
            rows.push(Listing { cells });
        }
    }

    Ok((column_names, rows))
}

/// Bring an Arrow column down to the types [`extract_cell`] reads: every
/// integer, float and decimal type becomes Float64, everything else that
/// has a text form becomes Utf8. Columns with no text form read as nulls.
fn normalize_column(name: &str, col: &ArrayRef) -> Result<ArrayRef> {
    let target = match col.data_type() {
        DataType::Float64 | DataType::Utf8 | DataType::LargeUtf8 | DataType::Boolean => {
            return Ok(Arc::clone(col));
        }
        dt if dt.is_numeric() => DataType::Float64,
        dt if can_cast_types(dt, &DataType::Utf8) => DataType::Utf8,
        dt => {
            log::warn!("Column '{name}' has unsupported type {dt}; reading it as missing");
            return Ok(new_null_array(&DataType::Null, col.len()));
        }
    };
    cast(col, &target).with_context(|| format!("converting column '{name}' to {target}"))
}

/// Extract a single cell from a normalized Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Missing;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Float64 => Cell::Number(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Cell::Text(col.as_boolean().value(row).to_string()),
        _ => Cell::Missing,
    }
}
