use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::bulk::CandidateNames;
use super::model::{RawRow, RawValue, StudentDataset};
use super::normalize::normalize_rows;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load raw rows from a roster file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one student per line (the primary format)
/// * `.json`    – `[{ "Student Name": "...", "CGPA": 8.1, ... }, ...]`
/// * `.parquet` – any flat schema, one student per row
pub fn load_rows(path: &Path) -> Result<Vec<RawRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv_rows(file)
        }
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Load and normalize a roster into the canonical dataset.
pub fn load_dataset(path: &Path) -> Result<StudentDataset> {
    let rows = load_rows(path).with_context(|| format!("loading {}", path.display()))?;
    Ok(normalize_rows(&rows))
}

/// Like [`load_dataset`], but a missing or unparsable source becomes an empty
/// dataset so the UI shows "no data" instead of an error.
pub fn load_dataset_or_empty(path: &Path) -> StudentDataset {
    match load_dataset(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} students ({} branches, {} semesters) from {}",
                dataset.len(),
                dataset.branches.len(),
                dataset.semesters.len(),
                path.display()
            );
            dataset
        }
        Err(e) => {
            log::warn!("Falling back to an empty dataset: {e:#}");
            StudentDataset::default()
        }
    }
}

/// Read the candidate names of an uploaded name-list file. A file that cannot
/// be read degrades to an empty candidate list.
pub fn load_candidates_or_empty(path: &Path) -> CandidateNames {
    let rows = std::fs::File::open(path)
        .context("opening name list")
        .and_then(read_name_rows);
    match rows {
        Ok(rows) => {
            let candidates = CandidateNames::from_rows(&rows);
            log::info!("Read {} candidate names from {}", candidates.len(), path.display());
            candidates
        }
        Err(e) => {
            log::warn!("Ignoring name list {}: {e:#}", path.display());
            CandidateNames::default()
        }
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Header row, then one record per line. Ragged rows are tolerated: cells
/// past the header are dropped and missing trailing cells are simply absent.
/// Lines whose cells are all blank are skipped. Bytes that are not valid
/// UTF-8 (Latin-1 spreadsheet exports) are decoded lossily so the row is kept.
pub fn read_csv_rows<R: Read>(input: R) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers: Vec<String> = reader
        .byte_headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| lossy_cell(h).trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.byte_records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells: Vec<String> = record.iter().map(lossy_cell).collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let cells = headers
            .iter()
            .zip(cells)
            .map(|(h, cell)| (h.clone(), RawValue::String(cell)))
            .collect();
        rows.push(RawRow::new(cells));
    }
    Ok(rows)
}

/// Name-list files have no required header; every line is returned as-is.
pub fn read_name_rows<R: Read>(input: R) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    reader
        .byte_records()
        .enumerate()
        .map(|(row_no, result)| -> Result<Vec<String>> {
            let record = result.with_context(|| format!("name list row {row_no}"))?;
            Ok(record
                .iter()
                .map(|cell| lossy_cell(cell).trim_start_matches('\u{feff}').to_string())
                .collect())
        })
        .collect()
}

fn lossy_cell(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Records-oriented JSON, as written by most spreadsheet exports:
///
/// ```json
/// [
///   { "Student Name": "Asha Rao", "Course Name": "CSE", "Semester": 3, "CGPA": 8.4 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json_rows(&text)
}

fn parse_json_rows(text: &str) -> Result<Vec<RawRow>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<RawRow> {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            Ok(RawRow::new(
                obj.iter()
                    .map(|(key, val)| (key.clone(), json_to_raw(val)))
                    .collect(),
            ))
        })
        .collect()
}

fn json_to_raw(val: &JsonValue) -> RawValue {
    match val {
        JsonValue::String(s) => RawValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                RawValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                RawValue::Float(f)
            } else {
                RawValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => RawValue::Bool(*b),
        JsonValue::Null => RawValue::Null,
        other => RawValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load a flat Parquet table. Every column becomes a cell keyed by its field
/// name; string, integer, float and boolean columns keep their type, anything
/// else is rendered to text.
fn load_parquet(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let names: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();

        for row in 0..batch.num_rows() {
            let cells = names
                .iter()
                .zip(batch.columns())
                .map(|(name, col)| (name.clone(), extract_raw_value(col, row)))
                .collect();
            rows.push(RawRow::new(cells));
        }
    }

    Ok(rows)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_raw_value(col: &ArrayRef, row: usize) -> RawValue {
    if col.is_null(row) {
        return RawValue::Null;
    }
    let typed = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|s| RawValue::String(s.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|s| RawValue::String(s.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| RawValue::Integer(a.value(row) as i64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| RawValue::Integer(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| RawValue::Float(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| RawValue::Float(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| RawValue::Bool(a.value(row))),
        _ => None,
    };
    typed.unwrap_or_else(|| match array_value_to_string(col.as_ref(), row) {
        Ok(text) => RawValue::String(text),
        Err(e) => {
            log::debug!("Unreadable {:?} cell at row {row}: {e}", col.data_type());
            RawValue::Null
        }
    })
}
