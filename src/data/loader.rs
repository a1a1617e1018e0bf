use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;

use super::model::ResultsTable;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a results table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – comma-separated with a header row
/// * `.json` – `[{ "index": 0, "class": 1, "snr": 8.1, ... }, ...]`
/// * anything else – whitespace-delimited pattern file (`.pat`, `.txt`, ...)
pub fn load_table(path: &Path) -> Result<ResultsTable> {
    let table = match extension(path).as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        _ => load_pattern(path),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.header.len(),
        path.display()
    );
    Ok(table)
}

/// Read only the column names of a results table.
pub fn read_header(path: &Path) -> Result<Vec<String>> {
    match extension(path).as_str() {
        "csv" => {
            let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
            let headers = reader.headers().context("reading CSV headers")?;
            Ok(headers.iter().map(|h| h.trim().to_string()).collect())
        }
        // Records carry their own keys, so the whole file has to be parsed.
        "json" => Ok(load_json(path)?.header),
        _ => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let (header, _) = split_pattern_header(&text)
                .with_context(|| format!("{} has no header line", path.display()))?;
            Ok(header)
        }
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// Pattern (whitespace-delimited) loader
// ---------------------------------------------------------------------------

/// Layout: the first non-blank line that is not a `#` comment holds the
/// column names, every following non-blank line holds one row of numbers.
///
/// ```text
/// index  class  snr   chisq
/// 0      0      6.1   12.0
/// 1      1      11.8  9.5
/// ```
fn load_pattern(path: &Path) -> Result<ResultsTable> {
    let text = std::fs::read_to_string(path).context("reading pattern file")?;
    parse_pattern(&text)
}

pub(crate) fn parse_pattern(text: &str) -> Result<ResultsTable> {
    let (header, body) = split_pattern_header(text).context("missing header line")?;

    let mut rows = Vec::new();
    for (row_no, line) in body.filter(|l| !l.trim().is_empty()).enumerate() {
        let row = line
            .split_whitespace()
            .enumerate()
            .map(|(j, tok)| {
                tok.parse::<f64>()
                    .with_context(|| format!("Row {row_no}, column {j}: '{tok}' is not a number"))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    ResultsTable::from_rows(header, rows)
}

fn split_pattern_header(text: &str) -> Option<(Vec<String>, impl Iterator<Item = &str>)> {
    let mut lines = text.lines();
    let header_line = lines.find(|l| {
        let t = l.trim();
        !t.is_empty() && !t.starts_with('#')
    })?;
    let header = header_line
        .split_whitespace()
        .map(str::to_string)
        .collect();
    Some((header, lines))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<ResultsTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let header: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(j, cell)| {
                cell.trim()
                    .parse::<f64>()
                    .with_context(|| format!("Row {row_no}, column {j}: '{cell}' is not a number"))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    ResultsTable::from_rows(header, rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`). Column order is the
/// key order of the first record; later records must carry the same keys.
fn load_json(path: &Path) -> Result<ResultsTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;
    let Some(first) = records.first() else {
        bail!("JSON array is empty, no columns to read");
    };
    let header: Vec<String> = first
        .as_object()
        .context("Row 0 is not a JSON object")?
        .keys()
        .cloned()
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        if obj.len() != header.len() {
            bail!("Row {i}: expected {} keys but found {}", header.len(), obj.len());
        }
        let row = header
            .iter()
            .map(|col| {
                obj.get(col)
                    .and_then(JsonValue::as_f64)
                    .with_context(|| format!("Row {i}: missing or non-numeric '{col}'"))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    ResultsTable::from_rows(header, rows)
}
