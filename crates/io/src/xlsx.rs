// XLSX export of the full row set.
//
// Export always serializes the entire result set, not the visible page:
// the point is a complete offline copy. Each row is flattened back into a
// typed record straight from the raw payload values, independent of what
// was rendered on screen, so the destination spreadsheet keeps numbers as
// numbers. Action/link columns are dropped — they mean nothing outside
// the UI.
//
// The workbook is built in memory and written in one save, so a failed
// export leaves no partial file behind. Concurrent export triggers are
// allowed: each call is an independent transformation to its own
// timestamped path.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_xlsxwriter::{Format, Workbook};
use serde_json::{Map, Value};
use tabulon_engine::column::{Column, ColumnKind};
use tabulon_engine::currency;
use tabulon_engine::render::yes_no;
use tabulon_protocol::{Row, TablePayload};

/// Fallback title for sheet and file names.
const DEFAULT_TITLE: &str = "Export";

/// Error at the export boundary. Surfaced to the user and logged by the
/// caller; never propagates past the export trigger.
#[derive(Debug)]
pub enum ExportError {
    /// Workbook construction failed (sheet naming, cell writes)
    Workbook(String),
    /// Writing the .xlsx file failed
    Save(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Workbook(msg) => write!(f, "Export failed: {}", msg),
            ExportError::Save(msg) => write!(f, "Could not write export file: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

/// One flattened, coerced value destined for a worksheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportValue {
    Empty,
    Text(String),
    /// Written as an xlsx number so the spreadsheet application handles
    /// numeric display itself.
    Number(f64),
}

/// Export statistics.
#[derive(Debug, Default)]
pub struct ExportStats {
    pub rows_exported: usize,
    pub cells_exported: usize,
    /// Action/link columns dropped from the export column set
    pub columns_skipped: usize,
    pub export_duration_ms: u128,
}

impl ExportStats {
    /// Returns a summary message suitable for display
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!(
                "{} row{}",
                self.rows_exported,
                if self.rows_exported == 1 { "" } else { "s" }
            ),
            format!("{} cells", self.cells_exported),
        ];
        if self.columns_skipped > 0 {
            parts.push(format!("{} action columns dropped", self.columns_skipped));
        }
        parts.join(", ")
    }
}

/// Coerce one raw field value for spreadsheet output.
///
/// Order matters: null first, then containers, then booleans, then number
/// passthrough, then string form. Boolean detection applies to actual JSON
/// booleans only — "Yes"/"No" strings pass through unchanged, so coercion
/// is idempotent on already-coerced values. Currency columns re-parse
/// formatted strings back to numbers ("₹1,234.50" exports as 1234.5).
pub fn coerce(column: &Column, value: Option<&Value>) -> ExportValue {
    match value {
        None | Some(Value::Null) => ExportValue::Empty,
        Some(Value::Array(items)) => ExportValue::Text(join_elements(items)),
        Some(Value::Object(map)) => object_text(map),
        Some(Value::Bool(b)) => ExportValue::Text(yes_no(*b)),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => ExportValue::Number(f),
            None => ExportValue::Text(n.to_string()),
        },
        Some(Value::String(s)) => {
            if matches!(column.kind, ColumnKind::Currency { .. }) {
                match currency::parse_amount_str(s) {
                    Some(n) => ExportValue::Number(n),
                    None => ExportValue::Text(s.clone()),
                }
            } else {
                ExportValue::Text(s.clone())
            }
        }
    }
}

/// Comma-joined string forms of the array elements.
fn join_elements(items: &[Value]) -> String {
    items
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Plain objects have no usable string form of their own; fall back to a
/// `name`/`value`/`label` field, else export nothing.
fn object_text(map: &Map<String, Value>) -> ExportValue {
    for field in ["name", "value", "label"] {
        match map.get(field) {
            Some(Value::String(s)) if !s.is_empty() => return ExportValue::Text(s.clone()),
            Some(Value::Number(n)) => return ExportValue::Text(n.to_string()),
            _ => {}
        }
    }
    ExportValue::Empty
}

/// Strip the characters Excel forbids in sheet names; the same set covers
/// path separators and filesystem-reserved characters in filenames.
fn strip_reserved(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .collect()
}

/// `<title-or-"export">_<timestamp>.xlsx`, with reserved characters
/// stripped from the title and colons in the ISO timestamp replaced with
/// dashes so the name is valid on every filesystem.
pub fn export_filename(title: Option<&str>, at: DateTime<Utc>) -> String {
    let cleaned = title.map(strip_reserved).unwrap_or_default();
    let base = if cleaned.is_empty() { "export" } else { cleaned.as_str() };
    let stamp = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace(':', "-");
    format!("{}_{}.xlsx", base, stamp)
}

/// Sanitize a title into a legal xlsx sheet name: strip the characters
/// Excel forbids, cap at 31 chars, never empty.
fn sheet_name(title: Option<&str>) -> String {
    let cleaned: String = title
        .map(strip_reserved)
        .unwrap_or_default()
        .chars()
        .take(31)
        .collect();
    if cleaned.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        cleaned
    }
}

/// Serialize the full row set to an xlsx workbook at `path`: one sheet
/// named from the title, one header row, one row per source row.
pub fn export(
    columns: &[Column],
    rows: &[Row],
    title: Option<&str>,
    path: &Path,
) -> Result<ExportStats, ExportError> {
    let start = Instant::now();
    let mut stats = ExportStats::default();

    let export_columns: Vec<&Column> = columns.iter().filter(|c| !c.is_action()).collect();
    stats.columns_skipped = columns.len() - export_columns.len();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name(title))
        .map_err(|e| ExportError::Workbook(e.to_string()))?;

    let header_format = Format::new().set_bold();
    for (col_idx, column) in export_columns.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col_idx as u16, &column.header, &header_format)
            .map_err(|e| ExportError::Workbook(e.to_string()))?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let target_row = (row_idx + 1) as u32;
        for (col_idx, column) in export_columns.iter().enumerate() {
            let target_col = col_idx as u16;
            match coerce(column, row.get(&column.key)) {
                ExportValue::Empty => {}
                ExportValue::Text(s) => {
                    worksheet
                        .write_string(target_row, target_col, &s)
                        .map_err(|e| ExportError::Workbook(e.to_string()))?;
                    stats.cells_exported += 1;
                }
                ExportValue::Number(n) => {
                    worksheet
                        .write_number(target_row, target_col, n)
                        .map_err(|e| ExportError::Workbook(e.to_string()))?;
                    stats.cells_exported += 1;
                }
            }
        }
        stats.rows_exported += 1;
    }

    if let Err(e) = workbook.save(path) {
        let err = ExportError::Save(e.to_string());
        log::warn!("{}", err);
        return Err(err);
    }

    stats.export_duration_ms = start.elapsed().as_millis();
    log::info!("exported {} to {}", stats.summary(), path.display());
    Ok(stats)
}

/// Export into `dir` under the standard timestamped filename. Returns the
/// path actually written.
pub fn export_to_dir(
    columns: &[Column],
    rows: &[Row],
    title: Option<&str>,
    dir: &Path,
) -> Result<(PathBuf, ExportStats), ExportError> {
    let path = dir.join(export_filename(title, Utc::now()));
    let stats = export(columns, rows, title, &path)?;
    Ok((path, stats))
}

/// Export a table-description payload directly, deriving columns through
/// the semantic key mapping.
pub fn export_payload(payload: &TablePayload, dir: &Path) -> Result<(PathBuf, ExportStats), ExportError> {
    let columns = tabulon_engine::column::columns_from_specs(&payload.columns);
    export_to_dir(&columns, &payload.rows, payload.title.as_deref(), dir)
}
