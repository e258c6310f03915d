// Cell resolution for the visible slice.
//
// Pure functions of (column set, row, index): no side effects, no state.
// Resolution order per cell is fixed: custom render → custom accessor →
// raw field lookup shaped by the column kind. Absent and null values
// become the placeholder, never a literal "null".

use serde_json::Value;
use tabulon_protocol::Row;

use crate::column::{Column, ColumnKind};
use crate::currency;
use crate::pager::Pager;

/// Glyph shown for absent data, visually de-emphasized by the host UI.
pub const PLACEHOLDER: &str = "-";

/// One rendered cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Absent data.
    Placeholder,
    Text(String),
    /// External-opening link.
    Link { url: String, label: String },
    /// Width-constrained text with the full value as a hover hint.
    Clipped { shown: String, full: String },
}

impl Cell {
    /// Flat display form: what a text-only surface would show.
    pub fn display(&self) -> &str {
        match self {
            Cell::Placeholder => PLACEHOLDER,
            Cell::Text(s) => s,
            Cell::Link { label, .. } => label,
            Cell::Clipped { shown, .. } => shown,
        }
    }
}

/// Render every visible row × column pair for the pager's current slice.
/// Row indices passed to accessors/renderers are absolute positions within
/// the full row array, not slice offsets.
pub fn render_page(columns: &[Column], rows: &[Row], pager: &Pager) -> Vec<Vec<Cell>> {
    let bounds = pager.slice_bounds();
    pager
        .slice(rows)
        .iter()
        .enumerate()
        .map(|(offset, row)| render_row(columns, row, bounds.start + offset))
        .collect()
}

pub fn render_row(columns: &[Column], row: &Row, index: usize) -> Vec<Cell> {
    columns.iter().map(|c| render_cell(c, row, index)).collect()
}

/// Resolve one cell. The custom render wins outright; otherwise the
/// accessor (if any) replaces the raw field lookup and its output is
/// shaped by the column kind.
pub fn render_cell(column: &Column, row: &Row, index: usize) -> Cell {
    let raw = row.get(&column.key);

    if let Some(render) = &column.render {
        return render(raw, row, index);
    }

    if let Some(accessor) = &column.accessor {
        return match accessor(row, index) {
            Some(derived) => kind_cell(&column.kind, Some(&derived), row),
            None => Cell::Placeholder,
        };
    }

    kind_cell(&column.kind, raw, row)
}

fn kind_cell(kind: &ColumnKind, value: Option<&Value>, row: &Row) -> Cell {
    match kind {
        ColumnKind::Plain => match value.and_then(display_string) {
            Some(s) => Cell::Text(s),
            None => Cell::Placeholder,
        },
        ColumnKind::Currency { symbol } => currency_cell(symbol, value),
        ColumnKind::Date { format } => match value {
            Some(v) if !is_falsy(v) => match format {
                Some(f) => Cell::Text(f(v)),
                None => Cell::Text(lossy_string(v)),
            },
            _ => Cell::Placeholder,
        },
        ColumnKind::Link { label } => match value.and_then(url_string) {
            Some(url) => Cell::Link { url, label: label.resolve(row) },
            None => Cell::Placeholder,
        },
        ColumnKind::Truncated { max_chars } => {
            let full = value.map(lossy_string).unwrap_or_default();
            Cell::Clipped { shown: clip(&full, *max_chars), full }
        }
        ColumnKind::Boolean => match value {
            Some(Value::Bool(b)) => Cell::Text(yes_no(*b)),
            Some(v) if !is_falsy(v) => Cell::Text(lossy_string(v)),
            _ => Cell::Placeholder,
        },
    }
}

fn currency_cell(symbol: &str, value: Option<&Value>) -> Cell {
    let value = match value {
        None | Some(Value::Null) => return Cell::Placeholder,
        Some(Value::String(s)) if s.trim().is_empty() => return Cell::Placeholder,
        Some(v) => v,
    };
    match currency::parse_amount(value) {
        Some(n) => Cell::Text(currency::format_amount(symbol, n)),
        // No numeric reading: echo the original value rather than fail
        None => Cell::Text(lossy_string(value)),
    }
}

pub fn yes_no(b: bool) -> String {
    if b { "Yes".to_string() } else { "No".to_string() }
}

/// Display form of a raw value for plain cells. None means placeholder:
/// null and empty strings have no display form.
pub fn display_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        v => Some(lossy_string(v)),
    }
}

/// Best-effort string extraction, used where a value must render somehow.
/// Objects try their `name`/`value`/`label` field before falling back to
/// compact JSON.
pub fn lossy_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(lossy_string)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => {
            for field in ["name", "value", "label"] {
                if let Some(v) = map.get(field) {
                    if !matches!(v, Value::Null) {
                        return lossy_string(v);
                    }
                }
            }
            value.to_string()
        }
        v => v.to_string(),
    }
}

/// Falsy in the producer's sense: null, empty string, false, zero.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn url_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn clip(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let shown: String = s.chars().take(max_chars).collect();
    format!("{}...", shown)
}
