//! Table-description payload — the wire contract with the assistant backend.
//!
//! The backend answers a chat request with an optional `table_data` block
//! describing columns and carrying row data. Rows are open mappings: the
//! producer decides the schema per response, and only the declared columns
//! give any field meaning. Column `key` values with recognized semantic
//! meaning (`actions`, `debit`, `credit`, `balanced`, ...) receive
//! specialized rendering downstream; that key→behavior mapping lives in
//! `tabulon-engine`, not here.
//!
//! Deserialization is deliberately lenient: a payload missing `rows` or
//! `columns` parses as empty data rather than failing, so malformed
//! responses degrade to the caller's empty-state message.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An open row mapping: field name → JSON value. A row may carry fields no
/// column references (ignored) or lack a field a column references
/// (rendered as a placeholder).
pub type Row = Map<String, Value>;

/// One column as declared by the producer. `key` reads raw row data and is
/// the default render source; `header` is the display label and the export
/// field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    pub header: String,
    /// Presentation hint for the cell container (e.g. "text-right").
    #[serde(rename = "className", skip_serializing_if = "Option::is_none", default)]
    pub class_name: Option<String>,
    /// Presentation hint for the header cell.
    #[serde(
        rename = "headerClassName",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub header_class_name: Option<String>,
    /// Declared sort capability. Inert for now (no sort engine consumes
    /// it), but part of the producer contract and preserved on the wire.
    #[serde(default, skip_serializing_if = "is_false")]
    pub sortable: bool,
}

fn is_false(b: &bool) -> bool {
    !b
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> ColumnSpec {
        ColumnSpec {
            key: key.into(),
            header: header.into(),
            class_name: None,
            header_class_name: None,
            sortable: false,
        }
    }
}

/// The table-description payload: columns plus rows, with optional
/// pagination hints and a title used for the export sheet name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TablePayload {
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Full result-set size. When absent, the resident row array is assumed
    /// to be the complete set.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub page_size: Option<usize>,
    /// Producer-driven page index (1-based). Its presence selects
    /// caller-owned pagination downstream.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub current_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
}

impl TablePayload {
    /// Parse a payload from JSON. Missing `rows`/`columns` deserialize as
    /// empty — an empty-data condition, not an error.
    pub fn from_json(json: &str) -> Result<TablePayload, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective result-set size: the producer-supplied total when present,
    /// else the length of the resident row array.
    pub fn effective_total(&self) -> usize {
        self.total_count.unwrap_or(self.rows.len())
    }

    /// True when there is nothing to render (no rows or no columns), which
    /// includes every malformed-payload case the lenient parser absorbs.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }
}
