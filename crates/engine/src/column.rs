// Column model - the per-field rendering contract.
//
// A column resolves its cell in fixed precedence: custom render → custom
// accessor → raw field lookup shaped by the column kind. The kind is a
// tagged enum resolved once at construction; render never re-inspects row
// values to guess types. At most one of {render, accessor} is consulted
// per cell, and render always wins when both are set.

use serde_json::Value;
use tabulon_protocol::{ColumnSpec, Row};

use crate::currency;
use crate::render::Cell;

/// Derives a display value from the whole row rather than a single field.
pub type Accessor = Box<dyn Fn(&Row, usize) -> Option<Value> + Send + Sync>;

/// Full custom cell renderer: raw field value, whole row, row index.
/// Takes precedence over the accessor and the kind.
pub type RenderFn = Box<dyn Fn(Option<&Value>, &Row, usize) -> Cell + Send + Sync>;

/// Per-row link label.
pub type LabelFn = Box<dyn Fn(&Row) -> String + Send + Sync>;

/// Caller-supplied date formatter.
pub type DateFormatFn = Box<dyn Fn(&Value) -> String + Send + Sync>;

/// How a column's raw field value becomes a display cell.
pub enum ColumnKind {
    /// String coercion, placeholder for absent/null/empty values.
    Plain,
    /// Two-decimal, thousands-grouped amount with a currency prefix.
    /// Non-numeric values are echoed verbatim rather than failing the cell.
    Currency { symbol: String },
    /// Optional caller formatter, else the raw value's string form.
    /// Falsy values render as the placeholder.
    Date { format: Option<DateFormatFn> },
    /// External-opening link; placeholder when the URL is absent.
    Link { label: LinkLabel },
    /// Width-constrained text carrying the full value as a hover hint.
    Truncated { max_chars: usize },
    /// Yes/No rendering for boolean fields.
    Boolean,
}

/// Link label: fixed text or a function of the row.
pub enum LinkLabel {
    Fixed(String),
    PerRow(LabelFn),
}

impl LinkLabel {
    pub fn resolve(&self, row: &Row) -> String {
        match self {
            LinkLabel::Fixed(s) => s.clone(),
            LinkLabel::PerRow(f) => f(row),
        }
    }
}

/// The per-field rendering contract: key, header, kind, optional custom
/// accessor/render, and the inert sortable flag.
pub struct Column {
    /// Field identifier; unique within a column set. Reads raw row data and
    /// is the default render source.
    pub key: String,
    /// Display label; also the export field name.
    pub header: String,
    /// Declared capability only — no sort engine consumes it yet, but the
    /// producer contract includes it.
    pub sortable: bool,
    pub kind: ColumnKind,
    pub accessor: Option<Accessor>,
    pub render: Option<RenderFn>,
}

impl Column {
    fn with_kind(key: impl Into<String>, header: impl Into<String>, kind: ColumnKind) -> Column {
        Column {
            key: key.into(),
            header: header.into(),
            sortable: false,
            kind,
            accessor: None,
            render: None,
        }
    }

    pub fn plain(key: impl Into<String>, header: impl Into<String>) -> Column {
        Column::with_kind(key, header, ColumnKind::Plain)
    }

    /// Currency column. Null/absent/empty-string renders the placeholder;
    /// formatted strings are re-parsed; non-numeric values echo verbatim.
    pub fn currency(
        key: impl Into<String>,
        header: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Column {
        Column::with_kind(key, header, ColumnKind::Currency { symbol: symbol.into() })
    }

    /// Link column with a fixed label.
    pub fn link(key: impl Into<String>, header: impl Into<String>, label: impl Into<String>) -> Column {
        Column::with_kind(key, header, ColumnKind::Link { label: LinkLabel::Fixed(label.into()) })
    }

    /// Link column whose label is derived from the row.
    pub fn link_with(key: impl Into<String>, header: impl Into<String>, label: LabelFn) -> Column {
        Column::with_kind(key, header, ColumnKind::Link { label: LinkLabel::PerRow(label) })
    }

    /// Date column printing the raw value.
    pub fn date(key: impl Into<String>, header: impl Into<String>) -> Column {
        Column::with_kind(key, header, ColumnKind::Date { format: None })
    }

    /// Date column with a caller-supplied formatter.
    pub fn date_with(key: impl Into<String>, header: impl Into<String>, format: DateFormatFn) -> Column {
        Column::with_kind(key, header, ColumnKind::Date { format: Some(format) })
    }

    /// Truncating text column; the full text rides along as a hover hint.
    pub fn truncated(key: impl Into<String>, header: impl Into<String>, max_chars: usize) -> Column {
        Column::with_kind(key, header, ColumnKind::Truncated { max_chars })
    }

    /// Yes/No column for boolean fields.
    pub fn boolean(key: impl Into<String>, header: impl Into<String>) -> Column {
        Column::with_kind(key, header, ColumnKind::Boolean)
    }

    pub fn sortable(mut self) -> Column {
        self.sortable = true;
        self
    }

    pub fn with_accessor(mut self, accessor: Accessor) -> Column {
        self.accessor = Some(accessor);
        self
    }

    pub fn with_render(mut self, render: RenderFn) -> Column {
        self.render = Some(render);
        self
    }

    /// Whether this column is a pure UI affordance (action/link), excluded
    /// from export because it means nothing outside the interface.
    pub fn is_action(&self) -> bool {
        self.key == "actions" || matches!(self.kind, ColumnKind::Link { .. })
    }
}

/// Map producer-declared column specs to concrete columns.
///
/// Keys with recognized semantic meaning get specialized kinds even though
/// the payload only declares generic key/header pairs — this key→behavior
/// mapping is the out-of-band contract with the producer. Unrecognized keys
/// render as plain text.
pub fn columns_from_specs(specs: &[ColumnSpec]) -> Vec<Column> {
    specs.iter().map(column_from_spec).collect()
}

fn column_from_spec(spec: &ColumnSpec) -> Column {
    let column = match spec.key.as_str() {
        "debit" | "credit" | "opening_balance" | "closing_balance" | "opening_balance_value" => {
            Column::currency(&spec.key, &spec.header, currency::DEFAULT_SYMBOL)
        }
        "party" => Column::truncated(&spec.key, &spec.header, 50),
        "balanced" => Column::boolean(&spec.key, &spec.header),
        "actions" => Column::link(&spec.key, &spec.header, "View"),
        _ => Column::plain(&spec.key, &spec.header),
    };
    if spec.sortable {
        column.sortable()
    } else {
        column
    }
}
