// Fixed-shape voucher listing.
//
// A narrower sibling of the general table: hardcoded columns, a five-row
// cap with no page navigation, and a "showing first N" notice instead of
// a pager. No export. Retained because some producer payloads arrive in
// exactly this shape.

use tabulon_protocol::Row;

use crate::column::Column;
use crate::presets;
use crate::render::{render_row, Cell};

/// Rows shown by the voucher listing. Not configurable.
pub const VOUCHER_PAGE_SIZE: usize = 5;

pub struct VoucherTable {
    columns: Vec<Column>,
    rows: Vec<Row>,
    total_count: usize,
}

impl VoucherTable {
    /// `total_count` is the full result-set size when the producer supplies
    /// one; otherwise the resident rows are taken as the complete set.
    pub fn new(rows: Vec<Row>, total_count: Option<usize>) -> VoucherTable {
        let total = total_count.unwrap_or(rows.len());
        VoucherTable {
            columns: presets::voucher_columns(),
            rows,
            total_count: total,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// The capped visible slice, rendered.
    pub fn visible(&self) -> Vec<Vec<Cell>> {
        self.rows
            .iter()
            .take(VOUCHER_PAGE_SIZE)
            .enumerate()
            .map(|(index, row)| render_row(&self.columns, row, index))
            .collect()
    }

    /// "Showing first 5 of 37 vouchers", or None when everything fits.
    pub fn notice(&self) -> Option<String> {
        let shown = self.rows.len().min(VOUCHER_PAGE_SIZE);
        if self.total_count > shown {
            Some(format!(
                "Showing first {} of {} vouchers",
                shown, self.total_count
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn voucher_row(i: usize) -> Row {
        match json!({
            "index": i + 1,
            "voucher_number": format!("V-{:03}", i + 1),
            "type": "Sales",
            "date": "2026-04-01",
            "party": "Acme Traders",
            "debit": 1000.0 + i as f64,
            "credit": 1000.0 + i as f64,
            "balanced": true,
            "actions": format!("https://example.com/vouchers/{}", i + 1),
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_caps_at_five_rows() {
        let table = VoucherTable::new((0..9).map(voucher_row).collect(), Some(37));
        let visible = table.visible();
        assert_eq!(visible.len(), VOUCHER_PAGE_SIZE);
        assert_eq!(visible[0].len(), table.columns().len());
        assert_eq!(table.notice().as_deref(), Some("Showing first 5 of 37 vouchers"));
    }

    #[test]
    fn test_no_notice_when_everything_fits() {
        let table = VoucherTable::new((0..3).map(voucher_row).collect(), None);
        assert_eq!(table.visible().len(), 3);
        assert_eq!(table.notice(), None);
        assert_eq!(table.total_count(), 3);
    }

    #[test]
    fn test_renders_fixed_schema() {
        let table = VoucherTable::new(vec![voucher_row(0)], None);
        let cells = &table.visible()[0];

        assert_eq!(cells[0], Cell::Text("1".into()));
        assert_eq!(cells[1], Cell::Text("V-001".into()));
        assert_eq!(cells[5], Cell::Text("₹1,000.00".into()));
        assert_eq!(cells[7], Cell::Text("Yes".into()));
        assert!(matches!(cells[8], Cell::Link { .. }));
    }
}
