// Standard column sets for the producer's fixed table shapes.
//
// The backend emits four record shapes with known columns (vouchers,
// ledgers, stock items, warehouses). These mirror its declarations so a
// consumer can build the right columns without a payload in hand.

use crate::column::Column;
use crate::currency::DEFAULT_SYMBOL;

/// Voucher listing: index, voucher number, type, date, party, debit,
/// credit, balanced flag, view link.
pub fn voucher_columns() -> Vec<Column> {
    vec![
        Column::plain("index", "#"),
        Column::plain("voucher_number", "Voucher Number"),
        Column::plain("type", "Type"),
        Column::date("date", "Date"),
        Column::truncated("party", "Party", 50),
        Column::currency("debit", "Debit", DEFAULT_SYMBOL),
        Column::currency("credit", "Credit", DEFAULT_SYMBOL),
        Column::boolean("balanced", "Balanced"),
        Column::link("actions", "Actions", "View"),
    ]
}

/// Ledger listing: name, group, opening/closing balances, GSTIN, view link.
pub fn ledger_columns() -> Vec<Column> {
    vec![
        Column::plain("index", "#"),
        Column::plain("name", "Ledger Name"),
        Column::plain("group_name", "Group"),
        Column::currency("opening_balance", "Opening Balance", DEFAULT_SYMBOL),
        Column::currency("closing_balance", "Closing Balance", DEFAULT_SYMBOL),
        Column::plain("gstin", "GSTIN"),
        Column::link("actions", "Actions", "View"),
    ]
}

/// Stock item listing: name, code, group, HSN, GST rate, opening quantity
/// and value, view link.
pub fn stock_item_columns() -> Vec<Column> {
    vec![
        Column::plain("index", "#"),
        Column::plain("name", "Item Name"),
        Column::plain("code", "Code"),
        Column::plain("stock_group", "Stock Group"),
        Column::plain("gst_hsn_code", "HSN Code"),
        Column::plain("gst_rate", "GST %"),
        Column::plain("opening_balance_quantity", "Qty"),
        Column::currency("opening_balance_value", "Value", DEFAULT_SYMBOL),
        Column::link("actions", "Actions", "View"),
    ]
}

/// Warehouse listing: name, location, address, contact, phone, capacity,
/// view link.
pub fn warehouse_columns() -> Vec<Column> {
    vec![
        Column::plain("index", "#"),
        Column::plain("name", "Warehouse Name"),
        Column::plain("location_details", "Location"),
        Column::plain("address", "Address"),
        Column::plain("contact_person", "Contact Person"),
        Column::plain("phone", "Phone"),
        Column::plain("capacity", "Capacity"),
        Column::link("actions", "Actions", "View"),
    ]
}
