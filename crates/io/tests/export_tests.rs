// End-to-end export checks: write a workbook, reopen it, compare cell
// values and types to the source rows.

use calamine::{open_workbook, Data, Reader, Xlsx};
use serde_json::{json, Value};
use tabulon_engine::column::columns_from_specs;
use tabulon_engine::pager::Pager;
use tabulon_io::xlsx::{export, export_payload, export_to_dir};
use tabulon_protocol::{Row, TablePayload};

fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        _ => panic!("test rows must be objects"),
    }
}

fn ledger_payload(rows: usize) -> TablePayload {
    let json = json!({
        "columns": [
            { "key": "index", "header": "#" },
            { "key": "name", "header": "Ledger Name" },
            { "key": "opening_balance", "header": "Opening Balance" },
            { "key": "balanced", "header": "Balanced" },
            { "key": "actions", "header": "Actions" }
        ],
        "rows": (1..=rows).map(|i| json!({
            "index": i,
            "name": format!("Ledger {}", i),
            "opening_balance": "₹1,234.50",
            "balanced": i % 2 == 1,
            "actions": format!("https://example.com/ledgers/{}", i)
        })).collect::<Vec<_>>(),
        "page_size": 5,
        "title": "Ledgers"
    });
    serde_json::from_value(json).unwrap()
}

fn read_sheet(path: &std::path::Path, sheet: &str) -> calamine::Range<Data> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("open exported file");
    workbook.worksheet_range(sheet).expect("sheet present")
}

#[test]
fn test_export_writes_headers_and_typed_cells() {
    let dir = tempfile::tempdir().unwrap();
    let payload = ledger_payload(3);

    let (path, stats) = export_payload(&payload, dir.path()).unwrap();
    assert_eq!(stats.rows_exported, 3);
    assert_eq!(stats.columns_skipped, 1);
    assert!(path.file_name().unwrap().to_str().unwrap().starts_with("Ledgers_"));
    assert_eq!(path.extension(), Some(std::ffi::OsStr::new("xlsx")));

    let range = read_sheet(&path, "Ledgers");

    // Header row: display column set minus the action column
    assert_eq!(range.get_value((0, 0)), Some(&Data::String("#".into())));
    assert_eq!(range.get_value((0, 1)), Some(&Data::String("Ledger Name".into())));
    assert_eq!(range.get_value((0, 2)), Some(&Data::String("Opening Balance".into())));
    assert_eq!(range.get_value((0, 3)), Some(&Data::String("Balanced".into())));
    assert_eq!(range.get_value((0, 4)), None);

    // Formatted currency string exports as the numeric 1234.5
    assert_eq!(range.get_value((1, 2)), Some(&Data::Float(1234.5)));

    // Booleans export as Yes/No strings
    assert_eq!(range.get_value((1, 3)), Some(&Data::String("Yes".into())));
    assert_eq!(range.get_value((2, 3)), Some(&Data::String("No".into())));

    // Numbers pass through unchanged
    assert_eq!(range.get_value((1, 0)), Some(&Data::Float(1.0)));
    assert_eq!(range.get_value((3, 1)), Some(&Data::String("Ledger 3".into())));
}

#[test]
fn test_export_serializes_full_set_not_visible_page() {
    let dir = tempfile::tempdir().unwrap();
    let payload = ledger_payload(12);
    let columns = columns_from_specs(&payload.columns);

    // The view sits on the last page; export ignores that entirely
    let mut pager = Pager::from_payload(&payload);
    assert_eq!(pager.request(3), Some(3));
    assert_eq!(pager.slice(&payload.rows).len(), 2);

    let (path, stats) = export_to_dir(&columns, &payload.rows, payload.title.as_deref(), dir.path()).unwrap();
    assert_eq!(stats.rows_exported, 12);

    let range = read_sheet(&path, "Ledgers");
    // Header plus all twelve rows
    assert_eq!(range.get_value((12, 1)), Some(&Data::String("Ledger 12".into())));
}

#[test]
fn test_export_null_and_nested_values() {
    let dir = tempfile::tempdir().unwrap();
    let columns = columns_from_specs(&[
        tabulon_protocol::ColumnSpec::new("name", "Name"),
        tabulon_protocol::ColumnSpec::new("tags", "Tags"),
        tabulon_protocol::ColumnSpec::new("group", "Group"),
        tabulon_protocol::ColumnSpec::new("note", "Note"),
    ]);
    let rows = vec![row(json!({
        "name": "Acme",
        "tags": ["a", "b", 3],
        "group": { "name": "Sundry Debtors", "id": 9 },
        "note": null
    }))];

    let path = dir.path().join("nested.xlsx");
    let stats = export(&columns, &rows, None, &path).unwrap();
    assert_eq!(stats.rows_exported, 1);

    let range = read_sheet(&path, "Export");
    assert_eq!(range.get_value((1, 1)), Some(&Data::String("a,b,3".into())));
    assert_eq!(range.get_value((1, 2)), Some(&Data::String("Sundry Debtors".into())));
    // Null exports as an empty cell. The header row spans this column, so
    // the unwritten data cell reads back as an explicit empty, not None.
    assert_eq!(range.get_value((1, 3)), Some(&Data::Empty));
}

#[test]
fn test_export_already_coerced_values_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let columns = columns_from_specs(&[tabulon_protocol::ColumnSpec::new("balanced", "Balanced")]);
    let rows = vec![
        row(json!({ "balanced": "Yes" })),
        row(json!({ "balanced": "No" })),
    ];

    let path = dir.path().join("idempotent.xlsx");
    export(&columns, &rows, Some("Recheck"), &path).unwrap();

    let range = read_sheet(&path, "Recheck");
    assert_eq!(range.get_value((1, 0)), Some(&Data::String("Yes".into())));
    assert_eq!(range.get_value((2, 0)), Some(&Data::String("No".into())));
}

#[test]
fn test_concurrent_exports_produce_independent_files() {
    // No single-flight guard exists on purpose; two triggers mean two files
    let dir = tempfile::tempdir().unwrap();
    let payload = ledger_payload(2);
    let columns = columns_from_specs(&payload.columns);

    let path_a = dir.path().join("a.xlsx");
    let path_b = dir.path().join("b.xlsx");
    export(&columns, &payload.rows, payload.title.as_deref(), &path_a).unwrap();
    export(&columns, &payload.rows, payload.title.as_deref(), &path_b).unwrap();

    assert!(path_a.exists());
    assert!(path_b.exists());
}

#[test]
fn test_title_with_path_separators_stays_in_target_dir() {
    let dir = tempfile::tempdir().unwrap();
    let mut payload = ledger_payload(1);
    payload.title = Some("Q1/Q2: Ledgers".into());

    let (path, _) = export_payload(&payload, dir.path()).unwrap();
    assert_eq!(path.parent(), Some(dir.path()));
    assert!(path
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("Q1Q2 Ledgers_"));

    let range = read_sheet(&path, "Q1Q2 Ledgers");
    assert_eq!(range.get_value((0, 0)), Some(&Data::String("#".into())));
}

#[test]
fn test_export_failure_leaves_no_partial_file() {
    let payload = ledger_payload(1);
    let columns = columns_from_specs(&payload.columns);

    let missing_dir = std::path::Path::new("/nonexistent-tabulon-dir");
    let target = missing_dir.join("out.xlsx");
    let err = export(&columns, &payload.rows, None, &target).unwrap_err();
    assert!(matches!(err, tabulon_io::xlsx::ExportError::Save(_)));
    assert!(!target.exists());
}
