// Row identity keys for stable list rendering.
//
// A key must be stable across re-renders with unchanged data and unique
// within the visible slice. Positional fallback satisfies neither across
// filtering or sorting, so taking it logs a diagnostic.

use serde_json::Value;
use tabulon_protocol::Row;

/// Caller-supplied key extractor: row plus absolute index → key.
pub type KeyExtractor = dyn Fn(&Row, usize) -> Option<String>;

/// Derive the identity key for one row, in priority order: caller-supplied
/// extractor → `id` field → `index` field → `key` field → positional index.
pub fn row_key(row: &Row, index: usize, extractor: Option<&KeyExtractor>) -> String {
    if let Some(extract) = extractor {
        if let Some(key) = extract(row, index) {
            return key;
        }
    }
    for field in ["id", "index", "key"] {
        if let Some(key) = row.get(field).and_then(scalar_key) {
            return key;
        }
    }
    log::warn!(
        "row {} has no id/index/key field; using positional key (unstable under reordering)",
        index
    );
    index.to_string()
}

/// Keys for a visible slice, starting at the slice's absolute offset.
pub fn slice_keys(rows: &[Row], offset: usize, extractor: Option<&KeyExtractor>) -> Vec<String> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| row_key(row, offset + i, extractor))
        .collect()
}

fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("test rows must be objects"),
        }
    }

    #[test]
    fn test_key_priority_order() {
        let all = row(json!({ "id": "r-9", "index": 4, "key": "k" }));
        assert_eq!(row_key(&all, 0, None), "r-9");

        let no_id = row(json!({ "index": 4, "key": "k" }));
        assert_eq!(row_key(&no_id, 0, None), "4");

        let key_only = row(json!({ "key": "k" }));
        assert_eq!(row_key(&key_only, 0, None), "k");

        let bare = row(json!({ "name": "x" }));
        assert_eq!(row_key(&bare, 7, None), "7");
    }

    #[test]
    fn test_extractor_wins_but_may_decline() {
        let r = row(json!({ "id": "r-1", "voucher_number": "V-17" }));

        let extractor: Box<KeyExtractor> =
            Box::new(|row, _| row.get("voucher_number").and_then(Value::as_str).map(String::from));
        assert_eq!(row_key(&r, 0, Some(extractor.as_ref())), "V-17");

        // Declining extractor falls through to the id field
        let declines: Box<KeyExtractor> = Box::new(|_, _| None);
        assert_eq!(row_key(&r, 0, Some(declines.as_ref())), "r-1");
    }

    #[test]
    fn test_null_and_empty_identity_fields_are_skipped() {
        let r = row(json!({ "id": null, "index": "", "key": "fallback" }));
        assert_eq!(row_key(&r, 3, None), "fallback");
    }

    #[test]
    fn test_slice_keys_stable_and_unique() {
        let rows: Vec<Row> = (0..5).map(|i| row(json!({ "id": format!("r-{}", i) }))).collect();
        let first = slice_keys(&rows, 10, None);
        let second = slice_keys(&rows, 10, None);
        assert_eq!(first, second);

        let mut deduped = first.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), rows.len());
    }

    #[test]
    fn test_positional_keys_use_absolute_offset() {
        let rows: Vec<Row> = (0..3).map(|_| row(json!({ "name": "x" }))).collect();
        assert_eq!(slice_keys(&rows, 5, None), vec!["5", "6", "7"]);
    }
}
