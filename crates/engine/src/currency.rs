// Amount parsing and formatting shared by the currency column and export.
//
// Amounts arrive either as JSON numbers or as already-formatted strings
// ("₹1,234.50"). Parsing strips one leading currency symbol and thousands
// separators; formatting always produces the two-decimal, grouped form the
// producer itself uses.

use serde_json::Value;

/// Currency symbol the producer's business records use.
pub const DEFAULT_SYMBOL: &str = "₹";

/// Numeric reading of a raw field value, if it has one.
pub fn parse_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_amount_str(s),
        _ => None,
    }
}

/// Parse a possibly-formatted amount string. A leading currency symbol (any
/// prefix before the first digit, sign, or decimal point) and comma
/// separators are stripped before parsing. Returns None when no numeric
/// reading remains.
pub fn parse_amount_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let start = trimmed.find(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')?;
    let body: String = trimmed[start..].chars().filter(|&c| c != ',').collect();
    body.parse::<f64>().ok()
}

/// Format an amount as `{symbol}#,##0.00` (western thousands grouping, two
/// decimals). Mirrors the producer's own display formatting.
pub fn format_amount(symbol: &str, value: f64) -> String {
    let negative = value < 0.0 && (value * 100.0).round() != 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let frac = cents % 100;
    if negative {
        format!("-{}{}.{:02}", symbol, whole, frac)
    } else {
        format!("{}{}.{:02}", symbol, whole, frac)
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}
