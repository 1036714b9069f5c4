//! Free-form numeric text parsing and US-locale display formatting.
//!
//! Parsing is total: malformed input degrades to `0.0`, it never errors.
//! Formatting renders `$#,##0.00` / `#,##0.00%` and maps unavailable or
//! non-finite values to the empty string.

/// Parse money text (e.g. `"$1,234.50"`) into a float.
/// Strips currency symbols, thousands separators, and whitespace
/// (including non-breaking space). Returns `0.0` on empty or
/// unparsable input.
#[must_use]
pub fn parse_money(text: &str) -> f64 {
    parse_numeric(text)
}

/// Parse a share count (e.g. `"1 234.567890"`). Same cleanup rules as
/// [`parse_money`]; returns `0.0` on empty or unparsable input.
#[must_use]
pub fn parse_shares(text: &str) -> f64 {
    parse_numeric(text)
}

fn parse_numeric(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '$')
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Format a dollar amount as `$#,##0.00`.
/// Non-finite values render as an empty string.
#[must_use]
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let (sign, grouped, cents) = split_grouped(value);
    format!("${sign}{grouped}.{cents:02}")
}

/// Format an optional dollar amount; `None` (unavailable) renders as
/// an empty string, suitable for a blank table cell.
#[must_use]
pub fn format_money_opt(value: Option<f64>) -> String {
    value.map(format_money).unwrap_or_default()
}

/// Format a percentage as `#,##0.00%`.
/// Non-finite values render as an empty string.
#[must_use]
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let (sign, grouped, hundredths) = split_grouped(value);
    format!("{sign}{grouped}.{hundredths:02}%")
}

/// Format an optional percentage; `None` renders as an empty string.
#[must_use]
pub fn format_percent_opt(value: Option<f64>) -> String {
    value.map(format_percent).unwrap_or_default()
}

/// Split a finite value into (sign, thousands-grouped integer part,
/// two rounded fractional digits).
fn split_grouped(value: f64) -> (&'static str, String, u64) {
    let sign = if value < 0.0 { "-" } else { "" };
    let scaled = (value.abs() * 100.0).round() as u64;
    (sign, group_thousands(scaled / 100), scaled % 100)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
