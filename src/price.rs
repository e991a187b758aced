//! Currency text parsing and formatting in integer cents.

/// Parses a price string like "$1,234.56" into cents.
///
/// Missing or malformed input is a normal outcome, not an error: callers get
/// `None` and carry on with the field absent.
pub fn parse_cents(text: &str) -> Option<i64> {
    let cleaned = text.trim().replace(['$', ','], "");
    if cleaned.is_empty() {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    Some((value * 100.0).round() as i64)
}

/// Formats cents as a dollar string ("$12.34", "-$0.50").
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

/// Converts a dollar amount (CLI input) to cents.
pub fn dollars_to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}
