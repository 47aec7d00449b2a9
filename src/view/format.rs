/// Fallback for a missing year, edition count, publisher or ISBN list.
pub const DASH: &str = "\u{2014}";

/// `1234567` -> `"1,234,567"`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// The first `limit` entries joined with `", "`, or `None` for an empty list.
pub fn join_first(values: &[String], limit: usize) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    Some(
        values
            .iter()
            .take(limit)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    )
}
