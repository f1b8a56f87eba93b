/// Drops everything past the first decimal, without rounding (12.39 -> 12.3).
pub fn truncate_to_tenth(value: f64) -> f64 {
    (value * 10.0).trunc() / 10.0
}

/// Drops everything past the second decimal, without rounding.
pub fn truncate_to_hundredth(value: f64) -> f64 {
    (value * 100.0).trunc() / 100.0
}

/// Formats a coordinate with at most 4 fraction digits, no grouping separators and
/// no trailing zeros (`45.50001` -> `45.5`, `3.0` -> `3`).
pub fn format_coordinate(value: f64) -> String {
    let fixed = format!("{value:.4}");
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// True for values shaped like `YYYY-MM-DD`.
pub fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
