/// Abbreviates large counts for cards and tables: `1_234_567` becomes
/// `"1.2M"`, `3_400` becomes `"3.4K"`, smaller values print as-is.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_compact(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Signed variant for deltas, which may be negative.
#[must_use]
pub fn format_compact_signed(n: i64) -> String {
    let magnitude = format_compact(n.unsigned_abs());
    if n < 0 {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}
