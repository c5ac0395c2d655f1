const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

pub const DEFAULT_PRECISION: u32 = 2;

/// Human-readable byte count with base-1024 scaling, capped at TB.
///
/// A value only moves to the next unit once it is strictly greater than
/// 1024, so `1024` stays `"1024 B"`. Trailing zeros are dropped after
/// rounding (`2048` is `"2 KB"`, not `"2.00 KB"`).
pub fn format_bytes(bytes: u64, precision: u32) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value > 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", round_to(value, precision), UNITS[unit])
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}
