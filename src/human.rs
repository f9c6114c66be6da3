const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Binary (1024-based) size with two decimals, e.g. "1.50 GB".
#[must_use]
pub fn human(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1_024.0 && unit < UNITS.len() - 1 {
        value /= 1_024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}
