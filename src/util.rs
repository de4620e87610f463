pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 3600;

/// Format whole seconds as `MM:SS`, or `H:MM:SS` once an hour or more remains
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / SECS_PER_HOUR;
    let minutes = (seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let secs = seconds % SECS_PER_MINUTE;

    match hours {
        0 => format!("{minutes:02}:{secs:02}"),
        h => format!("{h}:{minutes:02}:{secs:02}"),
    }
}

pub fn minutes_to_secs(minutes: u32) -> u64 {
    u64::from(minutes) * SECS_PER_MINUTE
}

/// Fraction of `total` already consumed, clamped to [0, 1]
pub fn elapsed_fraction(total: u64, remaining: u64) -> f64 {
    match total {
        0 => 1.0,
        t => (t.saturating_sub(remaining) as f64 / t as f64).clamp(0.0, 1.0),
    }
}
