//! Time formatting helpers.

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Rough wall-clock length of a span of block heights.
pub fn format_ticks(ticks: u64, block_secs: u64) -> String {
    format!("{ticks} blocks (~{})", format_duration(ticks.saturating_mul(block_secs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ticks() {
        assert_eq!(format_ticks(7_200, 12), "7200 blocks (~1d 0h)");
        assert_eq!(format_ticks(10, 12), "10 blocks (~2m 0s)");
    }

    #[test]
    fn test_format_duration_ranges() {
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(3_661), "1h 1m");
    }
}
