/// Format bytes-per-second into human-readable speed string.
/// Unit steps at powers of 1024, always two decimals.
pub fn format_speed(bytes_per_sec: f64) -> String {
    if bytes_per_sec < 1024.0 {
        format!("{:.2} B/s", bytes_per_sec)
    } else if bytes_per_sec < 1024.0 * 1024.0 {
        format!("{:.2} KB/s", bytes_per_sec / 1024.0)
    } else if bytes_per_sec < 1024.0 * 1024.0 * 1024.0 {
        format!("{:.2} MB/s", bytes_per_sec / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB/s", bytes_per_sec / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Format a byte count into human-readable size string.
/// Byte-exact below 1024, one decimal above.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

/// Format a link speed (bits per second) as reported by the driver.
/// Returns None for 0 = unknown.
pub fn format_link_speed(bits_per_sec: u64) -> Option<String> {
    if bits_per_sec == 0 {
        return None;
    }
    let mbps = bits_per_sec as f64 / 1_000_000.0;
    if mbps >= 1000.0 {
        Some(format!("{:.0} Gbps", mbps / 1000.0))
    } else {
        Some(format!("{:.0} Mbps", mbps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_units_step_at_1024() {
        assert_eq!(format_speed(0.0), "0.00 B/s");
        assert_eq!(format_speed(1023.0), "1023.00 B/s");
        assert_eq!(format_speed(1024.0), "1.00 KB/s");
        assert_eq!(format_speed(1536.0), "1.50 KB/s");
        assert_eq!(format_speed(1024.0 * 1024.0), "1.00 MB/s");
        assert_eq!(format_speed(2.5 * 1024.0 * 1024.0 * 1024.0), "2.50 GB/s");
    }

    #[test]
    fn bytes_exact_below_one_kib() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1024 * 1024 * 3 / 2), "1.5 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.0 GB");
    }

    #[test]
    fn link_speed_unknown_is_none() {
        assert_eq!(format_link_speed(0), None);
        assert_eq!(format_link_speed(100_000_000).as_deref(), Some("100 Mbps"));
        assert_eq!(format_link_speed(1_000_000_000).as_deref(), Some("1 Gbps"));
    }
}
