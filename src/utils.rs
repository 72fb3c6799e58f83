/// Formats a byte count in 1024-based units with up to two decimals,
/// trailing zeros trimmed ("0 Bytes", "1 KB", "1.5 KB", "1 GB").
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let mut val = bytes as f64;

    for unit in ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB"] {
        if val < 1024.0 {
            return format!("{} {}", trim_zeros(format!("{val:.2}")), unit);
        }

        val /= 1024.0;
    }

    format!("{} ZB", trim_zeros(format!("{val:.2}")))
}

/// "1.5 MB/20 MB", or just the downloaded size when the total is unknown.
pub fn format_download_bytes(downloaded: u64, total: u64) -> String {
    if total == 0 {
        format_bytes(downloaded)
    } else {
        format!("{}/{}", format_bytes(downloaded), format_bytes(total))
    }
}

fn trim_zeros(formatted: String) -> String {
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_owned()
    } else {
        formatted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_spelled_out() {
        assert_eq!(format_bytes(0), "0 Bytes");
    }

    #[test]
    fn unit_boundaries() {
        assert_eq!(format_bytes(1023), "1023 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1024 * 1024), "1 MB");
        assert_eq!(format_bytes(1_073_741_824), "1 GB");
    }

    #[test]
    fn fractions_are_trimmed_to_two_decimals() {
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1126), "1.1 KB");
        assert_eq!(format_bytes(1824), "1.78 KB");
    }

    #[test]
    fn download_pair_degrades_without_a_total() {
        assert_eq!(format_download_bytes(1536, 1024 * 1024), "1.5 KB/1 MB");
        assert_eq!(format_download_bytes(1536, 0), "1.5 KB");
    }
}
