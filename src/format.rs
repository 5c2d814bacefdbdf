//! Display formatting for sizes, timestamps and ratios.

use chrono::{DateTime, Utc};

const UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];

/// Human-readable byte size with two decimals (`1024` -> `"1.00 KB"`).
///
/// Values below one kilobyte are printed as a whole number of bytes.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} Bytes", bytes);
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", size, UNITS[unit])
}

/// Upload timestamp as shown in the listing
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Percentage with one decimal; `0.0%` when the denominator is zero
pub fn format_percent(part: u64, whole: u64) -> String {
    if whole == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 / whole as f64 * 100.0)
}

/// Short label for a MIME type (`application/pdf` -> `PDF`)
pub fn mime_label(mime: &str) -> String {
    let subtype = mime.rsplit('/').next().unwrap_or(mime);
    let subtype = subtype.split(['+', ';']).next().unwrap_or(subtype);
    match subtype {
        "" => "Unknown".to_string(),
        "vnd.openxmlformats-officedocument.wordprocessingml.document" | "msword" => {
            "DOC".to_string()
        }
        "vnd.openxmlformats-officedocument.spreadsheetml.sheet" | "vnd.ms-excel" => {
            "XLS".to_string()
        }
        "plain" => "TXT".to_string(),
        "jpeg" => "JPG".to_string(),
        "mpeg" => "MP3".to_string(),
        other => other.to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1048576), "1.00 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.00 GB");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2025, 11, 6, 10, 30, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2025-11-06 10:30");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(1, 4), "25.0%");
        assert_eq!(format_percent(3, 0), "0.0%");
    }

    #[test]
    fn test_mime_label() {
        assert_eq!(mime_label("application/pdf"), "PDF");
        assert_eq!(mime_label("image/jpeg"), "JPG");
        assert_eq!(mime_label("text/plain; charset=utf-8"), "TXT");
        assert_eq!(mime_label("image/svg+xml"), "SVG");
    }
}
