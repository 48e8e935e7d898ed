//! Pure display helpers: byte sizes, timestamps and extension classification.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Extensions the preview pane can render inline. Compared case-insensitively.
pub const PREVIEWABLE_EXTENSIONS: [&str; 13] = [
    "pdf", "txt", "html", "htm", "jpg", "jpeg", "png", "gif", "svg", "webp", "mp4", "webm", "ogg",
];

/// Render a byte count with the largest fitting base-1024 unit.
///
/// Values are rounded to two decimals with trailing zeros dropped, so
/// `1024` renders as `1 KB` and `1536` as `1.5 KB`. The unit tops out at GB.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exp = (bytes.ilog(1024) as usize).min(SIZE_UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[exp])
}

/// Render a timestamp in the runtime's local time zone.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    format_timestamp_in(ts, &Local)
}

/// Render a timestamp in an explicit time zone, e.g. `3/1/2025, 10:15:00 AM`.
pub fn format_timestamp_in<Tz>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(tz)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

/// Lowercased extension of the key's final path segment.
///
/// Returns `None` for names without a dot or with a trailing dot.
pub fn extension(key: &str) -> Option<String> {
    let name = key.rsplit('/').next().unwrap_or(key);
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => Some(ext.to_ascii_lowercase()),
        _ => None,
    }
}

/// Whether the key's extension is on the preview allow-list.
///
/// Judged from the name alone; content is never inspected.
pub fn is_previewable(key: &str) -> bool {
    extension(key)
        .map(|ext| PREVIEWABLE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Viewer a preview surface should use for a previewable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Pdf,
    Text,
    Html,
    Image,
    Video,
    Audio,
}

impl PreviewKind {
    pub fn for_key(key: &str) -> Option<Self> {
        let kind = match extension(key)?.as_str() {
            "pdf" => PreviewKind::Pdf,
            "txt" => PreviewKind::Text,
            "html" | "htm" => PreviewKind::Html,
            "jpg" | "jpeg" | "png" | "gif" | "svg" | "webp" => PreviewKind::Image,
            "mp4" | "webm" => PreviewKind::Video,
            "ogg" => PreviewKind::Audio,
            _ => return None,
        };
        Some(kind)
    }

    pub fn label(self) -> &'static str {
        match self {
            PreviewKind::Pdf => "pdf",
            PreviewKind::Text => "text",
            PreviewKind::Html => "html",
            PreviewKind::Image => "image",
            PreviewKind::Video => "video",
            PreviewKind::Audio => "audio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn formats_sizes() {
        assert_eq!(format_size(0), "0 Bytes");
        assert_eq!(format_size(1), "1 Bytes");
        assert_eq!(format_size(1000), "1000 Bytes");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_048_576), "1 MB");
        assert_eq!(format_size(5 * 1024 * 1024 + 256 * 1024), "5.25 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn size_unit_caps_at_gb() {
        assert_eq!(format_size(2 * 1024u64.pow(4)), "2048 GB");
    }

    #[test]
    fn formats_timestamp_in_zone() {
        let ts = DateTime::parse_from_rfc3339("2025-03-01T10:15:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp_in(&ts, &Utc), "3/1/2025, 10:15:00 AM");

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_timestamp_in(&ts, &plus_two), "3/1/2025, 12:15:00 PM");
    }

    #[test]
    fn previewability_is_extension_based() {
        assert!(is_previewable("a.PDF"));
        assert!(is_previewable("photos/2025/cat.JpEg"));
        assert!(!is_previewable("a.exe"));
        assert!(!is_previewable("noext"));
        assert!(!is_previewable("trailing."));
        assert!(!is_previewable("dir.pdf/readme"));
    }

    #[test]
    fn preview_kind_follows_extension() {
        assert_eq!(PreviewKind::for_key("movie.webm"), Some(PreviewKind::Video));
        assert_eq!(PreviewKind::for_key("song.ogg"), Some(PreviewKind::Audio));
        assert_eq!(PreviewKind::for_key("index.HTM"), Some(PreviewKind::Html));
        assert_eq!(PreviewKind::for_key("archive.zip"), None);
    }
}
