//! Pure display formatting for records: type classification, icon glyph, size and timestamp.
//!
//! Everything here is recomputed on every render and never stored on a [`Record`].

use chrono::{DateTime, Local, NaiveDateTime};
use explorer_host::Record;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Display classification derived from a record's MIME type or stored path.
pub enum RecordKind {
    /// `image/*`
    Image,
    /// `application/pdf`
    Pdf,
    /// `video/*`
    Video,
    /// `audio/*`
    Audio,
    /// Lower-cased file extension of the stored path.
    Extension(String),
    /// Nothing to classify by.
    Generic,
}

impl RecordKind {
    /// Type column label.
    pub fn label(&self) -> &str {
        match self {
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Extension(ext) => ext,
            Self::Generic => "file",
        }
    }

    /// Icon glyph shown next to the record name.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Image => "🖼️",
            Self::Pdf => "📄",
            Self::Video => "🎥",
            Self::Audio => "🎧",
            Self::Extension(ext) => match ext.as_str() {
                "doc" | "docx" | "text" => "📘",
                "xls" | "xlsx" | "csv" => "📊",
                "py" | "js" | "java" => "💻",
                _ => "📁",
            },
            Self::Generic => "📁",
        }
    }
}

/// Classifies a record: MIME family first, then the stored path's extension.
pub fn classify(record: &Record) -> RecordKind {
    if let Some(mime) = record.mime_type.as_deref() {
        if mime.starts_with("image/") {
            return RecordKind::Image;
        }
        if mime == "application/pdf" {
            return RecordKind::Pdf;
        }
        if mime.starts_with("video/") {
            return RecordKind::Video;
        }
        if mime.starts_with("audio/") {
            return RecordKind::Audio;
        }
    }

    record
        .stored_path
        .as_deref()
        .and_then(|path| path.rsplit('/').next())
        .and_then(|file_name| file_name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .map(|ext| RecordKind::Extension(ext.to_lowercase()))
        .unwrap_or(RecordKind::Generic)
}

/// Formats a byte count with binary (1024) thresholds and one decimal place.
///
/// Missing, zero and negative sizes render as `-`.
pub fn format_size(bytes: Option<i64>) -> String {
    let bytes = match bytes {
        Some(bytes) if bytes > 0 => bytes,
        _ => return "-".to_string(),
    };
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let kb = bytes as f64 / 1024.0;
    if kb < 1024.0 {
        return format!("{} KB", one_decimal(kb));
    }
    format!("{} MB", one_decimal(kb / 1024.0))
}

// Halves round up (1.25 -> 1.3), unlike `{:.1}`.
fn one_decimal(value: f64) -> String {
    let tenths = (value * 10.0).round() as i64;
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Formats an ISO-8601 timestamp as local `YYYY-MM-DD HH:MM:SS`.
///
/// Timestamps without an offset are taken as already local. Unparsable input is shown verbatim
/// and a missing timestamp renders as `-`.
pub fn format_timestamp(iso: Option<&str>) -> String {
    let Some(raw) = iso.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return "-".to_string();
    };
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return with_offset
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format(TIMESTAMP_FORMAT).to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use explorer_host::RecordId;

    use super::*;

    fn record(mime: Option<&str>, path: Option<&str>) -> Record {
        Record {
            id: RecordId::from(1),
            name: "x".to_string(),
            mime_type: mime.map(str::to_string),
            stored_path: path.map(str::to_string),
            size_bytes: None,
            created_at: None,
        }
    }

    #[test]
    fn size_thresholds_are_binary_with_one_decimal() {
        let cases = [
            (None, "-"),
            (Some(0), "-"),
            (Some(-5), "-"),
            (Some(1), "1 B"),
            (Some(1023), "1023 B"),
            (Some(1024), "1.0 KB"),
            (Some(1280), "1.3 KB"),
            (Some(1536), "1.5 KB"),
            (Some(1_048_576), "1.0 MB"),
            (Some(5 * 1_048_576 + 104_858), "5.1 MB"),
        ];

        for (input, expected) in cases {
            assert_eq!(format_size(input), expected, "input={input:?}");
        }
    }

    #[test]
    fn classification_prefers_mime_then_extension() {
        let cases = [
            (Some("image/png"), None, RecordKind::Image),
            (Some("application/pdf"), Some("x/y/a.bin"), RecordKind::Pdf),
            (Some("video/mp4"), None, RecordKind::Video),
            (Some("audio/mpeg"), None, RecordKind::Audio),
            (
                Some("application/octet-stream"),
                Some("documents/excel/ab_Report.XLSX"),
                RecordKind::Extension("xlsx".to_string()),
            ),
            (None, Some("others/ab_file"), RecordKind::Generic),
            (None, Some("odd.dir/ab_file"), RecordKind::Generic),
            (None, None, RecordKind::Generic),
        ];

        for (mime, path, expected) in cases {
            assert_eq!(classify(&record(mime, path)), expected, "mime={mime:?} path={path:?}");
        }
    }

    #[test]
    fn icons_follow_classification() {
        assert_eq!(RecordKind::Image.icon(), "🖼️");
        assert_eq!(RecordKind::Extension("docx".to_string()).icon(), "📘");
        assert_eq!(RecordKind::Extension("csv".to_string()).icon(), "📊");
        assert_eq!(RecordKind::Extension("py".to_string()).icon(), "💻");
        assert_eq!(RecordKind::Extension("zip".to_string()).icon(), "📁");
        assert_eq!(RecordKind::Generic.label(), "file");
    }

    #[test]
    fn timestamps_render_local_style_or_verbatim() {
        assert_eq!(
            format_timestamp(Some("2025-03-01T10:04:05.123456")),
            "2025-03-01 10:04:05"
        );
        assert_eq!(format_timestamp(Some("2025-03-01 10:04:05")), "2025-03-01 10:04:05");
        assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
        assert_eq!(format_timestamp(Some("  ")), "-");
        assert_eq!(format_timestamp(None), "-");
        assert_ne!(format_timestamp(Some("2025-03-01T10:04:05+00:00")), "-");
    }
}
