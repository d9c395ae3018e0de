//! Per-file processing outcome records.

use std::fmt;
use std::path::PathBuf;

/// Outcome of processing a single source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    /// File was renamed, converted, and classified successfully.
    Ok,
    /// Processing failed; the message describes the first error encountered.
    Error(String),
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Error(message) => write!(f, "Error: {message}"),
        }
    }
}

/// One report row: everything known about a single discovered source file.
///
/// Created by the batch driver and immutable once appended to the report.
/// On failure only `brand`, `original_filename`, and `status` are populated;
/// the remaining fields stay `None` and render as empty report cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Brand directory the file was found under.
    pub brand: String,
    /// Filename as discovered on disk.
    pub original_filename: String,
    /// Normalized filename, absent on early failure.
    pub final_filename: Option<String>,
    /// Dominant color sample as lowercase hex, absent on failure.
    pub dominant_hex: Option<String>,
    /// Nearest palette color name, absent on failure.
    pub standard_color: Option<String>,
    /// Where the re-encoded JPEG was written, absent on failure.
    pub saved_path: Option<PathBuf>,
    /// Processing outcome.
    pub status: RecordStatus,
}

impl ImageRecord {
    /// Builds a fully-populated success record.
    #[must_use]
    pub fn success(
        brand: String,
        original_filename: String,
        final_filename: String,
        dominant_hex: String,
        standard_color: String,
        saved_path: PathBuf,
    ) -> Self {
        Self {
            brand,
            original_filename,
            final_filename: Some(final_filename),
            dominant_hex: Some(dominant_hex),
            standard_color: Some(standard_color),
            saved_path: Some(saved_path),
            status: RecordStatus::Ok,
        }
    }

    /// Builds a failure record; every success field is absent.
    #[must_use]
    pub fn failure(brand: String, original_filename: String, message: String) -> Self {
        Self {
            brand,
            original_filename,
            final_filename: None,
            dominant_hex: None,
            standard_color: None,
            saved_path: None,
            status: RecordStatus::Error(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(RecordStatus::Ok.to_string(), "OK");
        assert_eq!(
            RecordStatus::Error("boom".to_string()).to_string(),
            "Error: boom"
        );
    }

    #[test]
    fn test_failure_record_has_no_success_fields() {
        let record = ImageRecord::failure(
            "NIKE".to_string(),
            "shoe.png".to_string(),
            "decode failed".to_string(),
        );
        assert!(record.final_filename.is_none());
        assert!(record.dominant_hex.is_none());
        assert!(record.standard_color.is_none());
        assert!(record.saved_path.is_none());
        assert_eq!(
            record.status,
            RecordStatus::Error("decode failed".to_string())
        );
    }
}
