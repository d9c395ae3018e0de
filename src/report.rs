//! Tabular run report.
//!
//! One row per discovered source file, in processing order, written exactly
//! once at the end of a run. Column names follow the catalog team's
//! spreadsheet convention, matching the rule table's language.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

use crate::models::ImageRecord;

const HEADER: &str =
    "marca,archivo_original,archivo_final,color_dominante,color_estandar,ruta_guardado,estado";

/// Append-only sequence of per-file records.
///
/// Exclusively owned by the pipeline driver; records are immutable once
/// appended.
#[derive(Debug, Default)]
pub struct Report {
    records: Vec<ImageRecord>,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record.
    pub fn push(&mut self, record: ImageRecord) {
        self.records.push(record);
    }

    /// Returns the accumulated records in processing order.
    #[must_use]
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    /// Number of records with `OK` status.
    #[must_use]
    pub fn ok_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.status == crate::models::RecordStatus::Ok)
            .count()
    }

    /// Number of records with `Error` status.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.records.len() - self.ok_count()
    }

    /// Renders the report as CSV text.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(HEADER);
        output.push('\n');

        for record in &self.records {
            let optional = |value: &Option<String>| value.clone().unwrap_or_default();
            let saved = record
                .saved_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default();

            let cells = [
                record.brand.clone(),
                record.original_filename.clone(),
                optional(&record.final_filename),
                optional(&record.dominant_hex),
                optional(&record.standard_color),
                saved,
                record.status.to_string(),
            ];

            let row: Vec<String> = cells.iter().map(|cell| escape_cell(cell)).collect();
            let _ = writeln!(output, "{}", row.join(","));
        }

        output
    }

    /// Writes the report CSV to `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_csv())
            .with_context(|| format!("Failed to write report to {}", path.display()))
    }
}

/// Quotes a cell when it contains a separator, quote, or newline. Error
/// messages routinely contain commas, so rows must stay parseable.
fn escape_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn success_record() -> ImageRecord {
        ImageRecord::success(
            "NIKE".to_string(),
            "AURORA_SHOE.jpg".to_string(),
            "NIKE_HOE.jpg".to_string(),
            "#e00000".to_string(),
            "rojo".to_string(),
            PathBuf::from("out/NIKE/NIKE_HOE.jpg"),
        )
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_record() {
        let mut report = Report::new();
        report.push(success_record());
        report.push(ImageRecord::failure(
            "NIKE".to_string(),
            "broken.png".to_string(),
            "decode failed".to_string(),
        ));

        let csv = report.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "NIKE,AURORA_SHOE.jpg,NIKE_HOE.jpg,#e00000,rojo,out/NIKE/NIKE_HOE.jpg,OK"
        );
        // Failure rows leave every success column empty.
        assert_eq!(lines[2], "NIKE,broken.png,,,,,Error: decode failed");
    }

    #[test]
    fn test_cells_with_commas_and_quotes_are_escaped() {
        let mut report = Report::new();
        report.push(ImageRecord::failure(
            "ACME".to_string(),
            "a.png".to_string(),
            "bad header, expected \"PNG\"".to_string(),
        ));

        let csv = report.to_csv();
        assert!(csv
            .lines()
            .nth(1)
            .unwrap()
            .ends_with("\"Error: bad header, expected \"\"PNG\"\"\""));
    }

    #[test]
    fn test_counts() {
        let mut report = Report::new();
        report.push(success_record());
        report.push(ImageRecord::failure(
            "X".to_string(),
            "y.png".to_string(),
            "boom".to_string(),
        ));
        assert_eq!(report.ok_count(), 1);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.records().len(), 2);
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reporte.csv");

        let mut report = Report::new();
        report.push(success_record());
        report.write_csv(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, report.to_csv());
    }

    #[test]
    fn test_status_order_matches_records_order() {
        let mut report = Report::new();
        for name in ["1.png", "2.png", "3.png"] {
            report.push(ImageRecord::failure(
                "B".to_string(),
                name.to_string(),
                "x".to_string(),
            ));
        }
        let originals: Vec<&str> = report
            .records()
            .iter()
            .map(|record| record.original_filename.as_str())
            .collect();
        assert_eq!(originals, ["1.png", "2.png", "3.png"]);
    }
}
