//! Batch processing driver.
//!
//! Walks the brand directory tree, and for each image file: normalizes the
//! filename, re-encodes to JPEG, samples the dominant color through the
//! injected [`ColorSource`], classifies it against the palette, and appends
//! one report record. Processing is strictly sequential, one file at a time.
//!
//! The key contract is per-file failure isolation: any error inside the
//! per-file steps becomes an `Error` record and the batch moves on. Only
//! failures with no per-file context — creating the output roots, writing the
//! final report — abort the run.

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use std::fs;
use std::path::{Path, PathBuf};

use crate::color_source::ColorSource;
use crate::config::RunPaths;
use crate::constants::{JPEG_QUALITY, NEUTRAL_GRAY, REPORT_FILE_NAME, SUPPORTED_EXTENSIONS};
use crate::models::{ImageRecord, Palette};
use crate::report::Report;
use crate::rules::{build_final_name, RuleTable};

/// Outcome summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records with `OK` status.
    pub processed: usize,
    /// Records with `Error` status.
    pub failed: usize,
    /// Where the report CSV was written.
    pub report_path: PathBuf,
}

/// Sequential batch processor over a brand/image directory tree.
///
/// Holds everything a run needs; the color source is injected so tests and
/// deployments control where samples come from.
pub struct BatchPipeline {
    paths: RunPaths,
    rules: RuleTable,
    palette: Palette,
    color_source: Box<dyn ColorSource>,
}

impl BatchPipeline {
    /// Creates a pipeline for one run.
    #[must_use]
    pub fn new(
        paths: RunPaths,
        rules: RuleTable,
        palette: Palette,
        color_source: Box<dyn ColorSource>,
    ) -> Self {
        Self {
            paths,
            rules,
            palette,
            color_source,
        }
    }

    /// Processes every brand directory and writes the report.
    ///
    /// A completed run always produces a report, even if every file failed;
    /// per-file outcomes are visible only in the report's status column.
    ///
    /// # Errors
    /// Returns an error only for failures outside the per-file boundary:
    /// creating the output roots, listing the input tree, or writing the
    /// report.
    pub fn run(&self) -> Result<BatchSummary> {
        fs::create_dir_all(&self.paths.reports_dir).with_context(|| {
            format!(
                "Failed to create reports directory {}",
                self.paths.reports_dir.display()
            )
        })?;
        fs::create_dir_all(&self.paths.formatted_dir).with_context(|| {
            format!(
                "Failed to create formatted-images directory {}",
                self.paths.formatted_dir.display()
            )
        })?;

        let mut report = Report::new();

        for brand_dir in list_sorted(&self.paths.input_dir, |path| path.is_dir())? {
            let brand = file_name_string(&brand_dir);

            let brand_out = self.paths.formatted_dir.join(&brand);
            fs::create_dir_all(&brand_out).with_context(|| {
                format!("Failed to create brand directory {}", brand_out.display())
            })?;

            for file_path in list_sorted(&brand_dir, |path| is_image_file(path))? {
                let original = file_name_string(&file_path);
                let record = match self.process_file(&brand, &original, &file_path, &brand_out)
                {
                    Ok(record) => record,
                    Err(error) => {
                        ImageRecord::failure(brand.clone(), original, format!("{error:#}"))
                    }
                };
                report.push(record);
            }
        }

        let report_path = self.paths.reports_dir.join(REPORT_FILE_NAME);
        report.write_csv(&report_path)?;

        Ok(BatchSummary {
            processed: report.ok_count(),
            failed: report.error_count(),
            report_path,
        })
    }

    /// All per-file steps. Every error returned here is downgraded to an
    /// `Error` record by the caller; nothing propagates past the file.
    fn process_file(
        &self,
        brand: &str,
        original: &str,
        source_path: &Path,
        brand_out: &Path,
    ) -> Result<ImageRecord> {
        let final_name = build_final_name(original, brand, &self.rules);
        let saved_path = brand_out.join(&final_name);

        let decoded = image::open(source_path)
            .with_context(|| format!("Failed to decode {}", source_path.display()))?;
        let rgb = decoded.to_rgb8();

        let mut jpeg_bytes = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg_bytes, JPEG_QUALITY);
        encoder
            .encode(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            )
            .with_context(|| format!("Failed to encode {}", saved_path.display()))?;
        fs::write(&saved_path, &jpeg_bytes)
            .with_context(|| format!("Failed to write {}", saved_path.display()))?;

        // The oracle samples the re-encoded JPEG, not the source: the sample
        // must describe what the catalog will actually serve.
        let sample = self
            .color_source
            .dominant_color(&jpeg_bytes)?
            .unwrap_or(NEUTRAL_GRAY);

        let standard_color = self.palette.nearest(sample).name.clone();

        Ok(ImageRecord::success(
            brand.to_string(),
            original.to_string(),
            final_name,
            sample.to_hex(),
            standard_color,
            saved_path,
        ))
    }
}

/// Lists directory entries matching `keep`, sorted by name so report order is
/// reproducible across filesystems.
fn list_sorted(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if keep(&path) {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

fn is_image_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
}

fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
