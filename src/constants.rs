//! Application-wide constants.
//!
//! This module defines constants used throughout the application, including
//! the application name and the fixed values of the processing contract.

use crate::models::RgbColor;

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Catalog Prep";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "catalog-prep";

/// Image file extensions picked up from brand directories (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// JPEG quality used when re-encoding formatted images.
pub const JPEG_QUALITY: u8 = 90;

/// File name of the tabular report written under the reports root.
pub const REPORT_FILE_NAME: &str = "reporte_colores_final.csv";

/// Rule-table key of the catch-all rule used for unconfigured brands.
pub const GENERIC_RULE_KEY: &str = "GENERIC";

/// Placeholder substituted with the cleaned filename in a rule's final format.
pub const FILENAME_PLACEHOLDER: &str = "{filename}";

/// Sample used when the color oracle returns no candidates. Not an error:
/// an undeterminable dominant color is reported as neutral gray.
pub const NEUTRAL_GRAY: RgbColor = RgbColor::new(128, 128, 128);

/// Environment variable pointing at a palette JSON file that replaces the
/// embedded default for this run.
pub const PALETTE_ENV_VAR: &str = "CATALOG_PREP_PALETTE";
