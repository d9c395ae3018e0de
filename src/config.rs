//! Run configuration: the four filesystem roots of a batch run.

use anyhow::Result;
use std::path::PathBuf;

/// Filesystem locations for one batch run.
///
/// The input root contains one subdirectory per brand. Outputs are a mirrored
/// brand tree of re-encoded JPEGs under `formatted_dir` and a single report
/// CSV under `reports_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPaths {
    /// Root directory containing one subdirectory per brand.
    pub input_dir: PathBuf,
    /// Directory the report CSV is written into.
    pub reports_dir: PathBuf,
    /// Root directory for re-encoded images, mirrored by brand.
    pub formatted_dir: PathBuf,
    /// Path to the brand rule table CSV.
    pub rules_path: PathBuf,
}

impl RunPaths {
    /// Validates that the run inputs exist before any work starts.
    ///
    /// Output directories are not required to exist; the pipeline creates
    /// them. Only the inputs must already be in place.
    ///
    /// # Errors
    /// Returns an error naming the missing input directory or rule table.
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.is_dir() {
            anyhow::bail!(
                "Input directory not found: {}",
                self.input_dir.display()
            );
        }
        if !self.rules_path.is_file() {
            anyhow::bail!("Rule table not found: {}", self.rules_path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_existing_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let rules = dir.path().join("reglas.csv");
        std::fs::write(&rules, "MARCA\n").unwrap();

        let paths = RunPaths {
            input_dir: dir.path().to_path_buf(),
            reports_dir: dir.path().join("reportes"),
            formatted_dir: dir.path().join("formateadas"),
            rules_path: rules,
        };
        assert!(paths.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RunPaths {
            input_dir: dir.path().join("nope"),
            reports_dir: dir.path().to_path_buf(),
            formatted_dir: dir.path().to_path_buf(),
            rules_path: dir.path().join("reglas.csv"),
        };
        assert!(paths.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_rule_table() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RunPaths {
            input_dir: dir.path().to_path_buf(),
            reports_dir: dir.path().to_path_buf(),
            formatted_dir: dir.path().to_path_buf(),
            rules_path: dir.path().join("missing.csv"),
        };
        assert!(paths.validate().is_err());
    }
}
