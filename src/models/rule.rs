//! Brand rule model: per-brand filename cleanup configuration.

use serde::{Deserialize, Serialize};

/// Filename cleanup pattern applied to a brand's files.
///
/// A closed set: the rule table selects one of these by key, and the cleaning
/// engine dispatches exhaustively so a new variant cannot be added without
/// implementing its transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CleanPattern {
    /// Strip the "AURORA_" campaign prefix, drop spaces, collapse hyphens.
    Nike,
    /// Reference/description split on the first underscore with numeric-token
    /// and marketing-word stripping in the description part.
    Adidas,
    /// Generic cleanup: spaces and underscores to hyphens, collapse, trim.
    #[default]
    Default,
}

impl CleanPattern {
    /// Parses a pattern from its rule-table key.
    ///
    /// Empty or unrecognized keys select [`CleanPattern::Default`]; a missing
    /// pattern cell degrades to generic cleanup rather than failing the row.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "limpieza_nike" => Self::Nike,
            "limpieza_adidas" => Self::Adidas,
            _ => Self::Default,
        }
    }
}

/// One row of the brand rule table.
///
/// Loaded once per run from the external rule table and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandRule {
    /// Brand key; matched case-insensitively during resolution.
    pub brand: String,
    /// Cleanup pattern applied to the filename base.
    pub pattern: CleanPattern,
    /// Extra uppercase pass after the pattern. Redundant with the pattern's
    /// own final uppercase step but honored as configured.
    pub force_uppercase: bool,
    /// Final name template containing a single `{filename}` placeholder.
    pub final_format: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_known_patterns() {
        assert_eq!(CleanPattern::from_key("limpieza_nike"), CleanPattern::Nike);
        assert_eq!(
            CleanPattern::from_key("limpieza_adidas"),
            CleanPattern::Adidas
        );
    }

    #[test]
    fn test_from_key_trims_whitespace() {
        assert_eq!(
            CleanPattern::from_key("  limpieza_nike  "),
            CleanPattern::Nike
        );
    }

    #[test]
    fn test_from_key_unknown_falls_back_to_default() {
        assert_eq!(CleanPattern::from_key(""), CleanPattern::Default);
        assert_eq!(CleanPattern::from_key("limpieza_puma"), CleanPattern::Default);
        // Keys are exact; a case mismatch is an unconfigured pattern.
        assert_eq!(CleanPattern::from_key("LIMPIEZA_NIKE"), CleanPattern::Default);
    }
}
