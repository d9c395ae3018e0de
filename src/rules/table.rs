//! Brand rule table loading and resolution.
//!
//! The rule table is maintained by the catalog team as a spreadsheet and
//! consumed here as its CSV export. Columns (matched case-insensitively, any
//! order): `MARCA` (brand key), `PATRON_CLEAN` (pattern kind or empty),
//! `MAYUSCULA` (`TRUE` enables the extra uppercase pass), `FORMATO_FINAL`
//! (final name template). Unknown columns are ignored.

use anyhow::{Context, Result};
use std::path::Path;

use crate::constants::GENERIC_RULE_KEY;
use crate::models::{BrandRule, CleanPattern};

const COLUMN_BRAND: &str = "MARCA";
const COLUMN_PATTERN: &str = "PATRON_CLEAN";
const COLUMN_UPPERCASE: &str = "MAYUSCULA";
const COLUMN_FORMAT: &str = "FORMATO_FINAL";

/// Default final-name template when a row leaves `FORMATO_FINAL` empty.
const DEFAULT_FINAL_FORMAT: &str = "{filename}.jpg";

/// Ordered collection of brand rules with three-tier resolution.
///
/// Loaded once per run; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<BrandRule>,
}

impl RuleTable {
    /// Creates an empty rule table. Every lookup degrades to the pass-through
    /// fallback; useful for tests and for runs without brand configuration.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the rule table from a CSV file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the header row is missing,
    /// or the header lacks the `MARCA` column. Data rows degrade instead of
    /// failing: rows with an empty brand are skipped, and missing or empty
    /// cells fall back to defaulted field values.
    pub fn from_csv_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule table {}", path.display()))?;
        Self::from_csv_str(&content)
            .with_context(|| format!("Failed to parse rule table {}", path.display()))
    }

    /// Parses rule table CSV content.
    ///
    /// Cells are split on commas; templates and pattern keys are plain tokens
    /// by convention, so no quoting is supported on input.
    ///
    /// # Errors
    /// Returns an error when the header row is missing or lacks `MARCA`.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut lines = content.lines().filter(|line| !line.trim().is_empty());

        let header_line = lines.next().context("Rule table is empty")?;
        let header: Vec<String> = split_row(header_line)
            .iter()
            .map(|cell| cell.to_uppercase())
            .collect();

        let column = |name: &str| header.iter().position(|cell| cell == name);

        let brand_idx = column(COLUMN_BRAND)
            .with_context(|| format!("Rule table header is missing the {COLUMN_BRAND} column"))?;
        let pattern_idx = column(COLUMN_PATTERN);
        let uppercase_idx = column(COLUMN_UPPERCASE);
        let format_idx = column(COLUMN_FORMAT);

        let mut rules = Vec::new();
        for line in lines {
            let cells = split_row(line);

            let brand = cell(&cells, Some(brand_idx));
            if brand.is_empty() {
                continue;
            }

            let format = cell(&cells, format_idx);
            rules.push(BrandRule {
                brand: brand.to_string(),
                pattern: CleanPattern::from_key(cell(&cells, pattern_idx)),
                force_uppercase: cell(&cells, uppercase_idx).to_uppercase() == "TRUE",
                final_format: if format.is_empty() {
                    DEFAULT_FINAL_FORMAT.to_string()
                } else {
                    format.to_string()
                },
            });
        }

        Ok(Self { rules })
    }

    /// Resolves the rule for a brand.
    ///
    /// Three-tier fallback: case-insensitive brand match, then the
    /// case-insensitive `GENERIC` rule, then `None`. A `None` result means the
    /// filename passes through with only the enforced `.jpg` extension — this
    /// chain is how unconfigured brands still get processed.
    #[must_use]
    pub fn resolve(&self, brand: &str) -> Option<&BrandRule> {
        self.find(brand).or_else(|| self.find(GENERIC_RULE_KEY))
    }

    fn find(&self, brand: &str) -> Option<&BrandRule> {
        self.rules
            .iter()
            .find(|rule| rule.brand.eq_ignore_ascii_case(brand))
    }

    /// Returns the number of loaded rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Splits a CSV row into trimmed cells.
fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}

/// Looks up a cell by optional column index; absent columns and short rows
/// read as the empty string.
fn cell<'a>(cells: &'a [String], idx: Option<usize>) -> &'a str {
    idx.and_then(|i| cells.get(i)).map_or("", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
MARCA,PATRON_CLEAN,MAYUSCULA,FORMATO_FINAL
NIKE,limpieza_nike,TRUE,NIKE_{filename}
Adidas,limpieza_adidas,FALSE,{filename}
GENERIC,,TRUE,{filename}
";

    #[test]
    fn test_parse_and_resolve() {
        let table = RuleTable::from_csv_str(TABLE).unwrap();
        assert_eq!(table.len(), 3);

        let rule = table.resolve("NIKE").unwrap();
        assert_eq!(rule.pattern, CleanPattern::Nike);
        assert!(rule.force_uppercase);
        assert_eq!(rule.final_format, "NIKE_{filename}");
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let table = RuleTable::from_csv_str(TABLE).unwrap();
        let rule = table.resolve("adidas").unwrap();
        assert_eq!(rule.brand, "Adidas");
        assert_eq!(rule.pattern, CleanPattern::Adidas);
        assert!(!rule.force_uppercase);
    }

    #[test]
    fn test_resolve_falls_back_to_generic() {
        let table = RuleTable::from_csv_str(TABLE).unwrap();
        let rule = table.resolve("PUMA").unwrap();
        assert_eq!(rule.brand, "GENERIC");
        assert_eq!(rule.pattern, CleanPattern::Default);
    }

    #[test]
    fn test_resolve_without_generic_returns_none() {
        let table = RuleTable::from_csv_str(
            "MARCA,PATRON_CLEAN,MAYUSCULA,FORMATO_FINAL\nNIKE,limpieza_nike,TRUE,{filename}\n",
        )
        .unwrap();
        assert!(table.resolve("PUMA").is_none());
    }

    #[test]
    fn test_empty_table_resolves_nothing() {
        let table = RuleTable::empty();
        assert!(table.is_empty());
        assert!(table.resolve("NIKE").is_none());
    }

    #[test]
    fn test_header_order_does_not_matter() {
        let table = RuleTable::from_csv_str(
            "FORMATO_FINAL,MARCA,MAYUSCULA,PATRON_CLEAN\nX_{filename},NIKE,TRUE,limpieza_nike\n",
        )
        .unwrap();
        let rule = table.resolve("nike").unwrap();
        assert_eq!(rule.final_format, "X_{filename}");
        assert_eq!(rule.pattern, CleanPattern::Nike);
    }

    #[test]
    fn test_missing_cells_take_defaults() {
        // Row shorter than the header: pattern/uppercase/format all absent.
        let table =
            RuleTable::from_csv_str("MARCA,PATRON_CLEAN,MAYUSCULA,FORMATO_FINAL\nNIKE\n").unwrap();
        let rule = table.resolve("NIKE").unwrap();
        assert_eq!(rule.pattern, CleanPattern::Default);
        assert!(!rule.force_uppercase);
        assert_eq!(rule.final_format, "{filename}.jpg");
    }

    #[test]
    fn test_rows_without_brand_are_skipped() {
        let table = RuleTable::from_csv_str(
            "MARCA,PATRON_CLEAN,MAYUSCULA,FORMATO_FINAL\n,limpieza_nike,TRUE,{filename}\n",
        )
        .unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_header_is_an_error() {
        assert!(RuleTable::from_csv_str("").is_err());
        assert!(RuleTable::from_csv_str("PATRON_CLEAN,MAYUSCULA\nx,y\n").is_err());
    }

    #[test]
    fn test_mayuscula_is_case_insensitive() {
        let table = RuleTable::from_csv_str(
            "MARCA,MAYUSCULA\nNIKE,true\nADIDAS,yes\n",
        )
        .unwrap();
        assert!(table.resolve("NIKE").unwrap().force_uppercase);
        // Only the literal TRUE (any case) enables the flag.
        assert!(!table.resolve("ADIDAS").unwrap().force_uppercase);
    }
}
