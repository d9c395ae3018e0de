//! Filename cleanup patterns and final-name construction.
//!
//! Every pattern produces an uppercase, hyphen-normalized base which is then
//! substituted into the brand's final-name template. The transformation order
//! inside each pattern is part of the contract with the catalog team — bases
//! that differ only in spacing or numbering must normalize identically run
//! after run.

use regex::Regex;
use std::path::Path;

use super::table::RuleTable;
use crate::constants::FILENAME_PLACEHOLDER;
use crate::models::CleanPattern;

/// Campaign prefix stripped by the Nike pattern. The strip drops 8 characters:
/// the 7-character prefix plus the style-code letter that follows it.
const NIKE_STRIP_PREFIX: &str = "AURORA_";
const NIKE_STRIP_LEN: usize = 8;

/// Applies a cleanup pattern to a filename base (extension already removed).
///
/// All patterns finish by trimming and uppercasing the base, independent of
/// the rule's `force_uppercase` flag.
#[must_use]
pub fn apply_pattern(base: &str, pattern: CleanPattern) -> String {
    let cleaned = match pattern {
        CleanPattern::Nike => clean_nike(base),
        CleanPattern::Adidas => clean_adidas(base),
        CleanPattern::Default => clean_default(base),
    };

    cleaned.trim().to_uppercase()
}

/// Nike bases carry an `AURORA_` campaign prefix and free-form spacing.
fn clean_nike(base: &str) -> String {
    let base = if base.to_uppercase().starts_with(NIKE_STRIP_PREFIX) {
        base.chars().skip(NIKE_STRIP_LEN).collect::<String>()
    } else {
        base.to_string()
    };

    let base = base.replace(' ', "");
    collapse_hyphens(&base)
}

/// Adidas bases are `REFERENCE_description` with photo-session noise in the
/// description: numeric shot counters, the word "Photography", and a "white"
/// background marker.
fn clean_adidas(base: &str) -> String {
    let (reference, rest) = match base.split_once('_') {
        Some((reference, rest)) => (reference, rest.to_string()),
        None => (base, String::new()),
    };

    // Numeric tokens flanked by underscores first, then remaining _NN runs.
    let rest = Regex::new(r"_[0-9]+_").unwrap().replace_all(&rest, "_");
    let rest = Regex::new(r"_[0-9]+").unwrap().replace_all(&rest, "");
    let rest = Regex::new(r"(?i)Photography").unwrap().replace_all(&rest, "");
    let rest = Regex::new(r"(?i)_?white").unwrap().replace_all(&rest, "");

    let rest = rest.replace(' ', "-").replace('_', "-");
    let rest = collapse_hyphens(&rest);

    if rest.is_empty() {
        reference.to_string()
    } else {
        format!("{reference}_{rest}")
    }
}

/// Generic cleanup for brands without a dedicated pattern.
fn clean_default(base: &str) -> String {
    let base = base.trim().replace(' ', "-").replace('_', "-");
    collapse_hyphens(&base)
}

/// Collapses runs of 2+ hyphens into one and trims leading/trailing hyphens.
fn collapse_hyphens(base: &str) -> String {
    let collapsed = Regex::new(r"-{2,}").unwrap().replace_all(base, "-");
    collapsed.trim_matches('-').to_string()
}

/// Derives the final normalized filename for one source file.
///
/// Strips the original extension, resolves the brand rule (three-tier
/// fallback), applies the pattern and the rule's uppercase flag, substitutes
/// the cleaned base into the rule's template, and enforces a `.jpg` extension.
/// When no rule applies at all, the base passes through untouched except for
/// the enforced extension. The result always ends in `.jpg` — the pipeline
/// re-encodes every source to JPEG regardless of input format.
#[must_use]
pub fn build_final_name(original_filename: &str, brand: &str, rules: &RuleTable) -> String {
    let base = Path::new(original_filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(original_filename)
        .trim();

    let Some(rule) = rules.resolve(brand) else {
        return format!("{base}.jpg");
    };

    let mut cleaned = apply_pattern(base, rule.pattern);
    if rule.force_uppercase {
        // Already uppercase from the pattern; honored as configured.
        cleaned = cleaned.to_uppercase();
    }

    let mut final_name = rule.final_format.replace(FILENAME_PLACEHOLDER, &cleaned);
    if !final_name.to_lowercase().ends_with(".jpg") {
        final_name.push_str(".jpg");
    }
    final_name
}
