//! Rule-driven filename normalization.
//!
//! Two halves: loading and resolving the per-brand rule table
//! ([`table::RuleTable`]), and applying the cleanup patterns to filename
//! bases ([`cleaner`]).

pub mod cleaner;
pub mod table;

pub use cleaner::{apply_pattern, build_final_name};
pub use table::RuleTable;
