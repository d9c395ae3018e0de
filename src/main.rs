//! Catalog Prep - batch normalizer and color classifier for product photos
//!
//! Walks an input tree of brand directories, renames and re-encodes every
//! product photo per the brand rule table, classifies each image's dominant
//! color against the standard palette, and writes a tabular report.

// Module declarations
mod color_source;
mod config;
mod constants;
mod models;
mod pipeline;
mod report;
mod rules;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use color_source::DominantPixelSource;
use config::RunPaths;
use constants::{APP_NAME, PALETTE_ENV_VAR};
use models::Palette;
use pipeline::BatchPipeline;
use rules::RuleTable;

/// Catalog Prep - batch normalizer and color classifier for product photos
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory with one subdirectory of images per brand
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Directory the report CSV is written into
    #[arg(value_name = "REPORTS_DIR")]
    reports_dir: PathBuf,

    /// Root directory for the re-encoded images, mirrored by brand
    #[arg(value_name = "FORMATTED_DIR")]
    formatted_dir: PathBuf,

    /// Path to the brand rule table CSV
    #[arg(value_name = "RULES_CSV")]
    rules_path: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
    println!();

    let paths = RunPaths {
        input_dir: cli.input_dir,
        reports_dir: cli.reports_dir,
        formatted_dir: cli.formatted_dir,
        rules_path: cli.rules_path,
    };
    paths.validate()?;

    let palette = load_palette()?;
    let rules = RuleTable::from_csv_file(&paths.rules_path)?;
    println!(
        "Loaded {} brand rules and a {}-color palette",
        rules.len(),
        palette.len()
    );

    let pipeline = BatchPipeline::new(
        paths,
        rules,
        palette,
        Box::new(DominantPixelSource::new()),
    );
    let summary = pipeline.run()?;

    println!();
    println!("Batch complete:");
    println!("  Processed: {}", summary.processed);
    println!("  Failed:    {}", summary.failed);
    println!("  Report:    {}", summary.report_path.display());

    Ok(())
}

/// Loads the palette, honoring the per-deployment override file.
fn load_palette() -> Result<Palette> {
    match std::env::var_os(PALETTE_ENV_VAR) {
        Some(path) => {
            let path = PathBuf::from(path);
            Palette::from_json_file(&path)
                .with_context(|| format!("Invalid palette override ({PALETTE_ENV_VAR})"))
        }
        None => Palette::load(),
    }
}
