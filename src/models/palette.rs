//! Named color palette with nearest-neighbor classification.
//!
//! The palette is data, not code: the default ships as an embedded JSON file
//! and a deployment can swap it for its own table at runtime without a
//! rebuild. Entry order is significant — it is the tie-break order for
//! equidistant matches — so the palette is kept as an ordered list.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use super::RgbColor;

/// A single named reference color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Standard color name as it appears in the report (e.g., "rojo").
    pub name: String,
    /// Reference RGB value for this name.
    pub color: RgbColor,
}

/// Ordered set of named reference colors used to classify samples.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

/// On-disk palette schema: `{ "colors": [ { "name": ..., "hex": ... } ] }`.
#[derive(Debug, Deserialize)]
struct PaletteFile {
    colors: Vec<PaletteFileEntry>,
}

#[derive(Debug, Deserialize)]
struct PaletteFileEntry {
    name: String,
    hex: String,
}

impl Palette {
    /// Loads the default palette from embedded JSON data.
    ///
    /// # Errors
    /// Returns an error if the embedded data cannot be parsed. The embedded
    /// table is covered by tests, so this only fails on a broken build.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("../data/palette.json");
        Self::from_json(json_data).context("Failed to parse embedded default palette")
    }

    /// Loads a replacement palette from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or fails
    /// validation (empty palette, duplicate names, malformed hex values).
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read palette file {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse palette file {}", path.display()))
    }

    /// Parses and validates a palette from JSON text.
    fn from_json(json: &str) -> Result<Self> {
        let file: PaletteFile = serde_json::from_str(json)?;

        let mut entries = Vec::with_capacity(file.colors.len());
        for raw in file.colors {
            let color = RgbColor::from_hex(&raw.hex)
                .with_context(|| format!("Invalid hex value for palette color '{}'", raw.name))?;
            entries.push(PaletteEntry {
                name: raw.name,
                color,
            });
        }

        if entries.is_empty() {
            anyhow::bail!("Palette must contain at least one color");
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                anyhow::bail!("Duplicate palette color name '{}'", entry.name);
            }
        }

        Ok(Self { entries })
    }

    /// Returns the palette entry nearest to `sample` by Euclidean RGB distance.
    ///
    /// Ties are broken by declared order: the first entry with the minimal
    /// distance wins, so classification is reproducible across runs.
    #[must_use]
    pub fn nearest(&self, sample: RgbColor) -> &PaletteEntry {
        // Validation guarantees at least one entry.
        let mut best = &self.entries[0];
        let mut best_distance = sample.distance_to(&best.color);

        for entry in &self.entries[1..] {
            let distance = sample.distance_to(&entry.color);
            if distance < best_distance {
                best_distance = distance;
                best = entry;
            }
        }

        best
    }

    /// Returns the palette entries in declared order.
    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Returns the number of colors in the palette.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the palette has no colors. Never true for a loaded
    /// palette; provided for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
