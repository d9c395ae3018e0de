//! Dominant-color oracle seam.
//!
//! The pipeline never computes colors itself; it hands raw image bytes to a
//! [`ColorSource`] and uses the first candidate it gets back. The source is
//! injected by the caller with lifecycle scoped to the run, so tests swap in
//! doubles and deployments can swap in a remote vision service without
//! touching the pipeline. A remote implementation must carry its own request
//! timeout and surface expiry as an error, which the pipeline records per
//! file.

use anyhow::{Context, Result};
use std::collections::HashMap;

use crate::models::RgbColor;

/// Supplies the dominant color for an image.
///
/// `Ok(None)` means the source produced zero candidates; the pipeline maps
/// that to the neutral-gray sample rather than a failure. `Err` is a per-file
/// error.
pub trait ColorSource {
    /// Returns the most dominant color of the encoded image, if any.
    fn dominant_color(&self, image_bytes: &[u8]) -> Result<Option<RgbColor>>;
}

/// Pixels are sampled on a stride to keep large product shots cheap.
const SAMPLE_STRIDE: usize = 4;

/// Quantization levels per channel; bins out sensor noise and JPEG artifacts
/// so near-identical background pixels count as one color.
const QUANT_LEVELS: usize = 16;

/// Local dominant-color source: quantized histogram over sampled pixels.
///
/// Decodes the image, samples every [`SAMPLE_STRIDE`]th pixel on each axis,
/// quantizes each channel to [`QUANT_LEVELS`] levels, and returns the most
/// frequent bin. Frequency ties break toward the lower bin value so the
/// result is reproducible.
#[derive(Debug, Default)]
pub struct DominantPixelSource;

impl DominantPixelSource {
    /// Creates a new source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ColorSource for DominantPixelSource {
    fn dominant_color(&self, image_bytes: &[u8]) -> Result<Option<RgbColor>> {
        let image = image::load_from_memory(image_bytes)
            .context("Failed to decode image for color sampling")?;
        let rgb = image.to_rgb8();

        let mut counts: HashMap<(u8, u8, u8), u32> = HashMap::new();
        for y in (0..rgb.height()).step_by(SAMPLE_STRIDE) {
            for x in (0..rgb.width()).step_by(SAMPLE_STRIDE) {
                let pixel = rgb.get_pixel(x, y);
                *counts.entry(quantize(pixel.0)).or_insert(0) += 1;
            }
        }

        let mut bins: Vec<((u8, u8, u8), u32)> = counts.into_iter().collect();
        bins.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(bins
            .first()
            .map(|&((r, g, b), _)| RgbColor::new(r, g, b)))
    }
}

/// Quantizes a pixel to the floor of its histogram bin.
fn quantize(channels: [u8; 3]) -> (u8, u8, u8) {
    let step = 256 / QUANT_LEVELS;
    let bin = |value: u8| ((value as usize / step) * step).min(255) as u8;
    (bin(channels[0]), bin(channels[1]), bin(channels[2]))
}
