//! Palette extraction: quantize an image, drop near-duplicates, sort by luminance.

mod selection;
mod source;

pub use selection::ColorSelection;
pub use source::{ImageUpload, UploadFormat};

use crate::color::Rgb8;
use crate::config::{ExtractorConfig, SampleParams};
use crate::error::{ChromaError, ChromaResult};
use color_thief::ColorFormat;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Representative colors of an image, brightest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Run the dedupe / near-duplicate filter / luminance sort over candidate hex colors.
    ///
    /// Candidates are considered in order: exact duplicates keep their first
    /// occurrence, and a color survives only if it is farther than `threshold`
    /// from every color accepted before it. At most `limit` survivors are kept
    /// before sorting.
    pub fn from_candidates<I, S>(candidates: I, threshold: f64, limit: usize) -> ChromaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = candidates
            .into_iter()
            .map(|hex| Rgb8::from_hex(hex.as_ref()))
            .collect::<ChromaResult<Vec<_>>>()?;
        Ok(Self::from_rgb(parsed, threshold, limit))
    }

    fn from_rgb(candidates: Vec<Rgb8>, threshold: f64, limit: usize) -> Self {
        let mut seen = HashSet::new();
        let unique = candidates.into_iter().filter(|rgb| seen.insert(*rgb));

        let mut accepted: Vec<Rgb8> = Vec::new();
        for rgb in unique {
            if accepted.len() == limit {
                break;
            }
            if accepted.iter().all(|kept| kept.distance(rgb) > threshold) {
                accepted.push(rgb);
            }
        }

        // Stable sort: equal luminance keeps filter order.
        accepted.sort_by(|a, b| b.luminance().total_cmp(&a.luminance()));
        Self {
            colors: accepted.into_iter().map(Rgb8::to_hex).collect(),
        }
    }

    /// Hex colors, `#rrggbb`, brightest first.
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Turns decoded images into palettes.
#[derive(Debug, Clone, Default)]
pub struct PaletteExtractor {
    config: ExtractorConfig,
}

impl PaletteExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract a palette from decoded pixels.
    pub fn extract(&self, image: &RgbaImage) -> ChromaResult<Palette> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ChromaError::ImageDecodeFailure("image has no pixels".into()));
        }

        let mut candidates: Vec<Rgb8> = sample(image, self.config.dominant)
            .into_iter()
            .take(1)
            .collect();
        for params in &self.config.candidates {
            candidates.extend(sample(image, *params));
        }
        if candidates.is_empty() {
            return Err(ChromaError::ImageDecodeFailure(
                "image has no opaque pixels to sample".into(),
            ));
        }

        let candidate_count = candidates.len();
        let palette = Palette::from_rgb(
            candidates,
            self.config.distance_threshold,
            self.config.color_count,
        );
        log::debug!(
            "Extracted {} colors from {} candidates",
            palette.len(),
            candidate_count
        );
        Ok(palette)
    }

    /// Validate and decode an upload, then extract its palette.
    pub fn extract_upload(&self, upload: &ImageUpload) -> ChromaResult<Palette> {
        let image = upload.decode()?;
        self.extract(&image)
    }
}

/// Quantizer input filter: mostly opaque and not near-white.
fn is_sampleable(pixel: &Rgba<u8>) -> bool {
    let [r, g, b, a] = pixel.0;
    a >= 125 && !(r > 250 && g > 250 && b > 250)
}

fn sample(image: &RgbaImage, params: SampleParams) -> Vec<Rgb8> {
    let quality = params.quality.clamp(1, 10);
    if !image.pixels().step_by(quality).any(is_sampleable) {
        return Vec::new();
    }
    // The quantizer wants at least two target colors.
    let max_colors = params.count.clamp(2, 255) as u8;
    match color_thief::get_palette(image.as_raw(), ColorFormat::Rgba, quality as u8, max_colors) {
        Ok(colors) => colors
            .into_iter()
            .take(params.count)
            .map(|c| Rgb8::new(c.r, c.g, c.b))
            .collect(),
        Err(err) => {
            log::warn!("Quantization pass {params:?} failed: {err:?}");
            Vec::new()
        }
    }
}
