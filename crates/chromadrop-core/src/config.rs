//! Tunables for palette extraction and shape creation.

use crate::error::{ChromaError, ChromaResult};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// One quantization pass: how many colors to ask for and the pixel sampling stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleParams {
    /// Target number of colors.
    pub count: usize,
    /// Sample every `quality`-th pixel, 1 (every pixel) to 10.
    pub quality: usize,
}

impl SampleParams {
    pub const fn new(count: usize, quality: usize) -> Self {
        Self { count, quality }
    }
}

/// Palette extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum number of colors in the final palette.
    pub color_count: usize,
    /// Pass whose most populated color is taken as the dominant color.
    pub dominant: SampleParams,
    /// The two candidate palettes, in concatenation order.
    pub candidates: [SampleParams; 2],
    /// Colors closer than this to an already accepted color are dropped.
    pub distance_threshold: f64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            color_count: 6,
            dominant: SampleParams::new(5, 10),
            candidates: [SampleParams::new(6, 10), SampleParams::new(10, 5)],
            distance_threshold: 25.0,
        }
    }
}

/// Shape creation settings for the apply bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Size of the rectangle created when nothing in the selection takes a fill.
    pub default_shape_size: Size,
    /// Viewport assumed when the host reports none.
    pub fallback_viewport: Size,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            default_shape_size: Size::new(100.0, 100.0),
            fallback_viewport: Size::new(800.0, 600.0),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaConfig {
    pub extractor: ExtractorConfig,
    pub bridge: BridgeConfig,
}

impl ChromaConfig {
    /// Load from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ChromaResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reject settings that would make extraction or shape creation meaningless.
    pub fn validate(&self) -> ChromaResult<()> {
        let extractor = &self.extractor;
        if extractor.color_count == 0 {
            return Err(ChromaError::Config("color_count must be at least 1".into()));
        }
        let passes = std::iter::once(&extractor.dominant).chain(extractor.candidates.iter());
        for params in passes {
            if !(1..=255).contains(&params.count) || !(1..=10).contains(&params.quality) {
                return Err(ChromaError::Config(format!(
                    "sample pass needs count in 1..=255 and quality in 1..=10, got {:?}",
                    params
                )));
            }
        }
        if !(extractor.distance_threshold >= 0.0) {
            return Err(ChromaError::Config("distance_threshold must be >= 0".into()));
        }
        let size = self.bridge.default_shape_size;
        if !(size.width > 0.0 && size.height > 0.0) {
            return Err(ChromaError::Config("default_shape_size must be positive".into()));
        }
        Ok(())
    }
}
