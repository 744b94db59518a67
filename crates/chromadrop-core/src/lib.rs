//! Chromadrop Core Library
//!
//! Platform-agnostic color logic for the Chromadrop add-on: palette
//! extraction from images, CSS gradient building and parsing, and applying
//! colors or gradients to a host document.

pub mod bridge;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod gradient;
pub mod host;
pub mod palette;
pub mod protocol;
pub mod shapes;

pub use bridge::{ApplyPhase, ApplyReport, ApplyTarget, Paint, apply_color, apply_gradient, apply_paint};
pub use canvas::{Canvas, CanvasDocument};
pub use color::{Color, Rgb8, color_distance, color_to_hex, hex_to_color, luminance};
pub use config::{BridgeConfig, ChromaConfig, ExtractorConfig, SampleParams};
pub use error::{ChromaError, ChromaResult};
pub use gradient::{ColorStop, GradientDescriptor, GradientKind, build_descriptor, clipboard_text, parse_css, to_css};
pub use host::{DocumentHost, DocumentItem, Fillable, ItemId};
pub use palette::{ColorSelection, ImageUpload, Palette, PaletteExtractor, UploadFormat};
pub use protocol::{BoxFuture, DocumentSandbox, SandboxApi, SandboxRequest, SandboxResponse};
