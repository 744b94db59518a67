//! Command-line front end: extract palettes, build gradients and try the
//! apply bridge against a demo document without the browser.

use std::io::Write;
use std::path::{Path, PathBuf};

use chromadrop_core::shapes::{Ellipse, Image, Line, Rectangle, Shape};
use chromadrop_core::{
    Canvas, ChromaConfig, ChromaError, Color, DocumentSandbox, GradientKind, ImageUpload, PaletteExtractor,
    SandboxApi, build_descriptor, clipboard_text, to_css,
};
use clap::{Parser, Subcommand, ValueEnum};
use kurbo::Point;
use peniko::Brush;
use thiserror::Error;

/// Chromadrop color tools.
#[derive(Parser, Debug)]
#[command(name = "chromadrop", about = "Extract palettes, build CSS gradients and apply them")]
pub struct Cli {
    /// JSON configuration file (defaults are used for missing fields).
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the palette of an image, brightest color first.
    Extract {
        image: PathBuf,
        /// Number of colors to keep.
        #[arg(long)]
        count: Option<usize>,
        /// Minimum distance between kept colors.
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// Print the CSS gradient over the given colors and its clipboard text.
    Gradient {
        #[arg(required = true, num_args = 1..)]
        colors: Vec<String>,
        #[arg(long)]
        radial: bool,
        /// Linear gradient angle in degrees.
        #[arg(long, default_value_t = 90, allow_hyphen_values = true)]
        angle: i64,
    },
    /// Apply a hex color or CSS gradient to a demo document and print it.
    Apply {
        /// `#RRGGBB` or a `linear-gradient(...)` / `radial-gradient(...)` string.
        paint: String,
        /// Demo items to select before applying.
        #[arg(long, value_enum, num_args = 0..)]
        select: Vec<DemoItem>,
    },
}

/// Items of the demo document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoItem {
    Rectangle,
    Ellipse,
    Line,
    Image,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Chroma(#[from] ChromaError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Apply failed for {0}")]
    ApplyFailed(String),
}

pub type CliResult<T> = Result<T, CliError>;

/// Run a parsed command line, writing results to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> CliResult<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Extract {
            image,
            count,
            threshold,
        } => extract(&image, count, threshold, config, out),
        Command::Gradient {
            colors,
            radial,
            angle,
        } => gradient(&colors, radial, angle, out),
        Command::Apply { paint, select } => apply(&paint, &select, config, out),
    }
}

fn load_config(path: Option<&Path>) -> CliResult<ChromaConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(ChromaConfig::from_json(&json)?)
        }
        None => Ok(ChromaConfig::default()),
    }
}

fn extract<W: Write>(
    path: &Path,
    count: Option<usize>,
    threshold: Option<f64>,
    mut config: ChromaConfig,
    out: &mut W,
) -> CliResult<()> {
    if let Some(count) = count {
        config.extractor.color_count = count;
    }
    if let Some(threshold) = threshold {
        config.extractor.distance_threshold = threshold;
    }
    config.validate()?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let upload = ImageUpload::from_file_bytes(file_name, std::fs::read(path)?);
    let palette = PaletteExtractor::new(config.extractor).extract_upload(&upload)?;
    for hex in palette.colors() {
        writeln!(out, "{hex}")?;
    }
    Ok(())
}

fn gradient<W: Write>(colors: &[String], radial: bool, angle: i64, out: &mut W) -> CliResult<()> {
    let kind = if radial {
        GradientKind::Radial
    } else {
        GradientKind::Linear
    };
    let css = to_css(&build_descriptor(colors, kind, angle)?);
    writeln!(out, "{css}")?;
    writeln!(out, "{}", clipboard_text(&css))?;
    Ok(())
}

/// A small document with one item of each kind.
pub fn demo_canvas(select: &[DemoItem]) -> Canvas {
    let mut canvas = Canvas::new();
    canvas.set_viewport_size(800.0, 600.0);
    let items = [
        (
            DemoItem::Rectangle,
            Shape::Rectangle(Rectangle::new(Point::new(40.0, 40.0), 120.0, 80.0)),
        ),
        (
            DemoItem::Ellipse,
            Shape::Ellipse(Ellipse::new(Point::new(260.0, 80.0), 60.0, 40.0)),
        ),
        (
            DemoItem::Line,
            Shape::Line(Line::new(Point::new(40.0, 200.0), Point::new(320.0, 200.0))),
        ),
        (
            DemoItem::Image,
            Shape::Image(Image::new(Point::new(400.0, 40.0), 160.0, 120.0)),
        ),
    ];
    for (kind, shape) in items {
        let id = canvas.add_shape(shape);
        if select.contains(&kind) {
            canvas.add_to_selection(id);
        }
    }
    canvas
}

fn apply<W: Write>(paint: &str, select: &[DemoItem], config: ChromaConfig, out: &mut W) -> CliResult<()> {
    let mut sandbox = DocumentSandbox::with_config(demo_canvas(select), config.bridge);
    let ok = if paint.contains("gradient(") {
        pollster::block_on(sandbox.apply_gradient_to_selection(paint))
    } else {
        pollster::block_on(sandbox.apply_color_to_selection(paint))
    };
    if !ok {
        return Err(CliError::ApplyFailed(paint.to_string()));
    }

    let canvas = sandbox.into_host();
    for shape in canvas.document.shapes_ordered() {
        let marker = if canvas.is_selected(shape.id()) { "*" } else { " " };
        let bounds = shape.bounds();
        writeln!(
            out,
            "{marker} {:<9} ({}, {}) {}x{}  {}",
            shape_kind(shape),
            bounds.x0,
            bounds.y0,
            bounds.width(),
            bounds.height(),
            describe_fill(shape.fill())
        )?;
    }
    Ok(())
}

fn shape_kind(shape: &Shape) -> &'static str {
    match shape {
        Shape::Rectangle(_) => "rectangle",
        Shape::Ellipse(_) => "ellipse",
        Shape::Line(_) => "line",
        Shape::Image(_) => "image",
    }
}

fn describe_fill(fill: Option<&Brush>) -> String {
    match fill {
        None => "no fill".to_string(),
        Some(Brush::Solid(color)) => Color::from(*color).to_hex(),
        Some(Brush::Gradient(gradient)) => format!("gradient, {} stops", gradient.stops.len()),
        Some(_) => "image fill".to_string(),
    }
}
