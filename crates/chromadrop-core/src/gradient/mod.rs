//! Gradient descriptors and their CSS form.
//!
//! The CSS text produced here is also what the sandbox accepts back, so
//! `parse_css(to_css(d))` has to reproduce `d`'s kind, stops and (for linear
//! gradients) angle.

mod geometry;

pub use geometry::{linear_endpoints, radial_extent};

use crate::color::{Color, hex_to_color};
use crate::error::{ChromaError, ChromaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gradient shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    /// Always a centered circle; the angle is ignored.
    Radial,
}

impl GradientKind {
    /// Get display name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            GradientKind::Linear => "linear",
            GradientKind::Radial => "radial",
        }
    }

    fn css_function(self) -> &'static str {
        match self {
            GradientKind::Linear => "linear-gradient",
            GradientKind::Radial => "radial-gradient",
        }
    }
}

impl fmt::Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GradientKind {
    type Err = ChromaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(GradientKind::Linear),
            "radial" => Ok(GradientKind::Radial),
            other => Err(ChromaError::UnsupportedGradientType(other.to_string())),
        }
    }
}

/// One color stop; `position` is a fraction in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: Color,
    pub position: f64,
}

/// Structured form of a CSS gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientDescriptor {
    pub kind: GradientKind,
    /// Degrees in [0, 360]; only meaningful for linear gradients.
    pub angle_degrees: u16,
    pub stops: Vec<ColorStop>,
}

impl GradientDescriptor {
    /// Evenly spaced stops over the given colors, in order.
    pub fn build<S: AsRef<str>>(
        colors: &[S],
        kind: GradientKind,
        angle_degrees: i64,
    ) -> ChromaResult<Self> {
        if colors.len() < 2 {
            return Err(ChromaError::InsufficientStops { found: colors.len() });
        }
        let last = (colors.len() - 1) as f64;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, hex)| {
                Ok(ColorStop {
                    color: hex_to_color(hex.as_ref())?,
                    position: i as f64 / last,
                })
            })
            .collect::<ChromaResult<Vec<_>>>()?;
        Ok(Self {
            kind,
            angle_degrees: normalize_angle(angle_degrees),
            stops,
        })
    }

    /// At least two stops.
    pub fn is_renderable(&self) -> bool {
        self.stops.len() >= 2
    }

    pub fn to_css(&self) -> String {
        let stops = self
            .stops
            .iter()
            .map(|stop| format!("{} {}%", stop.color.to_hex(), format_percent(stop.position)))
            .collect::<Vec<_>>()
            .join(", ");
        match self.kind {
            GradientKind::Linear => format!(
                "{}({}deg, {})",
                self.kind.css_function(),
                self.angle_degrees,
                stops
            ),
            GradientKind::Radial => format!("{}(circle, {})", self.kind.css_function(), stops),
        }
    }

    /// Parse `linear-gradient(...)` or `radial-gradient(circle, ...)`.
    ///
    /// A linear gradient without a `<n>deg` argument gets angle 0.
    pub fn parse_css(css: &str) -> ChromaResult<Self> {
        let css = css.trim();
        let kind = if css.starts_with(GradientKind::Linear.css_function()) {
            GradientKind::Linear
        } else if css.starts_with(GradientKind::Radial.css_function()) {
            GradientKind::Radial
        } else {
            let name = css.split('(').next().unwrap_or(css).trim();
            return Err(ChromaError::UnsupportedGradientType(name.to_string()));
        };

        let args = css
            .split_once('(')
            .map(|(_, args)| args)
            .unwrap_or_default();
        let (head, rest) = args.split_once(',').unwrap_or((args, ""));

        let angle_degrees = match kind {
            GradientKind::Linear => parse_angle(head).unwrap_or(0),
            GradientKind::Radial => 0,
        };

        let stops = rest
            .split(',')
            .map(parse_stop)
            .filter_map(Result::transpose)
            .collect::<ChromaResult<Vec<_>>>()?;
        if stops.is_empty() {
            return Err(ChromaError::InvalidStopFormat(format!(
                "no `#rrggbb <n>%` stops in {:?}",
                css
            )));
        }

        Ok(Self {
            kind,
            angle_degrees,
            stops,
        })
    }
}

/// Build evenly spaced stops from selected palette colors.
pub fn build_descriptor<S: AsRef<str>>(
    colors: &[S],
    kind: GradientKind,
    angle_degrees: i64,
) -> ChromaResult<GradientDescriptor> {
    GradientDescriptor::build(colors, kind, angle_degrees)
}

pub fn to_css(descriptor: &GradientDescriptor) -> String {
    descriptor.to_css()
}

pub fn parse_css(css: &str) -> ChromaResult<GradientDescriptor> {
    GradientDescriptor::parse_css(css)
}

/// The declaration copied to the clipboard.
pub fn clipboard_text(css: &str) -> String {
    format!("background: {};", css)
}

/// Map any integer angle into [0, 360]; 360 itself is kept.
pub fn normalize_angle(degrees: i64) -> u16 {
    if (0..=360).contains(&degrees) {
        degrees as u16
    } else {
        degrees.rem_euclid(360) as u16
    }
}

fn format_percent(position: f64) -> String {
    let percent = (position * 100_000.0).round() / 1000.0;
    // Avoid printing "-0".
    let percent = if percent == 0.0 { 0.0 } else { percent };
    format!("{}", percent)
}

fn parse_angle(head: &str) -> Option<u16> {
    head.split_whitespace()
        .find_map(|token| {
            token
                .trim_end_matches(')')
                .strip_suffix("deg")?
                .parse::<i64>()
                .ok()
        })
        .map(normalize_angle)
}

/// `Ok(None)` for segments that are not stop tokens (e.g. `circle`).
fn parse_stop(segment: &str) -> ChromaResult<Option<ColorStop>> {
    let segment = segment.trim().trim_end_matches(')').trim();
    let mut tokens = segment.split_whitespace();
    let Some(color) = tokens.next().filter(|token| token.starts_with('#')) else {
        return Ok(None);
    };
    let Some(percent) = tokens.next().and_then(|token| token.strip_suffix('%')) else {
        return Ok(None);
    };
    if tokens.next().is_some() {
        return Ok(None);
    }

    let color = hex_to_color(color)?;
    let percent: f64 = percent
        .parse()
        .ok()
        .filter(|p: &f64| (0.0..=100.0).contains(p))
        .ok_or_else(|| ChromaError::InvalidStopFormat(segment.to_string()))?;
    Ok(Some(ColorStop {
        color,
        position: percent / 100.0,
    }))
}
