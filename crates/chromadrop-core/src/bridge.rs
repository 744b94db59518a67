//! Applying colors and gradients to the host document.
//!
//! One call walks `Idle -> Resolving -> ApplyingToSelection | CreatingShape ->
//! Succeeded | Failed` and keeps nothing between calls. A call either changes
//! the fill of one or more selected items, or inserts exactly one new
//! rectangle and selects it. Never both.

use crate::color::{Color, hex_to_color};
use crate::config::BridgeConfig;
use crate::error::{ChromaError, ChromaResult};
use crate::gradient::{GradientDescriptor, GradientKind, parse_css};
use crate::host::{DocumentHost, ItemId};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Stage of a single apply call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyPhase {
    #[default]
    Idle,
    Resolving,
    ApplyingToSelection,
    CreatingShape,
    Succeeded,
    Failed,
}

/// A resolved paint, ready to be turned into host fills.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Gradient(GradientDescriptor),
}

impl Paint {
    pub fn from_hex(hex: &str) -> ChromaResult<Self> {
        hex_to_color(hex).map(Paint::Solid)
    }

    /// Parse a gradient and check it has enough stops to render.
    pub fn from_css(css: &str) -> ChromaResult<Self> {
        let descriptor = parse_css(css)?;
        if !descriptor.is_renderable() {
            return Err(ChromaError::InsufficientStops {
                found: descriptor.stops.len(),
            });
        }
        Ok(Paint::Gradient(descriptor))
    }

    /// Build a host fill laid out over `bounds`.
    pub fn make_fill<H: DocumentHost>(&self, host: &mut H, bounds: Rect) -> ChromaResult<H::Fill> {
        match self {
            Paint::Solid(color) => host.make_color_fill(*color),
            Paint::Gradient(descriptor) => match descriptor.kind {
                GradientKind::Linear => host.make_linear_gradient_fill(descriptor, bounds),
                GradientKind::Radial => host.make_radial_gradient_fill(descriptor, bounds),
            },
        }
    }
}

/// Where an apply call put its paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyTarget {
    Selection,
    NewShape,
}

/// Outcome counts of a successful apply call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub target: ApplyTarget,
    /// Selected items whose fill was replaced.
    pub applied: usize,
    /// Selected items without the fill capability.
    pub skipped: usize,
    /// Selected items whose fill the host refused.
    pub failed: usize,
    /// The rectangle inserted when no selected item took the paint.
    pub created: Option<ItemId>,
}

enum ItemOutcome {
    Applied,
    Skipped,
    Failed,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    applied: usize,
    skipped: usize,
    failed: usize,
}

impl Tally {
    fn record(mut self, outcome: ItemOutcome) -> Self {
        match outcome {
            ItemOutcome::Applied => self.applied += 1,
            ItemOutcome::Skipped => self.skipped += 1,
            ItemOutcome::Failed => self.failed += 1,
        }
        self
    }
}

struct ApplyRun {
    phase: ApplyPhase,
}

impl ApplyRun {
    fn new() -> Self {
        Self {
            phase: ApplyPhase::Idle,
        }
    }

    fn advance(&mut self, next: ApplyPhase) {
        log::debug!("Apply {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}

/// Apply an already resolved paint to the host.
pub fn apply_paint<H: DocumentHost>(
    host: &mut H,
    paint: &Paint,
    config: &BridgeConfig,
) -> ChromaResult<ApplyReport> {
    let mut run = ApplyRun::new();
    run.advance(ApplyPhase::Resolving);
    let result = apply_resolved(&mut run, host, paint, config);
    run.advance(match result {
        Ok(_) => ApplyPhase::Succeeded,
        Err(_) => ApplyPhase::Failed,
    });
    result
}

fn apply_resolved<H: DocumentHost>(
    run: &mut ApplyRun,
    host: &mut H,
    paint: &Paint,
    config: &BridgeConfig,
) -> ChromaResult<ApplyReport> {
    let selection = host.selection();
    let mut tally = Tally::default();

    if !selection.is_empty() {
        run.advance(ApplyPhase::ApplyingToSelection);
        tally = selection
            .iter()
            .fold(tally, |tally, &id| tally.record(apply_to_item(host, paint, id)));
        if tally.applied > 0 {
            return Ok(ApplyReport {
                target: ApplyTarget::Selection,
                applied: tally.applied,
                skipped: tally.skipped,
                failed: tally.failed,
                created: None,
            });
        }
        log::warn!(
            "No selected item took the fill ({} skipped, {} failed), creating a shape",
            tally.skipped,
            tally.failed
        );
    }

    run.advance(ApplyPhase::CreatingShape);
    let bounds = default_shape_bounds(host.viewport(), config);
    let fill = paint.make_fill(host, bounds)?;
    let id = host.insert_rectangle(bounds, fill)?;
    host.set_selection(&[id]);

    Ok(ApplyReport {
        target: ApplyTarget::NewShape,
        applied: 0,
        skipped: tally.skipped,
        failed: tally.failed,
        created: Some(id),
    })
}

fn apply_to_item<H: DocumentHost>(host: &mut H, paint: &Paint, id: ItemId) -> ItemOutcome {
    let Some(bounds) = host
        .item(id)
        .filter(|item| item.supports_fill())
        .map(|item| item.bounds())
    else {
        log::warn!("Skipping {id}: no fill capability");
        return ItemOutcome::Skipped;
    };

    let result = paint.make_fill(host, bounds).and_then(|fill| {
        host.item_mut(id)
            .and_then(|item| item.fillable_mut())
            .ok_or_else(|| ChromaError::PlatformFillFailure(format!("item {id} lost its fill")))?
            .set_fill(fill)
    });
    match result {
        Ok(()) => ItemOutcome::Applied,
        Err(err) => {
            log::warn!("Failed to fill {id}: {err}");
            ItemOutcome::Failed
        }
    }
}

/// Bounds of the fallback rectangle: centered in the viewport, clamped to
/// non-negative coordinates.
pub fn default_shape_bounds(viewport: Option<Size>, config: &BridgeConfig) -> Rect {
    let viewport = viewport.unwrap_or(config.fallback_viewport);
    let size = config.default_shape_size;
    let origin = Point::new(
        ((viewport.width - size.width) / 2.0).max(0.0),
        ((viewport.height - size.height) / 2.0).max(0.0),
    );
    Rect::from_origin_size(origin, size)
}

/// Apply a solid `#RRGGBB` color. Returns `false` on any resolution or
/// creation failure.
pub fn apply_color<H: DocumentHost>(host: &mut H, hex: &str, config: &BridgeConfig) -> bool {
    let paint = match Paint::from_hex(hex) {
        Ok(paint) => paint,
        Err(err) => {
            log::error!("Cannot apply color {hex:?}: {err}");
            return false;
        }
    };
    finish("color", apply_paint(host, &paint, config))
}

/// Apply a CSS gradient string. Returns `false` on any resolution or
/// creation failure.
pub fn apply_gradient<H: DocumentHost>(host: &mut H, css: &str, config: &BridgeConfig) -> bool {
    let paint = match Paint::from_css(css) {
        Ok(paint) => paint,
        Err(err) => {
            log::error!("Cannot apply gradient {css:?}: {err}");
            return false;
        }
    };
    finish("gradient", apply_paint(host, &paint, config))
}

fn finish(what: &str, result: ChromaResult<ApplyReport>) -> bool {
    match result {
        Ok(report) => {
            log::info!("Applied {what}: {report:?}");
            true
        }
        Err(err) => {
            log::error!("Failed to apply {what}: {err}");
            false
        }
    }
}
