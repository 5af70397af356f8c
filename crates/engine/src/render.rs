//! The rendering collaborator seam.
//!
//! The core never touches a render tree. It asks the surface for
//! measurements (viewport width, per-slot content size) and hands it a
//! stream of [`RenderOp`] values describing what to apply. Ops are plain
//! data so hosts can batch, diff, or replay them.

use serde::{Deserialize, Serialize};
use whirl_model::config::{FadeTransform, TimingCurve};

/// Capabilities the core consumes from the renderer.
pub trait RenderSurface {
    /// Current viewport width in logical pixels.
    fn viewport_width(&self) -> f64;

    /// Rendered content size of a slot, or `None` while the content is
    /// not yet measurable (images still loading).
    fn slot_size(&self, slot: usize) -> Option<(f64, f64)>;

    /// Apply one render operation.
    fn apply(&mut self, op: RenderOp);
}

/// One renderer instruction.
///
/// Slot indexes follow the strip layout: slot 0 is the thumbnails page
/// when displayed, main item `j` occupies slot `j + (thumbnails ? 1 : 0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderOp {
    /// Re-apply strip geometry after a resize or (re)initialization.
    ApplyLayout {
        item_width: f64,
        strip_width: f64,
        thumbnails_width: f64,
    },

    /// Set the strip's horizontal offset.
    SetOffset { left: f64 },

    /// Register a transition descriptor for subsequent offset changes.
    SetTransition { duration_ms: u64, curve: TimingCurve },

    /// Clear the strip's transition descriptor.
    ClearTransition,

    /// Set the height of the strip and every slot.
    SetHeights { height: f64 },

    /// Flag the slots currently in the active window.
    SetActiveSlots { slots: Vec<usize> },

    /// Enable/disable the navigation arrows.
    SetArrowsEnabled { prev: bool, next: bool },

    /// Clone the given slots as overlay ghosts, in order.
    SpawnGhosts { slots: Vec<usize> },

    /// Position the ghosts (index-paired with the spawn order).
    PlaceGhosts { lefts: Vec<f64> },

    /// Tween all ghosts to transparent with the given exit transform.
    FadeGhostsOut {
        duration_ms: u64,
        curve: TimingCurve,
        transform: FadeTransform,
    },

    /// Put slots into their pre-entry state: transparent, transformed.
    PrepareFadeIn {
        slots: Vec<usize>,
        transform: FadeTransform,
    },

    /// Tween prepared slots back to opaque identity.
    FadeSlotsIn {
        slots: Vec<usize>,
        duration_ms: u64,
        curve: TimingCurve,
    },

    /// Drop the per-slot transition descriptors set by a fade.
    ClearSlotTransitions { slots: Vec<usize> },

    /// Remove all overlay ghosts from the render tree.
    RemoveGhosts,
}

/// An in-memory surface that records every op. Used by the test suites
/// and useful for host-side diagnostics.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    default_size: Option<(f64, f64)>,
    slot_sizes: Vec<(usize, (f64, f64))>,
    ops: Vec<RenderOp>,
}

impl RecordingSurface {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// A surface whose slots all measure `width x height` already.
    pub fn with_content_size(viewport_width: f64, width: f64, height: f64) -> Self {
        let mut surface = Self::new(viewport_width);
        surface.set_content_size(width, height);
        surface
    }

    /// Make every slot measurable at the given size.
    pub fn set_content_size(&mut self, width: f64, height: f64) {
        self.default_size = Some((width, height));
    }

    /// Override the measured size of one slot.
    pub fn set_slot_size(&mut self, slot: usize, width: f64, height: f64) {
        self.slot_sizes.retain(|(s, _)| *s != slot);
        self.slot_sizes.push((slot, (width, height)));
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.width = width;
    }

    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<RenderOp> {
        std::mem::take(&mut self.ops)
    }

    /// Whether any recorded op matches the predicate.
    pub fn saw(&self, predicate: impl Fn(&RenderOp) -> bool) -> bool {
        self.ops.iter().any(predicate)
    }
}

impl RenderSurface for RecordingSurface {
    fn viewport_width(&self) -> f64 {
        self.width
    }

    fn slot_size(&self, slot: usize) -> Option<(f64, f64)> {
        self.slot_sizes
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, size)| *size)
            .or(self.default_size)
    }

    fn apply(&mut self, op: RenderOp) {
        self.ops.push(op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_measures_and_records() {
        let mut surface = RecordingSurface::new(900.0);
        assert_eq!(surface.viewport_width(), 900.0);
        assert_eq!(surface.slot_size(0), None);

        surface.set_content_size(300.0, 200.0);
        surface.set_slot_size(0, 600.0, 200.0);
        assert_eq!(surface.slot_size(0), Some((600.0, 200.0)));
        assert_eq!(surface.slot_size(3), Some((300.0, 200.0)));

        surface.apply(RenderOp::SetOffset { left: -300.0 });
        assert!(surface.saw(|op| matches!(op, RenderOp::SetOffset { left } if *left == -300.0)));
        assert_eq!(surface.take_ops().len(), 1);
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn test_render_op_serde_tagging() {
        let op = RenderOp::SetTransition {
            duration_ms: 500,
            curve: TimingCurve::EaseOut,
        };
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.contains(r#""op":"set_transition""#));
        let parsed: RenderOp = serde_json::from_str(&json).unwrap();
        assert_eq!(op, parsed);
    }
}
