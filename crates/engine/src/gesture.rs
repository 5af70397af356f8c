//! Pan gesture interpretation.
//!
//! A gesture becomes eligible at `start` only when nothing is moving and
//! the stroke is near-horizontal; while eligible, every move event drags
//! the strip directly. On release the net drag distance and the overall
//! velocity decide how many pages the user meant to advance.

use whirl_model::event::{PanEvent, PanPhase};

/// Velocity magnitude above which the release bias shifts a full step.
const VELOCITY_BREAKPOINT: f64 = 0.1;

/// Base decision threshold: roughly half a page of drag.
const BIAS_THRESHOLD: f64 = 0.5;

/// Inputs the interpreter needs from the rest of the widget.
#[derive(Debug, Clone, Copy)]
pub struct GestureContext {
    pub is_moving: bool,
    pub page_width: f64,
    pub page_size: u32,
    pub max_swipe_angle_deg: f64,
    pub slot_count: usize,
    /// Strip offset at the time of the event, the drag origin candidate.
    pub current_offset: f64,
}

/// What a pan event amounts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanOutcome {
    /// Not eligible, or nothing to do.
    Ignored,
    /// Gesture accepted: the caller must cancel autorun.
    DragStarted,
    /// Live drag: apply this strip offset directly.
    DragMoved { offset: f64 },
    /// Release with a net drag: navigate by `delta_index` (possibly 0,
    /// which still snaps the strip back with a swipe-flavored move).
    Released { delta_index: i64, net_delta: f64 },
    /// Release without any net drag; the strip never left its offset.
    ReleasedIdle,
}

/// State machine over the four pan event kinds.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    enabled: bool,
    drag_origin: f64,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is currently live.
    pub fn is_dragging(&self) -> bool {
        self.enabled
    }

    pub fn on_pan(&mut self, event: &PanEvent, ctx: &GestureContext) -> PanOutcome {
        if ctx.slot_count <= ctx.page_size as usize {
            return PanOutcome::Ignored;
        }

        let delta_x = event.quantized_delta_x();
        match event.phase {
            PanPhase::Start => {
                self.enabled = !ctx.is_moving
                    && !event.is_final
                    && near_horizontal(event.angle_deg, ctx.max_swipe_angle_deg);
                if self.enabled {
                    self.drag_origin = ctx.current_offset;
                    tracing::debug!(angle = event.angle_deg, "drag accepted");
                    PanOutcome::DragStarted
                } else {
                    PanOutcome::Ignored
                }
            }
            PanPhase::Left | PanPhase::Right => {
                if self.enabled && delta_x != 0.0 {
                    PanOutcome::DragMoved {
                        offset: self.drag_origin + delta_x,
                    }
                } else {
                    PanOutcome::Ignored
                }
            }
            PanPhase::End | PanPhase::Cancel => {
                if !self.enabled {
                    return PanOutcome::Ignored;
                }
                self.enabled = false;
                if delta_x == 0.0 {
                    return PanOutcome::ReleasedIdle;
                }
                let delta_index = release_delta_index(
                    delta_x,
                    event.quantized_velocity_x(),
                    ctx.page_width,
                    ctx.page_size,
                );
                tracing::debug!(delta_x, delta_index, "drag released");
                PanOutcome::Released {
                    delta_index,
                    net_delta: delta_x,
                }
            }
        }
    }
}

fn near_horizontal(angle_deg: f64, max_swipe_angle_deg: f64) -> bool {
    let angle = angle_deg.abs();
    angle < max_swipe_angle_deg || angle > 180.0 - max_swipe_angle_deg
}

/// The velocity-weighted release formula, preserved exactly as tuned in
/// production; confirm with the product owner before changing it.
///
/// The bias starts at half a page toward the drag direction and shifts
/// by a whole threshold when the overall velocity magnitude exceeds the
/// breakpoint, so a fast flick can add a page — or cancel one when it
/// opposes the drag.
fn release_delta_index(delta_x: f64, velocity_x: f64, page_width: f64, page_size: u32) -> i64 {
    let mut bias = if delta_x > 0.0 {
        1.0 - BIAS_THRESHOLD
    } else {
        BIAS_THRESHOLD
    };
    if velocity_x > VELOCITY_BREAKPOINT {
        bias += BIAS_THRESHOLD;
    } else if velocity_x < -VELOCITY_BREAKPOINT {
        bias -= BIAS_THRESHOLD;
    }
    (-bias - delta_x / page_width).ceil() as i64 * page_size as i64
}
