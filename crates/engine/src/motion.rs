//! Motion scheduling: the four move kinds behind a single busy gate.
//!
//! At most one non-immediate move runs at a time; immediate moves
//! (init, resize snaps) bypass the gate but still clear stale
//! transition descriptors. When the aspect ratio must be measured from
//! content that is not yet measurable, the move parks on a bounded
//! 10 ms poll and its position phase starts only once the height
//! settles.

use rand::Rng;

use whirl_common::clock::{earliest, Deadline, TickInterval, TimestampMs, MOTION_TICK_MS};
use whirl_model::config::{FadeTransform, MotionDriver, SliderConfig, TimingCurve};
use whirl_model::layout::SliderLayout;

use crate::render::{RenderOp, RenderSurface};

/// Delay before a fading move applies its end state.
const FADE_ARM_DELAY_MS: u64 = 100;

/// Delay between arming a fade and starting its opacity tweens.
const FADE_ENGAGE_DELAY_MS: u64 = 10;

/// Upper bound on height-settle polling (10 ms apiece).
const SETTLE_POLL_LIMIT: u32 = 600;

/// Per-tick speeds are rounded to a millionth of a pixel.
const SPEED_QUANTUM: f64 = 1e6;

/// The four move kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Apply the end state with zero animation.
    Immediate,
    /// Page-to-page transition with the slide timing curve.
    Translational,
    /// Gesture-triggered transition with the swipe timing curve.
    Swipe,
    /// Cross-dissolve between the previous and active windows.
    Fading,
}

/// Everything one move needs, owned so the move can park while height
/// settling polls.
#[derive(Debug, Clone)]
pub struct MoveContext {
    /// End offset of the strip.
    pub target_offset: f64,
    pub active_slots: Vec<usize>,
    pub previous_slots: Vec<usize>,
    /// Slots probed for aspect measurement; empty in fixed mode.
    pub probe_slots: Vec<usize>,
    /// Slot occupied by the thumbnails page, when displayed.
    pub thumbnails_slot: Option<usize>,
    /// Fade ghosts land on the thumbnails strip instead of the active
    /// slots.
    pub returning_to_thumbnails: bool,
    /// Arrow enabled flags to publish, when arrows are displayed.
    pub arrows: Option<(bool, bool)>,
    pub layout: SliderLayout,
}

/// What one `tick` call observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionTick {
    /// A move completed; fired exactly once per move.
    pub completed: bool,
    /// A parked move's position phase started this tick.
    pub settled: bool,
}

#[derive(Debug)]
struct OffsetTween {
    ticks: TickInterval,
    base: f64,
    speed: f64,
    ticks_total: u64,
    ticks_done: u64,
}

#[derive(Debug)]
struct HeightTween {
    ticks: TickInterval,
    base: f64,
    speed: f64,
    ticks_total: u64,
    ticks_done: u64,
}

#[derive(Debug)]
struct ActiveMove {
    ends: Deadline,
    step: Option<OffsetTween>,
    clear_transition: Option<Deadline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FadeStage {
    Spawned,
    Armed,
    Engaged,
    Done,
}

#[derive(Debug)]
struct FadeState {
    stage: FadeStage,
    arm: Deadline,
    engage: Deadline,
    cleanup: Deadline,
    target_offset: f64,
    ghost_lefts: Vec<f64>,
    fade_in_slots: Vec<usize>,
    in_timing: TimingCurve,
    out_timing: TimingCurve,
    in_transform: FadeTransform,
    out_transform: FadeTransform,
    duration_ms: u64,
}

#[derive(Debug)]
struct PendingMove {
    kind: MoveKind,
    ctx: MoveContext,
}

#[derive(Debug)]
struct SettlePoll {
    ticks: TickInterval,
    polls_left: u32,
    pending: PendingMove,
}

/// Drives timed changes of offset and height, one move at a time.
#[derive(Debug, Default)]
pub struct MotionScheduler {
    offset: f64,
    is_moving: bool,
    active: Option<ActiveMove>,
    fade: Option<FadeState>,
    settle: Option<SettlePoll>,
    height: Option<HeightTween>,
    last_ratio: Option<f64>,
    forced_completion: Option<Deadline>,
}

impl MotionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical strip offset. During an animated move this is
    /// already the end offset; only the rendered position lags.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    /// Whether a move is parked on the height-settle poll.
    pub fn settle_pending(&self) -> bool {
        self.settle.is_some()
    }

    /// Start a move. Non-immediate moves are rejected while another is
    /// active; immediate moves always apply.
    pub fn begin(
        &mut self,
        kind: MoveKind,
        now_ms: TimestampMs,
        cfg: &SliderConfig,
        ctx: MoveContext,
        surface: &mut dyn RenderSurface,
    ) -> bool {
        if kind != MoveKind::Immediate && self.is_moving {
            tracing::debug!(?kind, "move rejected while another move is active");
            return false;
        }

        if kind == MoveKind::Immediate {
            if let Some(settle) = self.settle.take() {
                if settle.pending.kind != MoveKind::Immediate && self.is_moving {
                    // the superseded move never ran its position phase;
                    // release the gate and report it done on the next tick
                    self.is_moving = false;
                    self.forced_completion = Some(Deadline::at(now_ms));
                    tracing::debug!("immediate move superseded a parked move");
                }
            }
        }
        let owes_height = self.settle.is_some();

        surface.apply(RenderOp::SetActiveSlots {
            slots: ctx.active_slots.clone(),
        });

        let height_due =
            kind == MoveKind::Immediate || cfg.aspect_ratio.heights_change_on_slide() || owes_height;
        if height_due {
            match self.measure_aspect(cfg, &ctx, surface) {
                Some(ratio) => {
                    self.settle = None;
                    self.start_height(kind, now_ms, cfg, &ctx, ratio, surface);
                    self.start_position(kind, now_ms, cfg, ctx, surface);
                }
                None => {
                    if kind != MoveKind::Immediate {
                        self.is_moving = true;
                    }
                    tracing::debug!(?kind, "aspect ratio not yet measurable; move parked");
                    self.settle = Some(SettlePoll {
                        ticks: TickInterval::starting_at(now_ms, MOTION_TICK_MS),
                        polls_left: SETTLE_POLL_LIMIT,
                        pending: PendingMove { kind, ctx },
                    });
                }
            }
        } else {
            self.start_position(kind, now_ms, cfg, ctx, surface);
        }
        true
    }

    /// Apply a live drag offset directly, outside any move.
    pub fn set_drag_offset(&mut self, offset: f64, surface: &mut dyn RenderSurface) {
        self.offset = offset;
        surface.apply(RenderOp::SetOffset { left: offset });
    }

    /// Process every deadline due at `now_ms`.
    pub fn tick(
        &mut self,
        now_ms: TimestampMs,
        cfg: &SliderConfig,
        surface: &mut dyn RenderSurface,
    ) -> MotionTick {
        let mut out = MotionTick::default();

        if let Some(deadline) = self.forced_completion {
            if deadline.is_due(now_ms) {
                self.forced_completion = None;
                out.completed = true;
            }
        }

        if let Some(mut settle) = self.settle.take() {
            let mut outcome = None;
            while settle.ticks.should_tick(now_ms) {
                if let Some(ratio) = self.measure_aspect(cfg, &settle.pending.ctx, surface) {
                    outcome = Some(Some(ratio));
                    break;
                }
                settle.polls_left -= 1;
                if settle.polls_left == 0 {
                    outcome = Some(None);
                    break;
                }
            }
            match outcome {
                None => self.settle = Some(settle),
                Some(measured) => {
                    let PendingMove { kind, ctx } = settle.pending;
                    match measured {
                        Some(ratio) => self.start_height(kind, now_ms, cfg, &ctx, ratio, surface),
                        None => tracing::warn!(
                            "aspect ratio never became measurable; proceeding without height update"
                        ),
                    }
                    self.start_position(kind, now_ms, cfg, ctx, surface);
                    out.settled = true;
                }
            }
        }

        if let Some(tween) = &mut self.height {
            while tween.ticks_done < tween.ticks_total && tween.ticks.should_tick(now_ms) {
                tween.ticks_done += 1;
                let height = tween.base + tween.speed * tween.ticks_done as f64;
                surface.apply(RenderOp::SetHeights {
                    height: height.round(),
                });
            }
            if tween.ticks_done >= tween.ticks_total {
                self.height = None;
            }
        }

        let mut finished = false;
        if let Some(active) = &mut self.active {
            if let Some(step) = &mut active.step {
                while step.ticks_done < step.ticks_total && step.ticks.should_tick(now_ms) {
                    step.ticks_done += 1;
                    let left = step.base + step.speed * step.ticks_done as f64;
                    surface.apply(RenderOp::SetOffset { left: left.round() });
                }
                if step.ticks_done >= step.ticks_total {
                    active.step = None;
                }
            }
            if let Some(deadline) = active.clear_transition {
                if deadline.is_due(now_ms) {
                    surface.apply(RenderOp::ClearTransition);
                    active.clear_transition = None;
                }
            }
            finished = active.ends.is_due(now_ms);
        }
        if finished {
            self.active = None;
            self.is_moving = false;
            out.completed = true;
            tracing::debug!("move completed");
        }

        if let Some(fade) = &mut self.fade {
            if fade.stage == FadeStage::Spawned && fade.arm.is_due(now_ms) {
                surface.apply(RenderOp::SetOffset {
                    left: fade.target_offset,
                });
                surface.apply(RenderOp::PlaceGhosts {
                    lefts: fade.ghost_lefts.clone(),
                });
                surface.apply(RenderOp::PrepareFadeIn {
                    slots: fade.fade_in_slots.clone(),
                    transform: fade.in_transform,
                });
                fade.stage = FadeStage::Armed;
            }
            if fade.stage == FadeStage::Armed && fade.engage.is_due(now_ms) {
                surface.apply(RenderOp::FadeGhostsOut {
                    duration_ms: fade.duration_ms,
                    curve: fade.out_timing,
                    transform: fade.out_transform,
                });
                surface.apply(RenderOp::FadeSlotsIn {
                    slots: fade.fade_in_slots.clone(),
                    duration_ms: fade.duration_ms,
                    curve: fade.in_timing,
                });
                fade.stage = FadeStage::Engaged;
            }
            if fade.stage == FadeStage::Engaged && fade.cleanup.is_due(now_ms) {
                surface.apply(RenderOp::RemoveGhosts);
                surface.apply(RenderOp::ClearSlotTransitions {
                    slots: fade.fade_in_slots.clone(),
                });
                fade.stage = FadeStage::Done;
            }
            if fade.stage == FadeStage::Done {
                self.fade = None;
            }
        }

        out
    }

    /// Earliest instant `tick` must run again.
    pub fn next_deadline(&self) -> Option<TimestampMs> {
        let mut next = self.forced_completion.map(|d| d.at_ms());
        if let Some(settle) = &self.settle {
            next = earliest(next, Some(settle.ticks.next_at()));
        }
        if let Some(tween) = &self.height {
            if tween.ticks_done < tween.ticks_total {
                next = earliest(next, Some(tween.ticks.next_at()));
            }
        }
        if let Some(active) = &self.active {
            if let Some(step) = &active.step {
                if step.ticks_done < step.ticks_total {
                    next = earliest(next, Some(step.ticks.next_at()));
                }
            }
            if let Some(deadline) = active.clear_transition {
                next = earliest(next, Some(deadline.at_ms()));
            }
            next = earliest(next, Some(active.ends.at_ms()));
        }
        if let Some(fade) = &self.fade {
            let stage_at = match fade.stage {
                FadeStage::Spawned => Some(fade.arm.at_ms()),
                FadeStage::Armed => Some(fade.engage.at_ms()),
                FadeStage::Engaged => Some(fade.cleanup.at_ms()),
                FadeStage::Done => None,
            };
            next = earliest(next, stage_at);
        }
        next
    }

    /// Minimum width/height ratio over the probed slots, or `None`
    /// while any probe is unmeasurable.
    fn measure_aspect(
        &self,
        cfg: &SliderConfig,
        ctx: &MoveContext,
        surface: &dyn RenderSurface,
    ) -> Option<f64> {
        if let Some(ratio) = cfg.aspect_ratio.fixed_ratio() {
            return Some(ratio);
        }
        if ctx.probe_slots.is_empty() {
            return None;
        }
        let mut min_ratio = f64::INFINITY;
        for &slot in &ctx.probe_slots {
            let (width, height) = surface.slot_size(slot)?;
            let mut ratio = width / height;
            if !ratio.is_finite() {
                return None;
            }
            if ctx.thumbnails_slot == Some(slot) {
                // tuned in production: the thumbnails strip spans a full
                // page, so its ratio is normalized by the page size;
                // confirm before changing
                ratio /= cfg.page_size as f64;
            }
            if ratio < min_ratio {
                min_ratio = ratio;
            }
        }
        min_ratio.is_finite().then_some(min_ratio)
    }

    fn start_height(
        &mut self,
        kind: MoveKind,
        now_ms: TimestampMs,
        cfg: &SliderConfig,
        ctx: &MoveContext,
        ratio: f64,
        surface: &mut dyn RenderSurface,
    ) {
        let target = ctx.layout.item_width / ratio;
        let from = self.last_ratio.map(|last| ctx.layout.item_width / last);
        self.last_ratio = Some(ratio);
        match from {
            Some(from) if kind != MoveKind::Immediate && cfg.slide_time_ms > 0 => {
                let ticks_total = cfg.slide_time_ms / MOTION_TICK_MS;
                let speed = average_motion_speed(target - from, ticks_total as f64);
                self.height = Some(HeightTween {
                    ticks: TickInterval::starting_at(now_ms, MOTION_TICK_MS),
                    base: from,
                    speed,
                    ticks_total,
                    ticks_done: 0,
                });
            }
            _ => {
                surface.apply(RenderOp::SetHeights { height: target });
                self.height = None;
            }
        }
    }

    fn start_position(
        &mut self,
        kind: MoveKind,
        now_ms: TimestampMs,
        cfg: &SliderConfig,
        ctx: MoveContext,
        surface: &mut dyn RenderSurface,
    ) {
        let duration = cfg.slide_time_ms;
        let target = ctx.target_offset;

        if kind == MoveKind::Immediate || duration == 0 {
            surface.apply(RenderOp::ClearTransition);
            surface.apply(RenderOp::SetOffset { left: target });
            self.offset = target;
            Self::publish_arrows(&ctx, surface);
            if kind != MoveKind::Immediate {
                self.is_moving = true;
                self.active = Some(ActiveMove {
                    ends: Deadline::at(now_ms),
                    step: None,
                    clear_transition: None,
                });
            }
            return;
        }

        match kind {
            MoveKind::Fading if cfg.fading.is_some() => {
                self.start_fade(now_ms, cfg, &ctx, surface);
            }
            _ => {
                let curve = if kind == MoveKind::Swipe {
                    cfg.swipe_timing
                } else {
                    cfg.slide_timing
                };
                let (step, clear_transition) = match cfg.motion_driver {
                    MotionDriver::Declarative => {
                        surface.apply(RenderOp::SetTransition {
                            duration_ms: duration,
                            curve,
                        });
                        surface.apply(RenderOp::SetOffset { left: target });
                        (None, Some(Deadline::after(now_ms, duration)))
                    }
                    MotionDriver::Interval => {
                        let ticks_total = duration / MOTION_TICK_MS;
                        let speed =
                            average_motion_speed(target - self.offset, ticks_total as f64);
                        let tween = OffsetTween {
                            ticks: TickInterval::starting_at(now_ms, MOTION_TICK_MS),
                            base: self.offset,
                            speed,
                            ticks_total,
                            ticks_done: 0,
                        };
                        (Some(tween), None)
                    }
                };
                self.offset = target;
                self.is_moving = true;
                self.active = Some(ActiveMove {
                    ends: Deadline::after(now_ms, duration),
                    step,
                    clear_transition,
                });
            }
        }
        Self::publish_arrows(&ctx, surface);
    }

    fn start_fade(
        &mut self,
        now_ms: TimestampMs,
        cfg: &SliderConfig,
        ctx: &MoveContext,
        surface: &mut dyn RenderSurface,
    ) {
        let Some(fading) = &cfg.fading else {
            return;
        };
        let duration = cfg.slide_time_ms;

        surface.apply(RenderOp::SpawnGhosts {
            slots: ctx.previous_slots.clone(),
        });

        let ghost_lefts: Vec<f64> = if ctx.returning_to_thumbnails {
            (0..ctx.previous_slots.len())
                .map(|i| i as f64 * ctx.layout.item_width)
                .collect()
        } else {
            ctx.previous_slots
                .iter()
                .enumerate()
                .map(|(i, _)| {
                    ctx.active_slots
                        .get(i)
                        .or_else(|| ctx.active_slots.last())
                        .map(|&slot| ctx.layout.slot_left(cfg, slot))
                        .unwrap_or(0.0)
                })
                .collect()
        };

        let mut rng = rand::rng();
        let timing_pick = rng.random_range(0..fading.in_timings.len());
        let transform_pick = rng.random_range(0..fading.in_transforms.len());

        self.fade = Some(FadeState {
            stage: FadeStage::Spawned,
            arm: Deadline::after(now_ms, FADE_ARM_DELAY_MS),
            engage: Deadline::after(now_ms, FADE_ARM_DELAY_MS + FADE_ENGAGE_DELAY_MS),
            cleanup: Deadline::after(now_ms, FADE_ARM_DELAY_MS + duration),
            target_offset: ctx.target_offset,
            ghost_lefts,
            fade_in_slots: ctx.active_slots.clone(),
            in_timing: fading.in_timings[timing_pick],
            out_timing: fading.out_timings[timing_pick],
            in_transform: fading.in_transforms[transform_pick],
            out_transform: fading.out_transforms[transform_pick],
            duration_ms: duration,
        });
        self.offset = ctx.target_offset;
        self.is_moving = true;
        self.active = Some(ActiveMove {
            ends: Deadline::after(now_ms, duration),
            step: None,
            clear_transition: None,
        });
    }

    fn publish_arrows(ctx: &MoveContext, surface: &mut dyn RenderSurface) {
        if let Some((prev, next)) = ctx.arrows {
            surface.apply(RenderOp::SetArrowsEnabled { prev, next });
        }
    }
}

/// Per-tick speed covering `distance` over `ticks` ticks, rounded to a
/// millionth of a pixel.
pub fn average_motion_speed(distance: f64, ticks: f64) -> f64 {
    (SPEED_QUANTUM * distance / ticks).round() / SPEED_QUANTUM
}
