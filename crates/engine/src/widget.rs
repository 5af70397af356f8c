//! The slider facade: owns the state, wires the components, and exposes
//! the host-facing command surface.
//!
//! One `Slider` per widget instance; instances are fully independent.
//! Commands take `now_ms` and a [`RenderSurface`] and return the
//! notifications the host should react to. Between commands the host
//! calls [`Slider::tick`] at [`Slider::next_deadline`].

use whirl_common::clock::{earliest, TimestampMs};
use whirl_common::error::SliderResult;
use whirl_model::config::{AspectRatioMode, SliderConfig, SliderOptions};
use whirl_model::event::PanEvent;
use whirl_model::layout::{self, SliderLayout};

use crate::autorun::AutorunScheduler;
use crate::gesture::{GestureContext, GestureInterpreter, PanOutcome};
use crate::index::IndexStateMachine;
use crate::motion::{MotionScheduler, MoveContext, MoveKind};
use crate::render::{RenderOp, RenderSurface};
use crate::resolver;

/// Host-facing notification.
#[derive(Debug, Clone, PartialEq)]
pub enum SliderEvent {
    /// Construction finished, including any deferred height settling.
    Initialized { active: Vec<usize> },
    /// `currentIndex` changed.
    IndexChanged { current: usize, previous: usize },
    /// A non-immediate move started.
    MoveStarted {
        kind: MoveKind,
        active: Vec<usize>,
        previous: Vec<usize>,
    },
    /// A move completed; chain scroll-into-view and the like off this.
    MoveCompleted {
        active: Vec<usize>,
        previous: Vec<usize>,
    },
}

/// Enabled state of the prev/next arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowState {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

/// A slider widget instance.
#[derive(Debug)]
pub struct Slider {
    options: SliderOptions,
    cfg: SliderConfig,
    layout: SliderLayout,
    item_count: usize,
    index: IndexStateMachine,
    motion: MotionScheduler,
    gesture: GestureInterpreter,
    autorun: AutorunScheduler,
    last_manual_direction: i8,
    autorun_restart_pending: bool,
    initialized: bool,
}

impl Slider {
    /// Build a slider and run its initial immediate move.
    ///
    /// Fatal on configuration errors. `Initialized` is part of the
    /// returned events unless height settling defers it to a later
    /// [`Slider::tick`].
    pub fn new(
        options: SliderOptions,
        item_count: usize,
        now_ms: TimestampMs,
        surface: &mut dyn RenderSurface,
    ) -> SliderResult<(Self, Vec<SliderEvent>)> {
        let width = surface.viewport_width();
        let cfg = resolver::resolve(width, item_count, &options)?;
        let layout = SliderLayout::compute(width, &cfg);
        let autorun = AutorunScheduler::new(cfg.autorun_delay_ms);
        let last_manual_direction = if cfg.display_thumbnails { 0 } else { 1 };

        let mut slider = Self {
            options,
            cfg,
            layout,
            item_count,
            index: IndexStateMachine::new(),
            motion: MotionScheduler::new(),
            gesture: GestureInterpreter::new(),
            autorun,
            last_manual_direction,
            autorun_restart_pending: false,
            initialized: false,
        };

        let mut events = Vec::new();
        slider.apply_layout(surface);
        slider.commit_move(0, MoveKind::Immediate, now_ms, surface, &mut events);
        if !slider.motion.settle_pending() {
            slider.initialized = true;
            events.push(SliderEvent::Initialized {
                active: slider.active_slots(),
            });
        }
        slider.autorun.start(now_ms);
        tracing::debug!(
            item_count,
            breakpoint = ?slider.cfg.breakpoint,
            "slider initialized"
        );
        Ok((slider, events))
    }

    /// Advance one page. Fades when already at the last index.
    pub fn next(
        &mut self,
        now_ms: TimestampMs,
        surface: &mut dyn RenderSurface,
    ) -> Vec<SliderEvent> {
        self.step_page(1, now_ms, surface)
    }

    /// Recede one page. Fades when already at index 0.
    pub fn prev(
        &mut self,
        now_ms: TimestampMs,
        surface: &mut dyn RenderSurface,
    ) -> Vec<SliderEvent> {
        self.step_page(-1, now_ms, surface)
    }

    /// Navigator click: jump straight to a page.
    pub fn go_to_page(
        &mut self,
        page_index: usize,
        now_ms: TimestampMs,
        surface: &mut dyn RenderSurface,
    ) -> Vec<SliderEvent> {
        let mut events = Vec::new();
        if self.motion.is_moving() {
            return events;
        }
        let target = self.cfg.page_size as i64 * page_index as i64;
        if self.index.current() as i64 != target {
            self.commit_move(target, MoveKind::Immediate, now_ms, surface, &mut events);
        }
        self.last_manual_direction = 0;
        events
    }

    /// Item click: bring a main item into view. Clicks inside the
    /// active window do nothing; a click on the left partial-overlap
    /// region recedes exactly one page.
    pub fn select_item(
        &mut self,
        item_index: usize,
        now_ms: TimestampMs,
        surface: &mut dyn RenderSurface,
    ) -> Vec<SliderEvent> {
        let mut events = Vec::new();
        if self.motion.is_moving() {
            return events;
        }
        let page_size = self.cfg.page_size as i64;
        let current = self.index.current() as i64;
        let mut target = item_index as i64
            + if self.cfg.display_thumbnails {
                page_size
            } else {
                0
            };
        if target >= current && target < current + page_size {
            return events;
        }
        if target < current && target > current - page_size {
            target = current - page_size;
        }
        self.commit_move(target, MoveKind::Translational, now_ms, surface, &mut events);
        events
    }

    /// Thumbnail click: from the thumbnails page, navigate to the item;
    /// from anywhere else, navigate back to the thumbnails page.
    pub fn select_thumbnail(
        &mut self,
        item_index: usize,
        now_ms: TimestampMs,
        surface: &mut dyn RenderSurface,
    ) -> Vec<SliderEvent> {
        let mut events = Vec::new();
        if self.motion.is_moving() || !self.cfg.display_thumbnails {
            return events;
        }
        let target = if self.index.current() == 0 {
            item_index as i64 + self.cfg.page_size as i64
        } else {
            0
        };
        self.commit_move(target, MoveKind::Translational, now_ms, surface, &mut events);
        events
    }

    /// Feed one pan event from the gesture-source collaborator.
    pub fn on_pan(
        &mut self,
        event: &PanEvent,
        now_ms: TimestampMs,
        surface: &mut dyn RenderSurface,
    ) -> Vec<SliderEvent> {
        let ctx = GestureContext {
            is_moving: self.motion.is_moving(),
            page_width: self.layout.page_width,
            page_size: self.cfg.page_size,
            max_swipe_angle_deg: self.cfg.max_swipe_angle_deg,
            slot_count: self.cfg.slot_count(self.item_count),
            current_offset: self.motion.offset(),
        };
        match self.gesture.on_pan(event, &ctx) {
            PanOutcome::Ignored => Vec::new(),
            PanOutcome::DragStarted => {
                self.autorun.stop();
                Vec::new()
            }
            PanOutcome::DragMoved { offset } => {
                self.motion.set_drag_offset(offset, surface);
                Vec::new()
            }
            PanOutcome::ReleasedIdle => {
                // the strip never left its offset; just re-arm autorun
                self.autorun.start(now_ms);
                Vec::new()
            }
            PanOutcome::Released { delta_index, .. } => {
                let mut events = Vec::new();
                let requested = self.index.current() as i64 + delta_index;
                self.commit_move(requested, MoveKind::Swipe, now_ms, surface, &mut events);
                self.update_manual_direction(delta_index.signum() as i8);
                self.autorun.stop();
                self.autorun_restart_pending = true;
                events
            }
        }
    }

    /// Re-resolve config for the surface's current width, re-clamp the
    /// index, and snap everything with an immediate move. Applies even
    /// while an animated move is in flight.
    pub fn on_resize(
        &mut self,
        now_ms: TimestampMs,
        surface: &mut dyn RenderSurface,
    ) -> SliderResult<Vec<SliderEvent>> {
        let width = surface.viewport_width();
        self.cfg = resolver::resolve(width, self.item_count, &self.options)?;
        self.layout = SliderLayout::compute(width, &self.cfg);

        let mut events = Vec::new();
        self.apply_layout(surface);
        let current = self.index.current() as i64;
        self.commit_move(current, MoveKind::Immediate, now_ms, surface, &mut events);
        tracing::debug!(width, breakpoint = ?self.cfg.breakpoint, "slider reconfigured after resize");
        Ok(events)
    }

    /// Pointer hover state, pausing autorun when the option is on.
    pub fn set_hovering(&mut self, hovering: bool) {
        if self.cfg.autorun_pause_on_hover {
            self.autorun.set_paused(hovering);
        }
    }

    /// Process all deadlines due at `now_ms`.
    pub fn tick(
        &mut self,
        now_ms: TimestampMs,
        surface: &mut dyn RenderSurface,
    ) -> Vec<SliderEvent> {
        let mut events = Vec::new();
        let motion = self.motion.tick(now_ms, &self.cfg, surface);
        if motion.settled && !self.initialized {
            self.initialized = true;
            events.push(SliderEvent::Initialized {
                active: self.active_slots(),
            });
        }
        if motion.completed {
            events.push(SliderEvent::MoveCompleted {
                active: self.active_slots(),
                previous: self.previous_slots(),
            });
            if self.autorun_restart_pending {
                self.autorun_restart_pending = false;
                self.autorun.start(now_ms);
            }
        }
        if self.autorun.due(now_ms) {
            self.autorun_step(now_ms, surface, &mut events);
        }
        events
    }

    /// Earliest instant [`Slider::tick`] must run again.
    pub fn next_deadline(&self) -> Option<TimestampMs> {
        earliest(self.motion.next_deadline(), self.autorun.next_deadline())
    }

    pub fn current_index(&self) -> usize {
        self.index.current()
    }

    pub fn previous_index(&self) -> usize {
        self.index.previous()
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_moving()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn config(&self) -> &SliderConfig {
        &self.cfg
    }

    pub fn layout(&self) -> SliderLayout {
        self.layout
    }

    pub fn page_count(&self) -> usize {
        layout::page_count(&self.cfg, self.item_count)
    }

    pub fn current_page(&self) -> usize {
        layout::current_page(self.index.current(), self.cfg.page_size)
    }

    pub fn active_slots(&self) -> Vec<usize> {
        self.index.active_slots(&self.cfg, self.item_count)
    }

    pub fn previous_slots(&self) -> Vec<usize> {
        self.index.previous_slots(&self.cfg, self.item_count)
    }

    pub fn arrow_state(&self) -> ArrowState {
        let current = self.index.current();
        let last = self.cfg.last_index(self.item_count);
        ArrowState {
            prev_enabled: self.cfg.repeat_at_first || current > 0,
            next_enabled: self.cfg.repeat_at_last || current < last,
        }
    }

    fn step_page(
        &mut self,
        direction: i8,
        now_ms: TimestampMs,
        surface: &mut dyn RenderSurface,
    ) -> Vec<SliderEvent> {
        let mut events = Vec::new();
        if self.motion.is_moving() {
            return events;
        }
        let current = self.index.current();
        let at_boundary = if direction > 0 {
            current == self.cfg.last_index(self.item_count)
        } else {
            current == 0
        };
        let kind = if at_boundary {
            MoveKind::Fading
        } else {
            MoveKind::Translational
        };
        let requested = current as i64 + direction as i64 * self.cfg.page_size as i64;
        self.commit_move(requested, kind, now_ms, surface, &mut events);
        self.update_manual_direction(direction);
        self.autorun.stop();
        self.autorun_restart_pending = true;
        events
    }

    /// Direction 0 while on or entering the thumbnails region suspends
    /// autorun stepping.
    fn update_manual_direction(&mut self, direction: i8) {
        self.last_manual_direction = if self.cfg.display_thumbnails
            && self.index.current() < self.cfg.page_size as usize
        {
            0
        } else {
            direction
        };
    }

    fn autorun_step(
        &mut self,
        now_ms: TimestampMs,
        surface: &mut dyn RenderSurface,
        events: &mut Vec<SliderEvent>,
    ) {
        if self.motion.is_moving() {
            return;
        }
        let current = self.index.current();
        let last = self.cfg.last_index(self.item_count);
        let first = self.cfg.main_first_index();
        let page = self.cfg.page_size as i64;
        match self.last_manual_direction {
            1 => {
                if current >= last {
                    if self.cfg.repeat_at_last {
                        self.commit_move(first as i64, MoveKind::Fading, now_ms, surface, events);
                    }
                } else {
                    self.commit_move(
                        current as i64 + page,
                        MoveKind::Translational,
                        now_ms,
                        surface,
                        events,
                    );
                }
            }
            -1 => {
                if current <= first {
                    if self.cfg.repeat_at_first {
                        self.commit_move(last as i64, MoveKind::Fading, now_ms, surface, events);
                    }
                } else {
                    self.commit_move(
                        current as i64 - page,
                        MoveKind::Translational,
                        now_ms,
                        surface,
                        events,
                    );
                }
            }
            _ => {}
        }
    }

    fn commit_move(
        &mut self,
        requested: i64,
        kind: MoveKind,
        now_ms: TimestampMs,
        surface: &mut dyn RenderSurface,
        events: &mut Vec<SliderEvent>,
    ) {
        let before = self.index.current();
        let applied = self.index.set_index(requested, &self.cfg, self.item_count);
        if applied != before {
            events.push(SliderEvent::IndexChanged {
                current: applied,
                previous: self.index.previous(),
            });
        }
        let ctx = self.move_context();
        let started = self.motion.begin(kind, now_ms, &self.cfg, ctx, surface);
        if started && kind != MoveKind::Immediate {
            events.push(SliderEvent::MoveStarted {
                kind,
                active: self.active_slots(),
                previous: self.previous_slots(),
            });
        }
    }

    fn move_context(&self) -> MoveContext {
        let cfg = &self.cfg;
        let current = self.index.current();
        let active_slots = self.active_slots();
        let slot_count = cfg.slot_count(self.item_count);
        let probe_slots = match cfg.aspect_ratio {
            AspectRatioMode::Fixed(_) => Vec::new(),
            AspectRatioMode::Auto => (0..slot_count).collect(),
            AspectRatioMode::AdjustByActive => active_slots.clone(),
            AspectRatioMode::AdjustByType => {
                if cfg.display_thumbnails && current < cfg.page_size as usize {
                    vec![0]
                } else if cfg.display_thumbnails {
                    (1..slot_count).collect()
                } else {
                    (0..slot_count).collect()
                }
            }
        };
        let arrows = cfg.display_arrows.then(|| {
            let state = self.arrow_state();
            (state.prev_enabled, state.next_enabled)
        });
        MoveContext {
            target_offset: self
                .layout
                .window_offset(cfg, self.item_count, current),
            active_slots,
            previous_slots: self.previous_slots(),
            probe_slots,
            thumbnails_slot: cfg.display_thumbnails.then_some(0),
            returning_to_thumbnails: cfg.display_thumbnails && current == 0,
            arrows,
            layout: self.layout,
        }
    }

    fn apply_layout(&self, surface: &mut dyn RenderSurface) {
        surface.apply(RenderOp::ApplyLayout {
            item_width: self.layout.item_width,
            strip_width: self.layout.strip_width(&self.cfg, self.item_count),
            thumbnails_width: self.layout.thumbnails_width(&self.cfg),
        });
    }
}
