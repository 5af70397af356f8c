//! Index state: the single owner of `currentIndex`/`previousIndex`.
//!
//! Indexes live in item space, not page space. Slot 0 is the synthetic
//! thumbnails page when displayed, so a stable index is either 0 or at
//! least `page_size`; values strictly in between snap to `page_size`.

use whirl_model::config::SliderConfig;

/// Applies clamping, wrap-around, and thumbnails-page snapping.
#[derive(Debug, Clone, Default)]
pub struct IndexStateMachine {
    current: usize,
    previous: usize,
}

impl IndexStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn previous(&self) -> usize {
        self.previous
    }

    /// Apply a requested index and return the committed value.
    ///
    /// `previous` is recorded before the commit so the motion/fade layer
    /// knows which items were visible a moment ago.
    pub fn set_index(&mut self, requested: i64, cfg: &SliderConfig, item_count: usize) -> usize {
        let last_index = cfg.last_index(item_count) as i64;
        let page_size = cfg.page_size as i64;
        let current = self.current as i64;

        let mut next = requested;
        if (cfg.slot_count(item_count) as i64) < page_size {
            next = 0;
        } else if next < 0 {
            next = if current == 0 && cfg.repeat_at_first {
                last_index
            } else {
                0
            };
        } else if next > last_index {
            next = if current == last_index && cfg.repeat_at_last {
                0
            } else {
                last_index
            };
        } else if cfg.display_thumbnails && next > 0 && next < page_size {
            next = page_size;
        }

        self.previous = self.current;
        self.current = next as usize;
        self.current
    }

    /// Whether a slot falls in the window anchored at `current`.
    pub fn slot_is_active(&self, cfg: &SliderConfig, slot: usize) -> bool {
        Self::window_contains(cfg, self.current, slot)
    }

    /// Whether a slot falls in the window anchored at `previous`.
    ///
    /// A slot can be both previous and active (the windows overlap);
    /// callers must not treat the two as mutually exclusive.
    pub fn slot_is_previous(&self, cfg: &SliderConfig, slot: usize) -> bool {
        Self::window_contains(cfg, self.previous, slot)
    }

    pub fn active_slots(&self, cfg: &SliderConfig, item_count: usize) -> Vec<usize> {
        (0..cfg.slot_count(item_count))
            .filter(|&slot| self.slot_is_active(cfg, slot))
            .collect()
    }

    pub fn previous_slots(&self, cfg: &SliderConfig, item_count: usize) -> Vec<usize> {
        (0..cfg.slot_count(item_count))
            .filter(|&slot| self.slot_is_previous(cfg, slot))
            .collect()
    }

    fn window_contains(cfg: &SliderConfig, anchor: usize, slot: usize) -> bool {
        let delta = if cfg.display_thumbnails {
            cfg.page_size as usize - 1
        } else {
            0
        };
        let position = slot + delta;
        position >= anchor && position < anchor + cfg.page_size as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use whirl_model::config::{
        AspectRatioMode, Breakpoint, MotionDriver, TimingCurve,
    };

    fn config(
        page_size: u32,
        thumbnails: bool,
        repeat_at_first: bool,
        repeat_at_last: bool,
    ) -> SliderConfig {
        SliderConfig {
            breakpoint: Breakpoint::Large,
            page_size,
            preview_left: 0.0,
            preview_right: 0.0,
            display_thumbnails: thumbnails,
            display_arrows: false,
            display_navigator: false,
            slide_time_ms: 500,
            slide_timing: TimingCurve::Linear,
            swipe_timing: TimingCurve::EaseOut,
            fading: None,
            autorun_delay_ms: None,
            autorun_pause_on_hover: false,
            max_swipe_angle_deg: 60.0,
            aspect_ratio: AspectRatioMode::Auto,
            repeat_at_first,
            repeat_at_last,
            motion_driver: MotionDriver::Declarative,
        }
    }

    #[test]
    fn test_wrap_at_first_requires_flag() {
        let cfg = config(2, false, true, false);
        let mut index = IndexStateMachine::new();
        assert_eq!(index.set_index(-1, &cfg, 8), 6);

        let cfg = config(2, false, false, false);
        let mut index = IndexStateMachine::new();
        assert_eq!(index.set_index(-1, &cfg, 8), 0);
    }

    #[test]
    fn test_wrap_at_first_only_from_zero() {
        let cfg = config(2, false, true, false);
        let mut index = IndexStateMachine::new();
        index.set_index(2, &cfg, 8);
        // not at 0, so a negative request clamps instead of wrapping
        assert_eq!(index.set_index(-1, &cfg, 8), 0);
    }

    #[test]
    fn test_clamp_and_wrap_at_last() {
        let cfg = config(2, false, false, true);
        let mut index = IndexStateMachine::new();
        assert_eq!(index.set_index(100, &cfg, 8), 6);
        assert_eq!(index.set_index(8, &cfg, 8), 0);
    }

    #[test]
    fn test_thumbnails_gap_snaps_to_page_size() {
        let cfg = config(3, true, false, false);
        let mut index = IndexStateMachine::new();
        assert_eq!(index.set_index(1, &cfg, 8), 3);
        assert_eq!(index.set_index(2, &cfg, 8), 3);
        assert_eq!(index.set_index(0, &cfg, 8), 0);
    }

    #[test]
    fn test_short_strip_forces_zero() {
        let cfg = config(4, false, false, false);
        let mut index = IndexStateMachine::new();
        assert_eq!(index.set_index(3, &cfg, 2), 0);
    }

    #[test]
    fn test_previous_tracks_pre_commit_current() {
        let cfg = config(2, false, false, false);
        let mut index = IndexStateMachine::new();
        index.set_index(2, &cfg, 8);
        index.set_index(4, &cfg, 8);
        assert_eq!(index.previous(), 2);
        // re-applying the current index keeps previous equal to it
        index.set_index(4, &cfg, 8);
        assert_eq!(index.previous(), 4);
        assert_eq!(index.current(), 4);
    }

    #[test]
    fn test_paging_sequence_with_thumbnails_and_repeat() {
        // 8 items, page size 2, thumbnails on: lastIndex = 8
        let cfg = config(2, true, false, true);
        let mut index = IndexStateMachine::new();
        let mut seen = vec![];
        for _ in 0..5 {
            let next = index.current() as i64 + 2;
            seen.push(index.set_index(next, &cfg, 8));
        }
        assert_eq!(seen, vec![2, 4, 6, 8, 0]);
    }

    #[test]
    fn test_active_window_with_thumbnails() {
        let cfg = config(2, true, false, false);
        let mut index = IndexStateMachine::new();
        index.set_index(0, &cfg, 4);
        assert!(index.slot_is_active(&cfg, 0));
        assert!(!index.slot_is_active(&cfg, 1));

        index.set_index(2, &cfg, 4);
        assert_eq!(index.active_slots(&cfg, 4), vec![1, 2]);
        // slot 0 (thumbnails) was the only previous slot
        assert_eq!(index.previous_slots(&cfg, 4), vec![0]);
    }

    #[test]
    fn test_windows_may_overlap() {
        let cfg = config(3, false, false, false);
        let mut index = IndexStateMachine::new();
        index.set_index(2, &cfg, 8);
        index.set_index(4, &cfg, 8);
        // previous [2,5), active [4,7): slot 4 is in both
        assert!(index.slot_is_previous(&cfg, 4));
        assert!(index.slot_is_active(&cfg, 4));
    }

    proptest! {
        #[test]
        fn prop_index_invariant_holds(
            page_size in 1u32..=4,
            item_count in 0usize..=12,
            thumbnails in any::<bool>(),
            repeat_at_first in any::<bool>(),
            repeat_at_last in any::<bool>(),
            requests in prop::collection::vec(-20i64..30, 0..40),
        ) {
            // the resolver never leaves thumbnails on for short strips
            let thumbnails = thumbnails && item_count > page_size as usize;
            let cfg = config(page_size, thumbnails, repeat_at_first, repeat_at_last);
            let mut index = IndexStateMachine::new();
            for requested in requests {
                let applied = index.set_index(requested, &cfg, item_count);
                let last_index = cfg.last_index(item_count);
                prop_assert!(applied <= last_index);
                if thumbnails {
                    prop_assert!(
                        applied == 0 || applied >= page_size as usize,
                        "index {} strictly inside the thumbnails gap",
                        applied
                    );
                }
            }
        }
    }
}
