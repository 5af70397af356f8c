//! Horizontal layout math for the slider strip.
//!
//! The visible page spans the full viewport width; each item takes an
//! equal share after reserving the configured preview fractions at the
//! edges. Offsets are logical pixels, positive rightward; the strip
//! offset is therefore zero or negative.

use serde::{Deserialize, Serialize};

use crate::config::SliderConfig;

/// Resolved widths for the current viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderLayout {
    /// Width of one page, equal to the viewport width.
    pub page_width: f64,
    /// Width of one item.
    pub item_width: f64,
}

impl SliderLayout {
    /// Compute widths for a viewport.
    pub fn compute(viewport_width: f64, cfg: &SliderConfig) -> Self {
        let shares = cfg.page_size as f64 + cfg.preview_left + cfg.preview_right;
        Self {
            page_width: viewport_width,
            item_width: viewport_width / shares,
        }
    }

    /// Width of the synthetic thumbnails slot (zero when not displayed).
    pub fn thumbnails_width(&self, cfg: &SliderConfig) -> f64 {
        if cfg.display_thumbnails {
            self.item_width * cfg.page_size as f64
        } else {
            0.0
        }
    }

    /// Total width of the item strip.
    pub fn strip_width(&self, cfg: &SliderConfig, item_count: usize) -> f64 {
        self.thumbnails_width(cfg) + item_count as f64 * self.item_width
    }

    /// Left edge of a slot within the strip. Slot 0 is the thumbnails
    /// page when displayed; main item `j` occupies slot
    /// `j + (thumbnails ? 1 : 0)`.
    pub fn slot_left(&self, cfg: &SliderConfig, slot: usize) -> f64 {
        if cfg.display_thumbnails {
            if slot == 0 {
                0.0
            } else {
                self.thumbnails_width(cfg) + (slot - 1) as f64 * self.item_width
            }
        } else {
            slot as f64 * self.item_width
        }
    }

    /// Strip offset that brings `current_index` into view, honoring the
    /// preview margins and clamping at both ends of the strip.
    pub fn window_offset(&self, cfg: &SliderConfig, item_count: usize, current_index: usize) -> f64 {
        let current = current_index as f64;
        let max_visual = item_count as f64 - cfg.page_size as f64 - cfg.preview_right
            + if cfg.display_thumbnails {
                cfg.page_size as f64
            } else {
                0.0
            };
        if current <= cfg.preview_left {
            0.0
        } else if current >= max_visual {
            self.item_width * (cfg.preview_left - max_visual)
        } else {
            self.item_width * (cfg.preview_left - current)
        }
    }
}

/// Number of navigable pages: main pages rounded up, plus the
/// thumbnails page when displayed.
pub fn page_count(cfg: &SliderConfig, item_count: usize) -> usize {
    let page_size = cfg.page_size as usize;
    let mut pages = item_count / page_size;
    if item_count % page_size > 0 {
        pages += 1;
    }
    pages + usize::from(cfg.display_thumbnails)
}

/// Page index holding `current_index`.
pub fn current_page(current_index: usize, page_size: u32) -> usize {
    let page_size = page_size as usize;
    current_index.div_ceil(page_size)
}
