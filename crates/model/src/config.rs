//! Slider configuration: the unresolved option table and the resolved
//! per-breakpoint config.
//!
//! Options arrive as an attribute-style key/value table
//! ([`SliderOptions`], serde round-trippable) with optional overrides
//! for each viewport tier. Resolution against a concrete viewport width
//! happens in `whirl-engine::resolver` and produces a [`SliderConfig`],
//! which stays immutable until the next resize.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Viewport width at or above which the Large tier applies, unless
/// overridden by the option table.
pub const DEFAULT_LARGE_OFFSET: u32 = 900;

/// Viewport width at or above which the Medium tier applies.
pub const DEFAULT_MEDIUM_OFFSET: u32 = 600;

/// Default duration of a slide transition.
pub const DEFAULT_SLIDE_TIME_MS: u64 = 500;

/// Default maximum deviation from horizontal for a swipe to register.
pub const DEFAULT_MAX_SWIPE_ANGLE_DEG: f64 = 60.0;

/// Smallest permitted autorun delay.
pub const MIN_AUTORUN_DELAY_MS: u64 = 500;

/// One of three viewport-width tiers, each with its own option overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakpoint {
    Small,
    Medium,
    Large,
}

impl Breakpoint {
    /// Select the tier for a viewport width given the two ascending
    /// offset thresholds.
    pub fn select(viewport_width: f64, large_offset: u32, medium_offset: u32) -> Self {
        if viewport_width >= large_offset as f64 {
            Breakpoint::Large
        } else if viewport_width >= medium_offset as f64 {
            Breakpoint::Medium
        } else {
            Breakpoint::Small
        }
    }
}

/// An option with a base value and optional per-tier overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsiveOption<T> {
    /// Base value, used when the selected tier has no override.
    pub value: Option<T>,
    pub small: Option<T>,
    pub medium: Option<T>,
    pub large: Option<T>,
}

impl<T> Default for ResponsiveOption<T> {
    fn default() -> Self {
        Self {
            value: None,
            small: None,
            medium: None,
            large: None,
        }
    }
}

impl<T: Copy> ResponsiveOption<T> {
    /// An option with only a base value set.
    pub fn fixed(value: T) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// The value in effect at a tier: tier override, else base.
    pub fn at(&self, breakpoint: Breakpoint) -> Option<T> {
        let tier = match breakpoint {
            Breakpoint::Small => self.small,
            Breakpoint::Medium => self.medium,
            Breakpoint::Large => self.large,
        };
        tier.or(self.value)
    }

    /// Like [`ResponsiveOption::at`], falling back to a default.
    pub fn resolve(&self, breakpoint: Breakpoint, fallback: T) -> T {
        self.at(breakpoint).unwrap_or(fallback)
    }

    /// Every value present anywhere in the option, for validation.
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        [self.value, self.small, self.medium, self.large]
            .into_iter()
            .flatten()
    }
}

/// A CSS-style timing curve descriptor. The core only decides which
/// curve to request; interpolation is the renderer's concern except in
/// interval-driven motion, which is always linear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimingCurve {
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl fmt::Display for TimingCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingCurve::Linear => write!(f, "linear"),
            TimingCurve::Ease => write!(f, "ease"),
            TimingCurve::EaseIn => write!(f, "ease-in"),
            TimingCurve::EaseOut => write!(f, "ease-out"),
            TimingCurve::EaseInOut => write!(f, "ease-in-out"),
            TimingCurve::CubicBezier { x1, y1, x2, y2 } => {
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// A fade transform endpoint: horizontal shift as a percentage of item
/// width plus a uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FadeTransform {
    pub translate_x_pct: f64,
    pub scale: f64,
}

impl FadeTransform {
    /// The resting transform of a slider item.
    pub const IDENTITY: FadeTransform = FadeTransform {
        translate_x_pct: 0.0,
        scale: 1.0,
    };

    /// Default entry transform for incoming items.
    pub const DEFAULT_IN: FadeTransform = FadeTransform {
        translate_x_pct: 10.0,
        scale: 1.2,
    };

    /// Default exit transform for outgoing item clones.
    pub const DEFAULT_OUT: FadeTransform = FadeTransform {
        translate_x_pct: -10.0,
        scale: 0.9,
    };
}

/// Resolved cross-dissolve configuration. `in_timings`/`out_timings`
/// and `in_transforms`/`out_transforms` are index-paired: one random
/// index picks the timing pair, an independent one the transform pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadingConfig {
    pub in_timings: Vec<TimingCurve>,
    pub out_timings: Vec<TimingCurve>,
    pub in_transforms: Vec<FadeTransform>,
    pub out_transforms: Vec<FadeTransform>,
}

impl Default for FadingConfig {
    fn default() -> Self {
        Self {
            in_timings: vec![TimingCurve::Ease],
            out_timings: vec![TimingCurve::Ease],
            in_transforms: vec![FadeTransform::DEFAULT_IN],
            out_transforms: vec![FadeTransform::DEFAULT_OUT],
        }
    }
}

/// How the item height follows the item width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AspectRatioMode {
    /// Measure all slots once content is measurable.
    #[default]
    Auto,
    /// Constant width/height ratio; no measurement ever needed.
    Fixed(f64),
    /// Re-measure the active window on every move.
    AdjustByActive,
    /// Re-measure the slot type under the current index on every move.
    AdjustByType,
}

impl AspectRatioMode {
    /// The constant ratio, when this mode carries one.
    pub fn fixed_ratio(&self) -> Option<f64> {
        match self {
            AspectRatioMode::Fixed(ratio) => Some(*ratio),
            _ => None,
        }
    }

    /// Whether heights must be recomputed on every move (not just on
    /// init/resize).
    pub fn heights_change_on_slide(&self) -> bool {
        matches!(
            self,
            AspectRatioMode::AdjustByActive | AspectRatioMode::AdjustByType
        )
    }
}

/// Which animation driver performs translational/swipe moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MotionDriver {
    /// Hand the renderer a duration + curve descriptor and let its
    /// native transition machinery interpolate.
    #[default]
    Declarative,
    /// Step the offset every 10 ms with a precomputed per-tick speed.
    Interval,
}

/// The unresolved, attribute-style option table.
///
/// All fields are optional; absent values fall back to the documented
/// defaults at resolve time. Invalid combinations are rejected by
/// `whirl-engine::resolver::resolve`, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct SliderOptions {
    /// Viewport tier thresholds. Must be provided together or not at
    /// all; default to 900/600.
    pub view_large_offset: Option<u32>,
    pub view_medium_offset: Option<u32>,

    pub page_size: ResponsiveOption<u32>,
    pub preview_left: ResponsiveOption<f64>,
    pub preview_right: ResponsiveOption<f64>,
    pub display_thumbnails: ResponsiveOption<bool>,
    pub display_arrows: ResponsiveOption<bool>,
    pub display_navigator: ResponsiveOption<bool>,

    /// Duration of a slide transition in ms; must be a multiple of 10.
    pub slide_time_ms: Option<u64>,
    pub slide_timing: Option<TimingCurve>,
    pub swipe_timing: Option<TimingCurve>,

    /// Fading is enabled as soon as any of the four lists is provided;
    /// missing counterparts take defaults.
    pub fading_in_timings: Option<Vec<TimingCurve>>,
    pub fading_out_timings: Option<Vec<TimingCurve>>,
    pub fading_in_transforms: Option<Vec<FadeTransform>>,
    pub fading_out_transforms: Option<Vec<FadeTransform>>,

    /// Autorun is enabled by providing a delay (≥ 500, multiple of 10).
    pub autorun_delay_ms: Option<u64>,
    pub autorun_pause_on_hover: bool,

    pub max_swipe_angle_deg: Option<f64>,
    pub item_aspect_ratio: Option<AspectRatioMode>,

    pub repeat_at_first: bool,
    pub repeat_at_last: bool,

    pub motion_driver: MotionDriver,
}

impl SliderOptions {
    /// Parse an option table from a JSON object string.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The resolved configuration for one breakpoint. Immutable until the
/// next resize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    pub breakpoint: Breakpoint,
    pub page_size: u32,
    pub preview_left: f64,
    pub preview_right: f64,
    pub display_thumbnails: bool,
    pub display_arrows: bool,
    pub display_navigator: bool,
    pub slide_time_ms: u64,
    pub slide_timing: TimingCurve,
    pub swipe_timing: TimingCurve,
    pub fading: Option<FadingConfig>,
    pub autorun_delay_ms: Option<u64>,
    pub autorun_pause_on_hover: bool,
    pub max_swipe_angle_deg: f64,
    pub aspect_ratio: AspectRatioMode,
    pub repeat_at_first: bool,
    pub repeat_at_last: bool,
    pub motion_driver: MotionDriver,
}

impl SliderConfig {
    /// Total addressable slots: content items plus the synthetic
    /// thumbnails page when displayed.
    pub fn slot_count(&self, item_count: usize) -> usize {
        item_count + usize::from(self.display_thumbnails)
    }

    /// Highest stable index.
    pub fn last_index(&self, item_count: usize) -> usize {
        if self.display_thumbnails {
            item_count
        } else {
            item_count.saturating_sub(self.page_size as usize)
        }
    }

    /// First index of the main (non-thumbnails) region.
    pub fn main_first_index(&self) -> usize {
        if self.display_thumbnails {
            self.page_size as usize
        } else {
            0
        }
    }
}
