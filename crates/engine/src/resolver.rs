//! Responsive configuration resolution.
//!
//! Selects the breakpoint for the current viewport width and collapses
//! the option table into a [`SliderConfig`]. Validation failures are
//! fatal here — a malformed table never reaches the index or motion
//! machinery.

use whirl_common::error::{SliderError, SliderResult};
use whirl_model::config::{
    AspectRatioMode, Breakpoint, FadingConfig, SliderConfig, SliderOptions, TimingCurve,
    DEFAULT_LARGE_OFFSET, DEFAULT_MAX_SWIPE_ANGLE_DEG, DEFAULT_MEDIUM_OFFSET,
    DEFAULT_SLIDE_TIME_MS, MIN_AUTORUN_DELAY_MS,
};

/// Resolve the option table against a viewport width.
///
/// `item_count` participates because a strip shorter than one page
/// cannot page or preview: thumbnails and previews are downgraded away
/// rather than reported as errors.
pub fn resolve(
    viewport_width: f64,
    item_count: usize,
    options: &SliderOptions,
) -> SliderResult<SliderConfig> {
    validate(options)?;

    let large_offset = options.view_large_offset.unwrap_or(DEFAULT_LARGE_OFFSET);
    let medium_offset = options.view_medium_offset.unwrap_or(DEFAULT_MEDIUM_OFFSET);
    let breakpoint = Breakpoint::select(viewport_width, large_offset, medium_offset);

    let page_size = options.page_size.resolve(breakpoint, 1);
    let mut preview_left = options.preview_left.resolve(breakpoint, 0.0);
    let mut preview_right = options.preview_right.resolve(breakpoint, 0.0);
    let mut display_thumbnails = options.display_thumbnails.resolve(breakpoint, false);

    if item_count <= page_size as usize {
        if display_thumbnails || preview_left > 0.0 || preview_right > 0.0 {
            tracing::debug!(
                item_count,
                page_size,
                "strip shorter than one page; disabling thumbnails and previews"
            );
        }
        display_thumbnails = false;
        preview_left = 0.0;
        preview_right = 0.0;
    }

    Ok(SliderConfig {
        breakpoint,
        page_size,
        preview_left,
        preview_right,
        display_thumbnails,
        display_arrows: options.display_arrows.resolve(breakpoint, false),
        display_navigator: options.display_navigator.resolve(breakpoint, false),
        slide_time_ms: options.slide_time_ms.unwrap_or(DEFAULT_SLIDE_TIME_MS),
        slide_timing: options.slide_timing.unwrap_or(TimingCurve::Linear),
        swipe_timing: options.swipe_timing.unwrap_or(TimingCurve::EaseOut),
        fading: resolve_fading(options),
        autorun_delay_ms: options.autorun_delay_ms,
        autorun_pause_on_hover: options.autorun_pause_on_hover,
        max_swipe_angle_deg: options
            .max_swipe_angle_deg
            .unwrap_or(DEFAULT_MAX_SWIPE_ANGLE_DEG),
        aspect_ratio: options.item_aspect_ratio.unwrap_or_default(),
        repeat_at_first: options.repeat_at_first,
        repeat_at_last: options.repeat_at_last,
        motion_driver: options.motion_driver,
    })
}

/// Fading is enabled by providing any of the four lists; missing
/// counterparts take the single-entry defaults.
fn resolve_fading(options: &SliderOptions) -> Option<FadingConfig> {
    let disabled = options.fading_in_timings.is_none()
        && options.fading_out_timings.is_none()
        && options.fading_in_transforms.is_none()
        && options.fading_out_transforms.is_none();
    if disabled {
        return None;
    }
    let defaults = FadingConfig::default();
    Some(FadingConfig {
        in_timings: options
            .fading_in_timings
            .clone()
            .unwrap_or(defaults.in_timings),
        out_timings: options
            .fading_out_timings
            .clone()
            .unwrap_or(defaults.out_timings),
        in_transforms: options
            .fading_in_transforms
            .clone()
            .unwrap_or(defaults.in_transforms),
        out_transforms: options
            .fading_out_transforms
            .clone()
            .unwrap_or(defaults.out_transforms),
    })
}

fn validate(options: &SliderOptions) -> SliderResult<()> {
    match (options.view_large_offset, options.view_medium_offset) {
        (Some(_), None) | (None, Some(_)) => {
            return Err(SliderError::config(
                "view offsets must be provided together, or not at all",
            ));
        }
        (Some(large), Some(medium)) => {
            if large < 1 || medium < 1 {
                return Err(SliderError::config(
                    "view offsets must be integers greater than 0",
                ));
            }
        }
        (None, None) => {}
    }

    if options.page_size.values().any(|size| size < 1) {
        return Err(SliderError::config(
            "page size must be an integer greater than 0",
        ));
    }

    let preview_invalid = |preview: f64| !preview.is_finite() || preview < 0.0;
    if options.preview_left.values().any(preview_invalid)
        || options.preview_right.values().any(preview_invalid)
    {
        return Err(SliderError::config("previews must be numbers not less than 0"));
    }

    if let Some(slide_time) = options.slide_time_ms {
        if slide_time % 10 != 0 {
            return Err(SliderError::config("slide time must be a multiple of 10"));
        }
    }

    if let Some(delay) = options.autorun_delay_ms {
        if delay < MIN_AUTORUN_DELAY_MS {
            return Err(SliderError::config(
                "autorun delay must be an integer not less than 500",
            ));
        }
        if delay % 10 != 0 {
            return Err(SliderError::config("autorun delay must be a multiple of 10"));
        }
    }

    if let Some(angle) = options.max_swipe_angle_deg {
        if !(0.0..=90.0).contains(&angle) {
            return Err(SliderError::config(
                "max swipe angle must be in the range [0, 90]",
            ));
        }
    }

    if let Some(AspectRatioMode::Fixed(ratio)) = options.item_aspect_ratio {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(SliderError::config("item aspect ratio must be greater than 0"));
        }
    }

    validate_fading(options)?;

    Ok(())
}

fn validate_fading(options: &SliderOptions) -> SliderResult<()> {
    if let Some(fading) = resolve_fading(options) {
        if fading.in_timings.is_empty() || fading.in_transforms.is_empty() {
            return Err(SliderError::config("fading lists must not be empty"));
        }
        if fading.in_timings.len() != fading.out_timings.len() {
            return Err(SliderError::config(
                "fading-in-timings and fading-out-timings must have the same size",
            ));
        }
        if fading.in_transforms.len() != fading.out_transforms.len() {
            return Err(SliderError::config(
                "fading-in-transforms and fading-out-transforms must have the same size",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use whirl_model::config::{FadeTransform, MotionDriver, ResponsiveOption};

    #[test]
    fn test_defaults_resolve() {
        let cfg = resolve(1000.0, 8, &SliderOptions::default()).unwrap();
        assert_eq!(cfg.breakpoint, Breakpoint::Large);
        assert_eq!(cfg.page_size, 1);
        assert_eq!(cfg.slide_time_ms, 500);
        assert_eq!(cfg.slide_timing, TimingCurve::Linear);
        assert_eq!(cfg.swipe_timing, TimingCurve::EaseOut);
        assert_eq!(cfg.max_swipe_angle_deg, 60.0);
        assert!(cfg.fading.is_none());
        assert_eq!(cfg.motion_driver, MotionDriver::Declarative);
    }

    #[test]
    fn test_breakpoint_overrides_apply() {
        let options = SliderOptions {
            page_size: ResponsiveOption {
                value: Some(4),
                small: Some(1),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(resolve(1200.0, 10, &options).unwrap().page_size, 4);
        assert_eq!(resolve(400.0, 10, &options).unwrap().page_size, 1);
    }

    #[test]
    fn test_single_view_offset_is_fatal() {
        let options = SliderOptions {
            view_large_offset: Some(1000),
            ..Default::default()
        };
        assert!(resolve(800.0, 8, &options).is_err());
    }

    #[test]
    fn test_zero_view_offset_is_fatal() {
        let options = SliderOptions {
            view_large_offset: Some(900),
            view_medium_offset: Some(0),
            ..Default::default()
        };
        assert!(resolve(800.0, 8, &options).is_err());
    }

    #[test]
    fn test_zero_page_size_is_fatal() {
        let options = SliderOptions {
            page_size: ResponsiveOption::fixed(0),
            ..Default::default()
        };
        assert!(resolve(800.0, 8, &options).is_err());
    }

    #[test]
    fn test_negative_preview_is_fatal() {
        let options = SliderOptions {
            preview_right: ResponsiveOption::fixed(-0.5),
            ..Default::default()
        };
        assert!(resolve(800.0, 8, &options).is_err());
    }

    #[test]
    fn test_ragged_slide_time_is_fatal() {
        let options = SliderOptions {
            slide_time_ms: Some(505),
            ..Default::default()
        };
        assert!(resolve(800.0, 8, &options).is_err());
        let options = SliderOptions {
            slide_time_ms: Some(0),
            ..Default::default()
        };
        assert!(resolve(800.0, 8, &options).is_ok());
    }

    #[test]
    fn test_autorun_delay_bounds() {
        let too_short = SliderOptions {
            autorun_delay_ms: Some(490),
            ..Default::default()
        };
        assert!(resolve(800.0, 8, &too_short).is_err());
        let ragged = SliderOptions {
            autorun_delay_ms: Some(1005),
            ..Default::default()
        };
        assert!(resolve(800.0, 8, &ragged).is_err());
    }

    #[test]
    fn test_swipe_angle_range() {
        let options = SliderOptions {
            max_swipe_angle_deg: Some(90.5),
            ..Default::default()
        };
        assert!(resolve(800.0, 8, &options).is_err());
    }

    #[test]
    fn test_fixed_aspect_must_be_positive() {
        let options = SliderOptions {
            item_aspect_ratio: Some(AspectRatioMode::Fixed(0.0)),
            ..Default::default()
        };
        assert!(resolve(800.0, 8, &options).is_err());
    }

    #[test]
    fn test_mismatched_fading_lists_are_fatal() {
        let options = SliderOptions {
            fading_in_timings: Some(vec![TimingCurve::Ease, TimingCurve::EaseIn]),
            ..Default::default()
        };
        // out list defaults to a single entry
        assert!(resolve(800.0, 8, &options).is_err());
    }

    #[test]
    fn test_partial_fading_options_take_defaults() {
        let options = SliderOptions {
            fading_in_transforms: Some(vec![FadeTransform::DEFAULT_IN]),
            ..Default::default()
        };
        let cfg = resolve(800.0, 8, &options).unwrap();
        let fading = cfg.fading.unwrap();
        assert_eq!(fading.in_timings, vec![TimingCurve::Ease]);
        assert_eq!(fading.out_transforms, vec![FadeTransform::DEFAULT_OUT]);
    }

    #[test]
    fn test_short_strip_downgrades_thumbnails_and_previews() {
        let options = SliderOptions {
            page_size: ResponsiveOption::fixed(4),
            display_thumbnails: ResponsiveOption::fixed(true),
            preview_left: ResponsiveOption::fixed(0.3),
            preview_right: ResponsiveOption::fixed(0.3),
            ..Default::default()
        };
        let cfg = resolve(800.0, 3, &options).unwrap();
        assert!(!cfg.display_thumbnails);
        assert_eq!(cfg.preview_left, 0.0);
        assert_eq!(cfg.preview_right, 0.0);

        let cfg = resolve(800.0, 8, &options).unwrap();
        assert!(cfg.display_thumbnails);
        assert_eq!(cfg.preview_left, 0.3);
    }
}
