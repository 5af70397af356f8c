use whirl_engine::{MoveKind, RecordingSurface, RenderOp, Slider, SliderEvent};
use whirl_model::{PanEvent, SliderOptions, TimingCurve};

fn sample_options_json() -> &'static str {
    r#"{
        "view_large_offset": 900,
        "view_medium_offset": 600,
        "page_size": {"value": 2, "small": 1},
        "display_thumbnails": {"value": true, "small": false},
        "display_arrows": {"value": true},
        "slide_time_ms": 300,
        "autorun_delay_ms": 2000,
        "autorun_pause_on_hover": true,
        "fading_in_timings": ["ease"],
        "fading_out_timings": ["ease-in-out"],
        "fading_in_transforms": [{"translate_x_pct": 10.0, "scale": 1.2}],
        "fading_out_transforms": [{"translate_x_pct": -10.0, "scale": 0.9}],
        "repeat_at_first": true,
        "repeat_at_last": true,
        "item_aspect_ratio": {"fixed": 1.6},
        "max_swipe_angle_deg": 60.0
    }"#
}

fn sample_options() -> SliderOptions {
    SliderOptions::from_json_str(sample_options_json()).expect("sample options should parse")
}

fn completed(events: &[SliderEvent]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, SliderEvent::MoveCompleted { .. }))
}

fn started_with(events: &[SliderEvent], kind: MoveKind) -> bool {
    events
        .iter()
        .any(|event| matches!(event, SliderEvent::MoveStarted { kind: k, .. } if *k == kind))
}

#[test]
fn breakpoints_reshape_the_widget() {
    for (width, page_size, thumbnails, page_count) in
        [(1000.0, 2, true, 5), (700.0, 2, true, 5), (500.0, 1, false, 8)]
    {
        let mut surface = RecordingSurface::new(width);
        let (slider, events) = Slider::new(sample_options(), 8, 0, &mut surface).unwrap();
        assert_eq!(slider.config().page_size, page_size, "width {width}");
        assert_eq!(
            slider.config().display_thumbnails,
            thumbnails,
            "width {width}"
        );
        assert_eq!(slider.page_count(), page_count, "width {width}");
        assert!(events
            .iter()
            .any(|event| matches!(event, SliderEvent::Initialized { .. })));
    }
}

#[test]
fn clicks_swipes_and_autorun_share_one_busy_gate() {
    let mut surface = RecordingSurface::new(1000.0);
    let (mut slider, _) = Slider::new(sample_options(), 8, 0, &mut surface).unwrap();
    assert_eq!(slider.current_index(), 0);
    assert_eq!(slider.page_count(), 5);

    // manual page forward
    let events = slider.next(0, &mut surface);
    assert_eq!(slider.current_index(), 2);
    assert!(started_with(&events, MoveKind::Translational));
    assert!(slider.next(100, &mut surface).is_empty());
    assert!(completed(&slider.tick(300, &mut surface)));

    // a near-horizontal leftward drag of 600px over a 1000px page
    // advances one page (two items)
    slider.on_pan(&PanEvent::start(-175.0), 400, &mut surface);
    slider.on_pan(&PanEvent::moved(-400.0), 450, &mut surface);
    surface.take_ops();
    let events = slider.on_pan(&PanEvent::end(-600.0, 0.0), 500, &mut surface);
    assert_eq!(slider.current_index(), 4);
    assert!(started_with(&events, MoveKind::Swipe));
    assert!(surface.saw(|op| matches!(
        op,
        RenderOp::SetTransition {
            curve: TimingCurve::EaseOut,
            ..
        }
    )));
    assert!(completed(&slider.tick(800, &mut surface)));

    // autorun was rearmed at the swipe move's completion and keeps
    // stepping in the swipe's direction
    slider.tick(2800, &mut surface);
    assert_eq!(slider.current_index(), 6);
    assert!(completed(&slider.tick(3100, &mut surface)));

    // hovering pauses the cadence without killing it
    slider.set_hovering(true);
    assert!(slider.tick(4800, &mut surface).is_empty());
    assert_eq!(slider.current_index(), 6);
    slider.set_hovering(false);
    slider.tick(6800, &mut surface);
    assert_eq!(slider.current_index(), 8);
}

#[test]
fn autorun_wraps_with_a_fading_move() {
    let mut surface = RecordingSurface::new(1000.0);
    let (mut slider, _) = Slider::new(sample_options(), 8, 0, &mut surface).unwrap();

    // walk to the last index by hand; each next() rearms autorun on
    // completion
    let mut now = 0;
    for expected in [2usize, 4, 6, 8] {
        slider.next(now, &mut surface);
        assert_eq!(slider.current_index(), expected);
        now += 300;
        assert!(completed(&slider.tick(now, &mut surface)));
        now += 100;
    }

    // last completion at t=1500 armed autorun for t=3500
    surface.take_ops();
    let events = slider.tick(3500, &mut surface);
    assert_eq!(slider.current_index(), 2);
    assert!(started_with(&events, MoveKind::Fading));
    // the previous window (slots 7 and 8) is cloned as ghosts
    assert!(surface.saw(|op| matches!(op, RenderOp::SpawnGhosts { slots } if slots == &[7, 8])));

    // arm: end offset applies and ghosts land on the active slots
    slider.tick(3600, &mut surface);
    assert!(surface.saw(|op| matches!(op, RenderOp::SetOffset { left } if *left == -1000.0)));
    assert!(
        surface.saw(|op| matches!(op, RenderOp::PlaceGhosts { lefts } if lefts == &[1000.0, 1500.0]))
    );

    // engage: the two concurrent tweens use the configured pairs
    slider.tick(3610, &mut surface);
    assert!(surface.saw(|op| matches!(
        op,
        RenderOp::FadeGhostsOut {
            curve: TimingCurve::EaseInOut,
            duration_ms: 300,
            ..
        }
    )));
    assert!(surface.saw(|op| matches!(
        op,
        RenderOp::FadeSlotsIn {
            curve: TimingCurve::Ease,
            duration_ms: 300,
            ..
        }
    )));

    // completion precedes ghost cleanup
    surface.take_ops();
    assert!(completed(&slider.tick(3800, &mut surface)));
    assert!(!surface.saw(|op| matches!(op, RenderOp::RemoveGhosts)));
    slider.tick(3900, &mut surface);
    assert!(surface.saw(|op| matches!(op, RenderOp::RemoveGhosts)));
}

#[test]
fn resize_mid_move_snaps_without_losing_the_move() {
    let mut surface = RecordingSurface::new(1000.0);
    let (mut slider, _) = Slider::new(sample_options(), 8, 0, &mut surface).unwrap();

    slider.next(0, &mut surface);
    assert!(slider.is_moving());

    surface.set_viewport_width(700.0);
    surface.take_ops();
    let events = slider.on_resize(100, &mut surface).unwrap();
    assert!(events.is_empty());
    assert_eq!(slider.current_index(), 2);
    let ops = surface.take_ops();
    assert!(ops.contains(&RenderOp::ClearTransition));
    assert!(ops
        .iter()
        .any(|op| matches!(op, RenderOp::ApplyLayout { item_width, .. } if *item_width == 350.0)));

    // exactly one completion for the in-flight move
    assert!(completed(&slider.tick(300, &mut surface)));
    assert!(!completed(&slider.tick(400, &mut surface)));
}

#[test]
fn navigator_jump_suspends_autorun_stepping() {
    let mut surface = RecordingSurface::new(1000.0);
    let (mut slider, _) = Slider::new(sample_options(), 8, 0, &mut surface).unwrap();

    slider.next(0, &mut surface);
    slider.tick(300, &mut surface);
    slider.go_to_page(0, 400, &mut surface);
    assert_eq!(slider.current_index(), 0);

    // direction 0: the autorun cadence fires but performs no step
    let events = slider.tick(2300, &mut surface);
    assert!(events.is_empty());
    assert_eq!(slider.current_index(), 0);
}

#[test]
fn interval_driver_steps_the_offset_each_tick() {
    let mut options = sample_options();
    options.motion_driver = whirl_model::MotionDriver::Interval;
    options.slide_time_ms = Some(100);
    options.autorun_delay_ms = None;

    let mut surface = RecordingSurface::new(1000.0);
    let (mut slider, _) = Slider::new(options, 8, 0, &mut surface).unwrap();
    slider.next(0, &mut surface);
    surface.take_ops();

    for tick_at in (10..=90).step_by(10) {
        slider.tick(tick_at, &mut surface);
    }
    assert!(completed(&slider.tick(100, &mut surface)));

    let offsets: Vec<f64> = surface
        .take_ops()
        .into_iter()
        .filter_map(|op| match op {
            RenderOp::SetOffset { left } => Some(left),
            _ => None,
        })
        .collect();
    assert_eq!(offsets.len(), 10);
    // page size 2 at width 1000 with thumbnails: item width 500, the
    // move from offset 0 to -1000 advances 100px per tick
    assert_eq!(offsets[0], -100.0);
    assert_eq!(offsets[9], -1000.0);
}
