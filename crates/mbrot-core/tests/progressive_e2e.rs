#![forbid(unsafe_code)]

//! End-to-end behavior of the progressive renderer on an in-memory surface.

use std::time::Duration;

use mbrot_core::{
    Control, DisplaySurface, Event, EscapeResult, GridSize, ManualClock, MemorySurface,
    PackedRgb, PixelCoord, Power, RenderConfig, Renderer, ScanConfig, Viewport, color_for,
    evaluate,
};

/// Render `size` directly at a fixed budget, no cache, no time slicing.
fn direct_render(viewport: Viewport, power: Power, size: GridSize, budget: u32) -> Vec<PackedRgb> {
    let mut out = Vec::with_capacity(size.area() as usize);
    for y in 0..size.height {
        for x in 0..size.width {
            let z0 = viewport.to_complex(PixelCoord::new(x, y), size);
            let iteration = evaluate(z0, power, budget).iteration_or(budget);
            out.push(color_for(iteration, budget));
        }
    }
    out
}

fn sliced_renderer(size: GridSize, check_interval: u32) -> Renderer<MemorySurface, ManualClock> {
    let config = RenderConfig {
        viewport: Viewport::DEFAULT,
        scan: ScanConfig::default().with_check_interval(check_interval),
    };
    // Each clock read moves 10ms, so a frame suspends at its second check.
    Renderer::with_clock(
        config,
        MemorySurface::new(size),
        ManualClock::with_step(Duration::from_millis(10)),
    )
}

#[test]
fn cached_progressive_render_matches_direct_render() {
    let size = GridSize::new(48, 27);
    let mut r = sliced_renderer(size, 50);

    for target in 2..=12 {
        while r.iteration_budget() < target {
            let control = r.update(std::iter::empty());
            assert!(matches!(control, Control::Continue(_)));
        }
        // The pass at budget `target - 1` just finished writing every pixel.
        let expected = direct_render(Viewport::DEFAULT, Power::MANDELBROT, size, target - 1);
        assert_eq!(
            r.surface().pixels(),
            expected.as_slice(),
            "mismatch after pass at budget {}",
            target - 1
        );
    }
}

#[test]
fn frames_are_time_sliced() {
    let size = GridSize::new(64, 36);
    let mut r = sliced_renderer(size, 100);

    let mut frames = 0;
    let mut pixels = 0;
    while r.iteration_budget() == 1 {
        let Control::Continue(report) = r.update(std::iter::empty()) else {
            panic!("no quit was sent");
        };
        frames += 1;
        pixels += report.pixels;
        assert!(report.pixels <= size.area());
    }
    assert_eq!(pixels, size.area());
    assert!(frames > 1, "a 2304-pixel pass should span several frames");
}

#[test]
fn every_pass_writes_each_pixel_once() {
    let size = GridSize::new(20, 10);
    let mut r = sliced_renderer(size, 7);
    r.render_until_budget(4);
    // Three passes, each over 200 pixels.
    assert_eq!(r.surface().writes(), 600);
    assert_eq!(r.scheduler().total_pixels(), 600);
    assert_eq!(r.scheduler().passes_completed(), 3);
}

#[test]
fn resize_mid_pass_restarts_at_origin_with_budget_one() {
    let mut r = sliced_renderer(GridSize::new(64, 36), 100);
    r.render_until_budget(3);
    r.update(std::iter::empty());
    assert_ne!(r.cursor(), PixelCoord::ORIGIN);

    r.on_resize(10, 10);
    assert_eq!(r.cursor(), PixelCoord::ORIGIN);
    assert_eq!(r.iteration_budget(), 1);
    assert!(r.cache().is_empty());

    let report = r.advance_for(Duration::MAX);
    assert_eq!(report.cache_hits, 0);
    assert_eq!(report.evaluations, 100);
    assert_eq!(
        r.surface().pixels(),
        direct_render(Viewport::DEFAULT, Power::MANDELBROT, GridSize::new(10, 10), 1).as_slice()
    );
}

#[test]
fn surface_tracks_resize_events() {
    let mut r = sliced_renderer(GridSize::new(4, 4), 10);
    r.update([Event::Resized {
        width: 9,
        height: 2,
    }]);
    assert_eq!(r.surface().size(), GridSize::new(9, 2));
    assert_eq!(r.surface().width(), 9);
}

#[test]
fn origin_is_white_at_every_budget() {
    // 2x2 over the default viewport: pixel (1,1) maps to 0+0i.
    let mut r = sliced_renderer(GridSize::new(2, 2), 1);
    for _ in 0..5 {
        r.advance_for(Duration::MAX);
        assert_eq!(r.surface().pixel(PixelCoord::new(1, 1)), Some(PackedRgb::WHITE));
    }
    assert_eq!(
        evaluate(origin_point(), Power::MANDELBROT, 1),
        EscapeResult::NotEscaped
    );
}

#[test]
fn cubic_power_renders_differently() {
    let size = GridSize::new(32, 18);
    let quad = direct_render(Viewport::DEFAULT, Power::MANDELBROT, size, 20);
    let cubic = direct_render(Viewport::DEFAULT, Power::new(3.0).unwrap(), size, 20);
    assert_ne!(quad, cubic);
}

fn origin_point() -> num_complex::Complex64 {
    Viewport::DEFAULT.to_complex(PixelCoord::new(1, 1), GridSize::new(2, 2))
}
