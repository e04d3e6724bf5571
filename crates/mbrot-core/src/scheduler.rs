#![forbid(unsafe_code)]

//! Time-sliced progressive scan.
//!
//! # Model
//!
//! The scan walks the grid in row-major order through a single linear index
//! `cursor ∈ [0, area)`. Each [`ScanScheduler::advance`] call resumes at the
//! cursor and stops when either
//!
//! - the cursor reaches `area` (a pass completed), or
//! - a clock check finds the call has run longer than its budget.
//!
//! The clock is read only once every `check_interval` visited pixels, so a
//! call may overshoot its budget by up to `check_interval - 1` pixels of
//! work. Suspension leaves the cursor on the next unvisited pixel; the
//! following call picks up exactly there.
//!
//! Completing a pass raises the iteration budget by one and rewinds the
//! cursor to `(0, 0)`. A completed pass ends the call, so one call never
//! visits more than `area` pixels and never straddles two budgets.
//!
//! # Invariants
//!
//! 1. `cursor < area` between calls.
//! 2. Within a pass each pixel is visited exactly once.
//! 3. `budget ≥ 1`, and it only changes on pass completion or reset.
//! 4. The cache only ever holds escaped results.

use std::time::Duration;

use crate::cache::EscapeCache;
use crate::clock::ScanClock;
use crate::color::color_for;
use crate::escape::{EscapeResult, Power, evaluate};
use crate::grid::{GridSize, PixelCoord};
use crate::surface::DisplaySurface;
use crate::viewport::Viewport;

/// Pixels visited between clock reads.
pub const DEFAULT_CHECK_INTERVAL: u32 = 10_000;

/// Wall-clock budget per frame, about 60 fps.
pub const DEFAULT_FRAME_BUDGET: Duration = Duration::from_millis(16);

/// Scan parameters that survive resets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    /// Multibrot exponent.
    pub power: Power,
    /// Pixels between clock reads. `0` is treated as `1`.
    pub check_interval: u32,
    /// Time allowed per [`Renderer::update`](crate::renderer::Renderer::update).
    pub frame_budget: Duration,
}

impl ScanConfig {
    #[must_use]
    pub fn with_power(mut self, power: Power) -> Self {
        self.power = power;
        self
    }

    /// Set the clock-check cadence, clamped to at least one pixel.
    #[must_use]
    pub fn with_check_interval(mut self, pixels: u32) -> Self {
        self.check_interval = pixels.max(1);
        self
    }

    #[must_use]
    pub fn with_frame_budget(mut self, budget: Duration) -> Self {
        self.frame_budget = budget;
        self
    }

    #[inline]
    fn effective_check_interval(&self) -> u64 {
        u64::from(self.check_interval.max(1))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            power: Power::MANDELBROT,
            check_interval: DEFAULT_CHECK_INTERVAL,
            frame_budget: DEFAULT_FRAME_BUDGET,
        }
    }
}

/// What one [`ScanScheduler::advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvanceReport {
    /// Pixels visited (and written) in this call.
    pub pixels: u64,
    /// Pixels served from the escape cache.
    pub cache_hits: u64,
    /// Pixels that needed a fresh evaluation.
    pub evaluations: u64,
    /// The call finished a full pass.
    pub pass_completed: bool,
    /// The call stopped on the time budget with the pass unfinished.
    pub suspended: bool,
    /// Clock time spent in the call.
    pub elapsed: Duration,
    /// Iteration budget after the call.
    pub budget: u32,
}

/// Resumable row-major scan over the pixel grid.
#[derive(Debug, Clone)]
pub struct ScanScheduler {
    viewport: Viewport,
    config: ScanConfig,
    size: GridSize,
    cursor: u64,
    budget: u32,
    passes_completed: u64,
    total_pixels: u64,
}

impl ScanScheduler {
    /// A fresh scan at `(0, 0)` with budget 1.
    #[must_use]
    pub fn new(viewport: Viewport, config: ScanConfig, size: GridSize) -> Self {
        Self {
            viewport,
            config,
            size,
            cursor: 0,
            budget: 1,
            passes_completed: 0,
            total_pixels: 0,
        }
    }

    /// Restart at `(0, 0)` with budget 1 on a grid of `size`.
    ///
    /// The caller owns the cache and must clear it alongside.
    pub fn reset(&mut self, size: GridSize) {
        self.size = size;
        self.cursor = 0;
        self.budget = 1;
    }

    /// Next pixel to visit.
    #[inline]
    pub fn cursor(&self) -> PixelCoord {
        self.size.coord_at(self.cursor)
    }

    /// Linear form of [`cursor`](Self::cursor).
    #[inline]
    pub fn cursor_index(&self) -> u64 {
        self.cursor
    }

    #[inline]
    pub fn iteration_budget(&self) -> u32 {
        self.budget
    }

    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Full passes finished since construction, across resets.
    #[inline]
    pub fn passes_completed(&self) -> u64 {
        self.passes_completed
    }

    /// Pixels visited since construction, across resets.
    #[inline]
    pub fn total_pixels(&self) -> u64 {
        self.total_pixels
    }

    /// Visit pixels from the cursor until the pass completes or more than
    /// `max_duration` has elapsed at a clock check.
    ///
    /// Each pixel is served from `cache` when it already escaped, otherwise
    /// mapped and evaluated at the current budget; escaped results are
    /// recorded. The gray level is written to `surface`.
    pub fn advance<S, C>(
        &mut self,
        max_duration: Duration,
        cache: &mut EscapeCache,
        surface: &mut S,
        clock: &C,
    ) -> AdvanceReport
    where
        S: DisplaySurface + ?Sized,
        C: ScanClock + ?Sized,
    {
        let mut report = AdvanceReport {
            budget: self.budget,
            ..AdvanceReport::default()
        };
        let area = self.size.area();
        if area == 0 {
            return report;
        }

        let start = clock.now();
        let interval = self.config.effective_check_interval();
        let budget = self.budget;
        let mut since_check = 0_u64;

        while self.cursor < area {
            let coord = self.size.coord_at(self.cursor);
            let iteration = match cache.lookup(coord) {
                Some(hit) => {
                    report.cache_hits += 1;
                    hit
                }
                None => {
                    report.evaluations += 1;
                    let z0 = self.viewport.to_complex(coord, self.size);
                    let result = evaluate(z0, self.config.power, budget);
                    if let EscapeResult::Escaped(i) = result {
                        cache.record(coord, i);
                    }
                    result.iteration_or(budget)
                }
            };
            surface.write_pixel(coord, color_for(iteration, budget));

            self.cursor += 1;
            report.pixels += 1;
            since_check += 1;

            if since_check == interval {
                since_check = 0;
                if self.cursor < area && clock.now().saturating_sub(start) > max_duration {
                    report.suspended = true;
                    break;
                }
            }
        }

        if self.cursor >= area {
            self.cursor = 0;
            self.budget = self.budget.saturating_add(1);
            self.passes_completed += 1;
            report.pass_completed = true;
            crate::info!(
                pass = self.passes_completed,
                budget = self.budget,
                width = self.size.width,
                height = self.size.height,
                "scan pass completed"
            );
        } else {
            crate::debug!(
                cursor = self.cursor,
                area,
                pixels = report.pixels,
                "scan suspended on frame budget"
            );
        }

        self.total_pixels += report.pixels;
        report.elapsed = clock.now().saturating_sub(start);
        report.budget = self.budget;
        crate::trace!(
            pixels = report.pixels,
            cache_hits = report.cache_hits,
            evaluations = report.evaluations,
            elapsed_us = report.elapsed.as_micros() as u64,
            "advance"
        );
        report
    }
}
