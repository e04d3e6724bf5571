#![forbid(unsafe_code)]

//! Long-lived renderer: scan state, escape cache, surface and clock in one
//! place, plus the reset path taken on resize.

use std::io;
use std::time::Duration;

use crate::cache::EscapeCache;
use crate::clock::{MonotonicClock, ScanClock};
use crate::config::RenderConfig;
use crate::event::Event;
use crate::grid::{GridSize, PixelCoord};
use crate::scheduler::{AdvanceReport, ScanScheduler};
use crate::surface::DisplaySurface;

/// Outcome of [`Renderer::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep going; carries the work done this frame.
    Continue(AdvanceReport),
    /// A quit event arrived. No work was done.
    Quit,
}

impl Control {
    #[inline]
    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// The frame's report, `None` on quit.
    #[inline]
    pub fn report(&self) -> Option<&AdvanceReport> {
        match self {
            Self::Continue(report) => Some(report),
            Self::Quit => None,
        }
    }
}

/// Progressive renderer over a [`DisplaySurface`].
///
/// Cursor, iteration budget and cache are created together and always reset
/// together; nothing else ever rewinds them.
#[derive(Debug)]
pub struct Renderer<S, C = MonotonicClock> {
    scheduler: ScanScheduler,
    cache: EscapeCache,
    surface: S,
    clock: C,
    frame_budget: Duration,
}

impl<S: DisplaySurface> Renderer<S, MonotonicClock> {
    /// Renderer on the wall clock.
    pub fn new(config: RenderConfig, surface: S) -> Self {
        Self::with_clock(config, surface, MonotonicClock::new())
    }
}

impl<S: DisplaySurface, C: ScanClock> Renderer<S, C> {
    /// Renderer on an explicit clock.
    ///
    /// An empty surface is grown to 1×1 first.
    pub fn with_clock(config: RenderConfig, mut surface: S, clock: C) -> Self {
        let current = surface.size();
        let size = GridSize::clamped(current.width, current.height);
        if size != current {
            surface.resize(size);
        }
        let cache = EscapeCache::with_capacity(size.area().min(1 << 20) as usize);
        Self {
            scheduler: ScanScheduler::new(config.viewport, config.scan, size),
            cache,
            surface,
            clock,
            frame_budget: config.scan.frame_budget,
        }
    }

    /// Handle a size change: new surface buffer, cursor at `(0, 0)`,
    /// budget 1, empty cache. Zero dimensions are clamped to 1.
    ///
    /// Always resets, even when the size is unchanged.
    pub fn on_resize(&mut self, width: u32, height: u32) -> GridSize {
        let size = GridSize::clamped(width, height);
        self.surface.resize(size);
        self.scheduler.reset(size);
        self.cache.clear();
        crate::info!(
            width = size.width,
            height = size.height,
            requested_width = width,
            requested_height = height,
            "render reset on resize"
        );
        size
    }

    /// Process one frame's worth of input, then advance the scan.
    ///
    /// A [`Event::Quit`] anywhere in `events` returns [`Control::Quit`]
    /// immediately, with no scan work. Multiple resizes coalesce: only the
    /// last size is applied, with a single reset.
    pub fn update<I>(&mut self, events: I) -> Control
    where
        I: IntoIterator<Item = Event>,
    {
        let mut pending: Option<(u32, u32)> = None;
        let mut coalesced = 0_u32;
        for event in events {
            match event {
                Event::Quit => {
                    crate::debug!("quit requested");
                    return Control::Quit;
                }
                Event::Resized { width, height } => {
                    if pending.is_some() {
                        coalesced += 1;
                    }
                    pending = Some((width, height));
                }
            }
        }
        if let Some((width, height)) = pending {
            if coalesced > 0 {
                crate::debug!(coalesced, "dropped superseded resize events");
            }
            self.on_resize(width, height);
        }
        Control::Continue(self.advance())
    }

    /// Advance for one frame budget.
    pub fn advance(&mut self) -> AdvanceReport {
        self.advance_for(self.frame_budget)
    }

    /// Advance for an explicit duration.
    pub fn advance_for(&mut self, max_duration: Duration) -> AdvanceReport {
        let _span = crate::debug_span!("advance", budget = self.scheduler.iteration_budget());
        let _guard = _span.enter();
        self.scheduler
            .advance(max_duration, &mut self.cache, &mut self.surface, &self.clock)
    }

    /// Run whole passes until the iteration budget reaches `target`,
    /// ignoring the frame budget.
    pub fn render_until_budget(&mut self, target: u32) {
        while self.scheduler.iteration_budget() < target {
            self.advance_for(Duration::MAX);
        }
    }

    /// Show the surface.
    ///
    /// # Errors
    ///
    /// Propagates the surface's I/O error.
    pub fn present(&mut self) -> io::Result<()> {
        self.surface.present()
    }

    #[inline]
    pub fn iteration_budget(&self) -> u32 {
        self.scheduler.iteration_budget()
    }

    #[inline]
    pub fn cursor(&self) -> PixelCoord {
        self.scheduler.cursor()
    }

    #[inline]
    pub fn size(&self) -> GridSize {
        self.scheduler.size()
    }

    #[inline]
    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    #[inline]
    pub fn scheduler(&self) -> &ScanScheduler {
        &self.scheduler
    }

    #[inline]
    pub fn cache(&self) -> &EscapeCache {
        &self.cache
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
