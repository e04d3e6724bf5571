#![forbid(unsafe_code)]

//! Frame loop: input → scan slice → present → pace.

use std::io::{self, BufWriter, Stdout};
use std::time::Duration;

use mbrot_core::{
    AdvanceReport, Control, DisplaySurface, Event, Renderer, ScanClock,
};
use mbrot_tty::{HalfBlockSurface, SessionOptions, TerminalSession, TtyEventSource};
use web_time::Instant;

use crate::cli::Opts;

/// Window title for a given iteration budget.
pub fn title(budget: u32) -> String {
    format!("mbrot [iterations: {budget}]")
}

/// One frame: apply `events`, advance the scan, present the surface.
///
/// Returns `None` when a quit event arrived; nothing is presented then.
///
/// # Errors
///
/// Propagates presentation I/O errors.
pub fn frame<S, C, I>(renderer: &mut Renderer<S, C>, events: I) -> io::Result<Option<AdvanceReport>>
where
    S: DisplaySurface,
    C: ScanClock,
    I: IntoIterator<Item = Event>,
{
    match renderer.update(events) {
        Control::Quit => Ok(None),
        Control::Continue(report) => {
            renderer.present()?;
            Ok(Some(report))
        }
    }
}

/// The title to show after a frame, when the budget differs from `shown`.
pub fn retitle(shown: &mut u32, report: &AdvanceReport) -> Option<String> {
    if report.budget == *shown {
        return None;
    }
    *shown = report.budget;
    Some(title(report.budget))
}

/// How long to wait for input before the next frame.
///
/// A frame whose pass finished inside the budget starts the next pass right
/// away; otherwise the loop idles for the rest of `period`.
pub fn idle_after(report: &AdvanceReport, period: Duration, spent: Duration) -> Option<Duration> {
    if report.pass_completed && report.elapsed < period {
        return None;
    }
    period.checked_sub(spent).filter(|rest| !rest.is_zero())
}

type TtyRenderer = Renderer<HalfBlockSurface<BufWriter<Stdout>>>;

/// The terminal application: session, renderer and input, torn down in
/// reverse on drop.
pub struct App {
    renderer: TtyRenderer,
    input: TtyEventSource,
    exit_after: Option<Duration>,
    frame_period: Duration,
    shown_budget: u32,
    // Dropped last so the surface's final bytes land before the terminal is
    // restored.
    session: TerminalSession,
}

impl App {
    /// Take over the terminal and size the surface to it.
    ///
    /// # Errors
    ///
    /// Terminal setup failures.
    pub fn new(opts: &Opts) -> io::Result<Self> {
        let session = TerminalSession::new(SessionOptions {
            title: Some(title(1)),
            ..SessionOptions::fullscreen()
        })?;
        let (cols, rows) = session.size()?;
        let surface = HalfBlockSurface::for_terminal(BufWriter::new(io::stdout()), cols, rows);
        let renderer: TtyRenderer = Renderer::new(opts.render_config(), surface);
        let frame_period = renderer.frame_budget().max(Duration::from_millis(1));

        tracing::info!(
            cols,
            rows,
            width = renderer.size().width,
            height = renderer.size().height,
            "renderer started"
        );

        Ok(Self {
            renderer,
            input: TtyEventSource::new(),
            exit_after: opts.exit_after(),
            frame_period,
            shown_budget: 1,
            session,
        })
    }

    /// Run until quit, the exit-after deadline, or an I/O error. The
    /// terminal is restored when this returns.
    ///
    /// # Errors
    ///
    /// Input and output failures.
    pub fn run(mut self) -> io::Result<()> {
        let started = Instant::now();

        loop {
            let frame_start = Instant::now();
            let Some(report) = frame(&mut self.renderer, self.input.drain()?)? else {
                tracing::info!("quit");
                break;
            };
            if let Some(t) = retitle(&mut self.shown_budget, &report) {
                self.session.set_title(&t)?;
            }
            if let Some(limit) = self.exit_after
                && started.elapsed() >= limit
            {
                tracing::info!(
                    budget = self.renderer.iteration_budget(),
                    passes = self.renderer.scheduler().passes_completed(),
                    "exit-after elapsed"
                );
                break;
            }
            if let Some(rest) = idle_after(&report, self.frame_period, frame_start.elapsed()) {
                self.input.wait(rest)?;
            }
        }

        let stats = self.renderer.cache().stats();
        tracing::info!(
            pixels = self.renderer.scheduler().total_pixels(),
            cache_hits = stats.hits,
            cache_misses = stats.misses,
            "renderer stopped"
        );
        Ok(())
    }
}
