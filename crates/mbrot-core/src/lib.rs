#![forbid(unsafe_code)]

//! Core: progressive escape-time rendering engine.
//!
//! The engine renders a Mandelbrot/multibrot image a slice at a time. Each
//! call to [`Renderer::update`](renderer::Renderer::update) drains input
//! events, then lets the [`ScanScheduler`](scheduler::ScanScheduler) visit as
//! many pixels as fit in the frame budget. Completing a full pass raises the
//! iteration budget by one, so the image sharpens frame over frame.
//!
//! Nothing in this crate touches a terminal or window: output goes through the
//! [`DisplaySurface`](surface::DisplaySurface) trait and time comes from a
//! [`ScanClock`](clock::ScanClock).

pub mod cache;
pub mod clock;
pub mod color;
pub mod config;
pub mod escape;
pub mod event;
pub mod grid;
pub mod logging;
pub mod renderer;
pub mod scheduler;
pub mod surface;
pub mod viewport;

pub use cache::EscapeCache;
pub use clock::{ManualClock, MonotonicClock, ScanClock};
pub use color::{PackedRgb, color_for};
pub use config::{ConfigError, RenderConfig};
pub use escape::{EscapeResult, Power, evaluate};
pub use event::Event;
pub use grid::{GridSize, PixelCoord};
pub use renderer::{Control, Renderer};
pub use scheduler::{AdvanceReport, ScanConfig, ScanScheduler};
pub use surface::{DisplaySurface, MemorySurface};
pub use viewport::Viewport;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace};
