#![forbid(unsafe_code)]
//! Native terminal backend for mbrot.
//!
//! - [`TerminalSession`]: raw mode, alternate screen and cursor, restored on
//!   drop, panic and SIGINT/SIGTERM.
//! - [`HalfBlockSurface`]: a [`DisplaySurface`](mbrot_core::DisplaySurface)
//!   drawing two pixels per cell with `▀` and 24-bit color.
//! - [`TtyEventSource`]: maps terminal input onto [`mbrot_core::Event`].

pub mod events;
pub mod session;
pub mod surface;

pub use events::{TtyEventSource, map_event};
pub use session::{SessionOptions, TerminalSession};
pub use surface::{HALF_BLOCK, HalfBlockSurface, pixel_size};
