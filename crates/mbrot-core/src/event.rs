#![forbid(unsafe_code)]

/// Input the renderer reacts to. Backends translate their native events into
/// these; everything else is dropped at the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Stop rendering.
    Quit,
    /// The display now has `width × height` pixels.
    Resized { width: u32, height: u32 },
}
