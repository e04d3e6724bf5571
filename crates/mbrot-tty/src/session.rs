#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! RAII ownership of raw mode, the alternate screen and cursor visibility.
//! Cleanup runs on drop, from a panic hook, and from a SIGINT/SIGTERM handler
//! thread, so the user's shell is restored on every exit path short of
//! `SIGKILL`.
//!
//! # Escape Sequences Reference
//!
//! | Feature | Enable | Disable |
//! |---------|--------|---------|
//! | Alternate screen | `CSI ? 1049 h` | `CSI ? 1049 l` |
//! | Show cursor | `CSI ? 25 h` | `CSI ? 25 l` |
//! | Synchronized output | `CSI ? 2026 h` | `CSI ? 2026 l` |
//! | Reset style | `CSI 0 m` | N/A |
//!
//! # Cleanup Order
//!
//! Reverse of enabling:
//! 1. Reset colors
//! 2. Show cursor (always)
//! 3. Leave alternate screen (if enabled)
//! 4. Exit raw mode (always)
//! 5. Flush stdout

use std::io::{self, Write};
use std::sync::OnceLock;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Which terminal modes the session enables.
///
/// ```
/// use mbrot_tty::SessionOptions;
///
/// let opts = SessionOptions {
///     alternate_screen: true,
///     hide_cursor: true,
///     ..Default::default()
/// };
/// assert!(opts.title.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Switch to the alternate screen buffer, preserving scrollback.
    pub alternate_screen: bool,
    /// Hide the text cursor while the session is alive.
    pub hide_cursor: bool,
    /// Initial window title.
    pub title: Option<String>,
}

impl SessionOptions {
    /// Full-screen rendering: alternate screen, hidden cursor.
    #[must_use]
    pub fn fullscreen() -> Self {
        Self {
            alternate_screen: true,
            hide_cursor: true,
            title: None,
        }
    }
}

/// A terminal session that owns raw mode and restores the terminal on drop.
///
/// Only one session should exist at a time.
///
/// ```no_run
/// use mbrot_tty::{SessionOptions, TerminalSession};
///
/// let session = TerminalSession::new(SessionOptions::fullscreen())?;
/// let (cols, rows) = session.size()?;
/// # let _ = (cols, rows);
/// // Terminal restored when `session` drops.
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    alternate_screen_enabled: bool,
    cursor_hidden: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Enter raw mode and the requested modes.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled, a mode escape cannot
    /// be written, or the signal handler cannot be registered.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        #[cfg(feature = "tracing")]
        tracing::info!("terminal raw mode enabled");

        let mut session = Self {
            options: options.clone(),
            alternate_screen_enabled: false,
            cursor_hidden: false,
            #[cfg(unix)]
            signal_guard: None,
        };

        #[cfg(unix)]
        {
            session.signal_guard = Some(SignalGuard::new()?);
        }

        let mut stdout = io::stdout();

        if options.alternate_screen {
            crossterm::execute!(
                stdout,
                crossterm::terminal::EnterAlternateScreen,
                crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
            )?;
            session.alternate_screen_enabled = true;
            #[cfg(feature = "tracing")]
            tracing::info!("alternate screen enabled");
        }

        if options.hide_cursor {
            crossterm::execute!(stdout, crossterm::cursor::Hide)?;
            session.cursor_hidden = true;
        }

        if let Some(title) = &options.title {
            session.set_title(title)?;
        }

        Ok(session)
    }

    /// Terminal size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    /// Set the window title (`OSC 0`).
    pub fn set_title(&self, title: &str) -> io::Result<()> {
        crossterm::execute!(io::stdout(), crossterm::terminal::SetTitle(title))
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    fn cleanup(&mut self) {
        #[cfg(unix)]
        let _ = self.signal_guard.take();

        let mut stdout = io::stdout();

        let _ = crossterm::execute!(stdout, crossterm::style::ResetColor);

        // Always show cursor before leaving
        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
        self.cursor_hidden = false;

        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
            #[cfg(feature = "tracing")]
            tracing::info!("alternate screen disabled");
        }

        let _ = crossterm::terminal::disable_raw_mode();
        #[cfg(feature = "tracing")]
        tracing::info!("terminal raw mode disabled");

        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();

    let _ = crossterm::execute!(
        stdout,
        crossterm::terminal::EndSynchronizedUpdate,
        crossterm::style::ResetColor
    );
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::Builder::new()
            .name("mbrot-signals".into())
            .spawn(move || {
                if let Some(signal) = signals.forever().next() {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(signal, "termination signal received, cleaning up");
                    best_effort_cleanup();
                    std::process::exit(128 + signal);
                }
            })?;
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_minimal() {
        let opts = SessionOptions::default();
        assert!(!opts.alternate_screen);
        assert!(!opts.hide_cursor);
        assert!(opts.title.is_none());
    }

    #[test]
    fn fullscreen_options() {
        let opts = SessionOptions::fullscreen();
        assert!(opts.alternate_screen);
        assert!(opts.hide_cursor);
    }

    // Entering raw mode from a unit test would fight the test runner for the
    // controlling terminal; session lifecycle is exercised by the binary.
}
