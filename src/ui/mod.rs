//! Terminal output helpers
//!
//! Informational output can be muted for the duration of an orchestration
//! flow so driver output dominates; the quiet mode is scoped: acquired at the
//! start of the flow and released on every exit path when the guard drops.
//! Warnings always print.

use std::cell::Cell;

use console::Style;

thread_local! {
    static QUIET: Cell<bool> = const { Cell::new(false) };
}

pub fn is_quiet() -> bool {
    QUIET.with(Cell::get)
}

/// Print an informational line unless quiet mode is active
pub fn info(message: impl AsRef<str>) {
    if !is_quiet() {
        println!("{}", message.as_ref());
    }
}

/// Print a warning to stderr; never muted
pub fn warn(message: impl AsRef<str>) {
    eprintln!(
        "{} {}",
        Style::new().yellow().bold().apply_to("WARNING:"),
        message.as_ref()
    );
}

/// Scoped quiet mode; restores the previous mode on drop
pub struct QuietMode {
    previous: bool,
}

impl QuietMode {
    #[must_use = "quiet mode ends when the guard drops"]
    pub fn acquire() -> Self {
        let previous = QUIET.with(|q| q.replace(true));
        Self { previous }
    }
}

impl Drop for QuietMode {
    fn drop(&mut self) {
        let previous = self.previous;
        QUIET.with(|q| q.set(previous));
    }
}
