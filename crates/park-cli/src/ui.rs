use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub quiet: bool,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let table_color = std::io::stdout().is_terminal()
        && flags.format == OutputFormat::Table
        && !flags.quiet
        && std::env::var_os("NO_COLOR").is_none();

    let _ = UI_PREFS.set(UiPrefs {
        table_color,
        quiet: flags.quiet,
    });
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        quiet: false,
    })
}

/// Print a human-facing notice to stderr unless `--quiet` is set.
pub fn notice(message: &str) {
    if !prefs().quiet {
        eprintln!("{message}");
    }
}
