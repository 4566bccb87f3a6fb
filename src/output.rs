//! Terminal output helpers
//!
//! Small vocabulary of colored console lines shared by the CLI:
//! section headers for file dumps and status glyphs for writes.

use colored::Colorize;
use is_terminal::IsTerminal;

/// Disable colored output when stdout is not a terminal, so piped
/// output stays free of escape sequences.
pub fn init_color() {
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
}

/// Section header for a file dump. `prefix` is emitted verbatim in
/// front of the title, so callers can separate consecutive sections.
pub fn header(title: &str, prefix: &str) -> String {
    format!("{}{}", prefix, title.cyan().bold())
}

/// Status line for a written file.
pub fn updated(path: &std::path::Path) -> String {
    format!("{} Updated {}", "✔".green(), path.display())
}

/// Status line for a file that would be written in dry-run mode.
pub fn skipped(path: &std::path::Path) -> String {
    format!("{} Would update {} (dry-run)", "→".yellow(), path.display())
}
