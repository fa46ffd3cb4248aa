//! Status message functions for terminal output.

use owo_colors::OwoColorize;

use super::{colors_enabled, is_quiet};

fn emit(symbol: &str, message: &str, paint: fn(&str, &str) -> String) {
    if colors_enabled() {
        eprintln!("{}", paint(symbol, message));
    } else {
        eprintln!("{symbol} {message}");
    }
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    if is_quiet() {
        return;
    }
    emit("✓", message, |symbol, message| {
        format!("{} {}", symbol.green().bold(), message)
    });
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    if is_quiet() {
        return;
    }
    emit("ℹ", message, |symbol, message| {
        format!("{} {}", symbol.blue().bold(), message)
    });
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if is_quiet() {
        return;
    }
    emit("⚠", message, |symbol, message| {
        format!("{} {}", symbol.yellow().bold(), message.yellow())
    });
}

/// Print an error message to stderr. Shown even in quiet mode.
pub fn error(message: &str) {
    emit("✗", message, |symbol, message| {
        format!("{} {}", symbol.red().bold(), message.red())
    });
}
