// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared output helpers for text and JSON rendering.

use serde::Serialize;
use std::io::IsTerminal;

/// Serialize as pretty JSON, or a single line when `compact`.
pub fn to_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

/// Print a value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> serde_json::Result<()> {
    println!("{}", to_json(value, compact)?);
    Ok(())
}

/// Colors are off when `NO_COLOR` is set or stdout is not a terminal.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Apply [`colors_enabled`] to every `colored` string rendered afterwards.
pub fn apply_color_policy() {
    colored::control::set_override(colors_enabled());
}

/// Truncate to `max` characters, appending `…` when shortened.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
