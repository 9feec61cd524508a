//! Terminal rendering for CLI commands.
//!
//! Every helper renders one [`Line`]. In human mode lines are colored and
//! indented; with `--json` each line becomes `{"type": .., "payload": ..}` on
//! stdout. `--quiet` hides headers, fields and notes but never warnings,
//! errors or results.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

/// Flags shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static MODE: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn mode() -> OutputConfig {
    *MODE.get_or_init(RwLock::default).read()
}

/// Install the flags parsed from the command line.
pub fn configure(config: OutputConfig) {
    *MODE.get_or_init(RwLock::default).write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    mode().json
}

enum Line<'a> {
    Header { version: &'a str },
    Section(&'a str),
    Field { label: &'a str, value: String },
    Success(&'a str),
    Warning(&'a str),
    Note(&'a str),
}

impl Line<'_> {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Header { .. } => "header",
            Self::Section(_) => "section",
            Self::Field { .. } => "field",
            Self::Success(_) => "success",
            Self::Warning(_) => "warning",
            Self::Note(_) => "note",
        }
    }

    fn payload(&self) -> Value {
        match self {
            Self::Header { version } => json!({ "app": "floatarb", "version": version }),
            Self::Section(title) => json!({ "title": title }),
            Self::Field { label, value } => json!({ "label": label, "value": value }),
            Self::Success(message) | Self::Warning(message) | Self::Note(message) => {
                json!({ "message": message })
            }
        }
    }

    /// Warnings survive `--quiet`.
    const fn is_essential(&self) -> bool {
        matches!(self, Self::Warning(_))
    }

    fn render(&self) -> String {
        match self {
            Self::Header { version } => format!("{} {}", "floatarb".bold(), version.dimmed()),
            Self::Section(title) => format!("\n{}", title.bold()),
            Self::Field { label, value } => format!("  {:<12} {value}", label.dimmed()),
            Self::Success(message) => format!("  {} {message}", "✓".green()),
            Self::Warning(message) => format!("  {} {message}", "⚠".yellow()),
            Self::Note(message) => format!("  {}", message.dimmed()),
        }
    }
}

fn emit(line: &Line<'_>) {
    let mode = mode();
    if mode.json {
        emit_json_line(line.kind(), line.payload());
    } else if !mode.quiet || line.is_essential() {
        println!("{}", line.render());
    }
}

/// Print one `{"type", "payload"}` object on stdout.
pub fn emit_json_line(kind: &str, payload: Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

pub fn header(version: &str) {
    emit(&Line::Header { version });
}

pub fn section(title: &str) {
    emit(&Line::Section(title));
}

pub fn field(label: &str, value: impl Display) {
    emit(&Line::Field {
        label,
        value: value.to_string(),
    });
}

pub fn success(message: &str) {
    emit(&Line::Success(message));
}

pub fn warning(message: &str) {
    emit(&Line::Warning(message));
}

pub fn note(message: &str) {
    emit(&Line::Note(message));
}

/// Errors always go to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {message}", "×".red());
    }
}

/// Print a rendered `tabled` table. JSON mode emits rows separately.
pub fn table(rendered: &str) {
    if is_json() {
        return;
    }
    for line in rendered.lines() {
        println!("  {line}");
    }
}

/// Green in human mode, plain in JSON mode.
pub fn positive(value: impl Display) -> String {
    paint(value, |v| v.green().to_string())
}

/// Cyan in human mode, plain in JSON mode.
pub fn highlight(value: impl Display) -> String {
    paint(value, |v| v.cyan().to_string())
}

fn paint(value: impl Display, color: impl FnOnce(&str) -> String) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        color(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_payload_stringifies_values() {
        let line = Line::Field {
            label: "Threshold",
            value: 15.to_string(),
        };
        assert_eq!(line.kind(), "field");
        assert_eq!(line.payload(), json!({ "label": "Threshold", "value": "15" }));
    }

    #[test]
    fn only_warnings_survive_quiet() {
        assert!(Line::Warning("w").is_essential());
        assert!(!Line::Note("n").is_essential());
        assert!(!Line::Section("s").is_essential());
    }
}
