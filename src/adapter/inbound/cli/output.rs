//! Terminal output for CLI handlers.
//!
//! Human-readable lines by default; with `--json` every line is one JSON
//! object `{"type": ..., "payload": ...}` on stdout.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::json;

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn current() -> OutputConfig {
    *OUTPUT_CONFIG
        .get_or_init(|| RwLock::new(OutputConfig::default()))
        .read()
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    *OUTPUT_CONFIG
        .get_or_init(|| RwLock::new(OutputConfig::default()))
        .write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

/// Print a section header.
pub fn section(title: &str) {
    let config = current();
    if config.json {
        emit_json_line("section", json!({ "title": title }));
    } else if !config.quiet {
        println!("{}", title.bold());
    }
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = current();
    let value = value.to_string();
    if config.json {
        emit_json_line("field", json!({ "label": label, "value": value }));
    } else if !config.quiet {
        println!("  {:<12} {}", label.dimmed(), value);
    }
}

pub fn success(message: &str) {
    let config = current();
    if config.json {
        emit_json_line("success", json!({ "message": message }));
    } else if !config.quiet {
        println!("  {} {}", "✓".green(), message);
    }
}

pub fn warning(message: &str) {
    if is_json() {
        emit_json_line("warning", json!({ "message": message }));
    } else {
        println!("  {} {}", "⚠".yellow(), message);
    }
}

/// Print an error line to stderr. Never suppressed.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}
