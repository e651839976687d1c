//! Terminal output formatting.
//!
//! Provides consistent terminal output with support for JSON mode (for
//! scripting), quiet mode, and verbosity levels.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
    /// Emit ANSI styling.
    pub color: bool,
}

impl OutputConfig {
    /// Create a new output configuration.
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8, color: bool) -> Self {
        Self {
            json,
            quiet,
            verbose,
            color,
        }
    }
}

/// Global output configuration singleton.
static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Apply `style` only when color output is enabled.
fn paint(config: OutputConfig, text: &str, style: fn(&str) -> String) -> String {
    if config.color && !config.json {
        style(text)
    } else {
        text.to_string()
    }
}

/// Check if regular (non-JSON) output should be suppressed.
fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

/// Apply output settings from global CLI flags.
///
/// Call this early in the CLI entry point.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Return whether machine-readable JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Return whether quiet mode is enabled.
#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Return the global verbosity level from `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    read_config().verbose
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    println!(
        "{} {}",
        paint(config, "waterfill", |s| s.bold().to_string()),
        paint(config, version, |s| s.dimmed().to_string())
    );
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    let label = format!("{label:<14}");
    println!(
        "  {} {}",
        paint(config, &label, |s| s.dimmed().to_string()),
        value
    );
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}", paint(config, "✓", |s| s.green().to_string()), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    let config = read_config();
    if config.json {
        return;
    }

    println!("  {} {}", paint(config, "⚠", |s| s.yellow().to_string()), message);
}

/// Print an error line.
pub fn error(message: &str) {
    let config = read_config();
    if config.json {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }

    eprintln!("  {} {}", paint(config, "×", |s| s.red().to_string()), message);
}

/// Print a section header.
pub fn section(title: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    println!();
    println!("{}", paint(config, title, |s| s.bold().to_string()));
}

/// Print a note/hint.
pub fn note(message: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    println!("  {}", paint(config, message, |s| s.dimmed().to_string()));
}

/// Print pre-rendered multi-line text (tables, plots) as-is.
pub fn block(text: &str) {
    let config = read_config();
    if config.json || regular_output_suppressed(config) {
        return;
    }

    for line in text.lines() {
        println!("  {line}");
    }
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    paint(read_config(), &value.to_string(), |s| s.cyan().to_string())
}

/// Format a dimmed/muted value.
pub fn muted(value: impl Display) -> String {
    paint(read_config(), &value.to_string(), |s| s.dimmed().to_string())
}

/// Print a single JSON document to stdout.
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}
