//! Table and JSON output for CLI commands.
//!
//! In JSON mode every line written to stdout or stderr is a JSON value so
//! the output can be piped into other tools.

use serde::Serialize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print rows, or `empty` when there are none (table mode only).
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat, empty: &str) {
    match format {
        OutputFormat::Table if items.is_empty() => println!("{empty}"),
        OutputFormat::Table => println!("{}", Table::new(items).with(Style::rounded())),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print the outcome of a command.
pub fn print_success(msg: &str, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("✓ {msg}"),
        OutputFormat::Json => println!("{}", json!({ "status": "ok", "message": msg })),
    }
}

/// Print a failure to stderr.
pub fn print_error(msg: &str, format: OutputFormat) {
    match format {
        OutputFormat::Table => eprintln!("✗ {msg}"),
        OutputFormat::Json => eprintln!("{}", json!({ "status": "error", "message": msg })),
    }
}

/// Print an aligned `key: value` line.
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<12} {value}", format!("{key}:"));
}
