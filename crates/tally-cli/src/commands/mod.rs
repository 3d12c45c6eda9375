//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `snapshot` - Loading the snapshot and config, filter and date parsing
//! - `reports` - Table/JSON reports (summary, breakdowns, trends, merchants, compare)
//! - `charts` - Chart data commands (always JSON)

pub mod charts;
pub mod reports;
pub mod snapshot;

// Re-export command functions for main.rs
pub use charts::*;
pub use reports::*;
pub use snapshot::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Pretty-print any report structure as JSON
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
