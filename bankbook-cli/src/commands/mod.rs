//! CLI command implementations

pub mod config;
pub mod logs;
pub mod replay;
pub mod session;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use bankbook_core::{BankbookContext, EntryPoint, LoggingService};

/// Get the bankbook directory from environment or default
pub fn get_bankbook_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BANKBOOK_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".bankbook"))
        .ok_or_else(|| anyhow!("Could not find home directory, set BANKBOOK_DIR"))
}

/// Create a fresh session context
pub fn get_context(entry_point: EntryPoint) -> Result<BankbookContext> {
    let bankbook_dir = get_bankbook_dir()?;

    std::fs::create_dir_all(&bankbook_dir)
        .with_context(|| format!("Failed to create bankbook directory: {:?}", bankbook_dir))?;

    BankbookContext::new(&bankbook_dir, entry_point)
        .context("Failed to initialize bankbook context")
}

/// Open the event log for the `logs` commands
pub fn get_logging_service() -> Result<LoggingService> {
    let bankbook_dir = get_bankbook_dir()?;
    std::fs::create_dir_all(&bankbook_dir)?;
    LoggingService::new(&bankbook_dir, EntryPoint::Session, env!("CARGO_PKG_VERSION"))
}
