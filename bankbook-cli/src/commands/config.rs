//! Config command - show and change settings.json

use std::path::Path;

use anyhow::Result;
use bankbook_core::config::Config;
use bankbook_core::domain::format_money;
use clap::{Subcommand, ValueEnum};
use colored::Colorize;

use super::get_bankbook_dir;
use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Largest loan the ledger grants
    LoanLimit,
    /// Symbol shown before amounts
    Currency,
    /// Record session events in logs.duckdb
    Logging,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change one setting
    Set {
        key: ConfigKey,
        value: String,
    },
}

/// Apply `key = value` to the settings in `bankbook_dir` and save them
pub fn set_value(bankbook_dir: &Path, key: ConfigKey, value: &str) -> Result<Config> {
    let mut config = Config::load(bankbook_dir)?;
    match key {
        ConfigKey::LoanLimit => config.set_loan_limit(value)?,
        ConfigKey::Currency => config.set_currency_symbol(value)?,
        ConfigKey::Logging => config.set_logging_enabled(value)?,
    }
    config.save(bankbook_dir)?;
    Ok(config)
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let bankbook_dir = get_bankbook_dir()?;
    std::fs::create_dir_all(&bankbook_dir)?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&bankbook_dir)?;
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "loan_limit": config.loan_limit,
                        "currency_symbol": config.currency_symbol,
                        "logging_enabled": config.logging_enabled,
                    })
                );
                return Ok(());
            }

            println!("{}", "Settings".bold());
            println!(
                "  Loan limit: {}",
                format_money(config.loan_limit, &config.currency_symbol)
            );
            println!("  Currency symbol: {}", config.currency_symbol);
            println!("  Logging: {}", if config.logging_enabled { "on" } else { "off" });
        }
        ConfigCommands::Set { key, value } => {
            set_value(&bankbook_dir, key, &value)?;
            output::success(&format!("Saved {:?} = {}", key, value.trim()));
        }
    }

    Ok(())
}
