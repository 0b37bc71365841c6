//! Configuration management
//!
//! Settings live in `settings.json` inside the bankbook directory:
//! ```json
//! {
//!   "ledger": { "loanLimit": "5000", "currencySymbol": "$" },
//!   "logging": { "enabled": true }
//! }
//! ```
//! Keys the CLI does not manage are kept when saving.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::{LedgerPolicy, DEFAULT_LOAN_LIMIT};

const SETTINGS_FILE: &str = "settings.json";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    ledger: LedgerSettings,
    #[serde(default)]
    logging: LoggingSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    loan_limit: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency_symbol: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoggingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
}

/// Bankbook configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub loan_limit: Decimal,
    pub currency_symbol: String,
    pub logging_enabled: bool,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loan_limit: DEFAULT_LOAN_LIMIT,
            currency_symbol: "$".to_string(),
            logging_enabled: true,
            _raw_settings: SettingsFile::default(),
        }
    }
}

fn parse_loan_limit(value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|_| Error::config(format!("loan limit is not a number: {}", value)))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "true" | "1" | "yes" | "TRUE" | "YES" => Some(true),
        "false" | "0" | "no" | "FALSE" | "NO" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load config from the bankbook directory
    ///
    /// Environment variables win over the file:
    /// `BANKBOOK_LOAN_LIMIT` and `BANKBOOK_LOGGING`.
    pub fn load(bankbook_dir: &Path) -> Result<Self> {
        let settings_path = bankbook_dir.join(SETTINGS_FILE);

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content)?
        } else {
            SettingsFile::default()
        };

        let loan_limit = match std::env::var("BANKBOOK_LOAN_LIMIT") {
            Ok(value) => parse_loan_limit(&value)?,
            Err(_) => raw.ledger.loan_limit.unwrap_or(DEFAULT_LOAN_LIMIT),
        };
        if loan_limit <= Decimal::ZERO {
            return Err(Error::config("loan limit must be positive"));
        }

        let logging_enabled = std::env::var("BANKBOOK_LOGGING")
            .ok()
            .as_deref()
            .and_then(parse_flag)
            .or(raw.logging.enabled)
            .unwrap_or(true);

        Ok(Self {
            loan_limit,
            currency_symbol: raw
                .ledger
                .currency_symbol
                .clone()
                .unwrap_or_else(|| "$".to_string()),
            logging_enabled,
            _raw_settings: raw,
        })
    }

    /// Save config to the bankbook directory
    /// Preserves other settings that the CLI doesn't manage
    pub fn save(&self, bankbook_dir: &Path) -> Result<()> {
        let settings_path = bankbook_dir.join(SETTINGS_FILE);

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            self._raw_settings.clone()
        };

        settings.ledger.loan_limit = Some(self.loan_limit);
        settings.ledger.currency_symbol = Some(self.currency_symbol.clone());
        settings.logging.enabled = Some(self.logging_enabled);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Set the loan limit from user text
    pub fn set_loan_limit(&mut self, value: &str) -> Result<()> {
        let limit = parse_loan_limit(value)?;
        if limit <= Decimal::ZERO {
            return Err(Error::config("loan limit must be positive"));
        }
        self.loan_limit = limit;
        Ok(())
    }

    pub fn set_currency_symbol(&mut self, symbol: &str) -> Result<()> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(Error::config("currency symbol cannot be empty"));
        }
        self.currency_symbol = symbol.to_string();
        Ok(())
    }

    pub fn set_logging_enabled(&mut self, value: &str) -> Result<()> {
        self.logging_enabled = parse_flag(value.trim())
            .ok_or_else(|| Error::config(format!("expected true or false, got '{}'", value)))?;
        Ok(())
    }

    /// Rules handed to the ledger
    pub fn policy(&self) -> LedgerPolicy {
        LedgerPolicy {
            loan_limit: self.loan_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("yes"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_setters_validate() {
        let mut config = Config::default();
        config.set_loan_limit(" 250 ").unwrap();
        assert_eq!(config.policy().loan_limit, Decimal::new(250, 0));
        assert!(config.set_loan_limit("0").is_err());
        assert!(config.set_loan_limit("lots").is_err());
        assert_eq!(config.loan_limit, Decimal::new(250, 0));

        config.set_currency_symbol("€").unwrap();
        assert_eq!(config.currency_symbol, "€");
        assert!(config.set_currency_symbol("  ").is_err());

        config.set_logging_enabled("no").unwrap();
        assert!(!config.logging_enabled);
        assert!(config.set_logging_enabled("sometimes").is_err());
    }

    #[test]
    fn test_default_policy() {
        let config = Config::default();
        assert_eq!(config.policy().loan_limit, Decimal::new(5000, 0));
        assert_eq!(config.currency_symbol, "$");
        assert!(config.logging_enabled);
    }
}
