//! Bankbook Core - a toy bank account ledger
//!
//! - **domain**: account snapshot, commands, rejections and the transition rules
//! - **services**: single-writer ledger and event logging
//! - **config**: settings.json and environment overrides

pub mod domain;
pub mod services;
pub mod config;
mod log_migrations;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use config::Config;

pub use domain::result::{Error, OperationResult};
pub use domain::{
    AccountState, AccountSummary, ApplyOutcome, Command, LedgerPolicy, LoanStatus, Rejection,
    Transaction, TransactionKind,
};
pub use services::{EntryPoint, LedgerService, LogEvent, LoggingService};

/// Everything a session needs: configuration, the ledger and the event log
///
/// The account itself lives only as long as the context.
pub struct BankbookContext {
    pub config: Config,
    pub ledger: LedgerService,
    pub logger: Option<Arc<LoggingService>>,
}

impl BankbookContext {
    /// Create a context rooted at the bankbook directory
    ///
    /// A log database that cannot be opened disables logging instead of
    /// failing the session.
    pub fn new(bankbook_dir: &Path, entry_point: EntryPoint) -> Result<Self> {
        let config = Config::load(bankbook_dir)?;

        let logger = if config.logging_enabled {
            LoggingService::new(bankbook_dir, entry_point, env!("CARGO_PKG_VERSION"))
                .ok()
                .map(Arc::new)
        } else {
            None
        };

        let mut ledger = LedgerService::new(config.policy());
        if let Some(logger) = &logger {
            ledger = ledger.with_logger(Arc::clone(logger));
        }

        Ok(Self {
            config,
            ledger,
            logger,
        })
    }

    /// Record an event, ignoring failures
    pub fn log(&self, event: LogEvent) {
        if let Some(logger) = &self.logger {
            let _ = logger.log(event);
        }
    }
}
