//! Ledger service - single writer over the current account snapshot

use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{AccountState, ApplyOutcome, Command, LedgerPolicy};
use crate::services::logging::LoggingService;

/// Holds the session's account and serializes every command against it
///
/// Each `apply` runs the reducer and swaps in the new snapshot under one
/// lock, so callers sharing the service see commands one at a time.
pub struct LedgerService {
    state: Mutex<AccountState>,
    policy: LedgerPolicy,
    logger: Option<Arc<LoggingService>>,
}

impl LedgerService {
    pub fn new(policy: LedgerPolicy) -> Self {
        Self {
            state: Mutex::new(AccountState::new()),
            policy,
            logger: None,
        }
    }

    /// Record accepted and rejected commands in the event log
    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn policy(&self) -> &LedgerPolicy {
        &self.policy
    }

    // The reducer never panics mid-update, so a poisoned lock still guards a
    // whole snapshot.
    fn lock(&self) -> MutexGuard<'_, AccountState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply one command to the current account
    pub fn apply(&self, command: Command) -> ApplyOutcome {
        let mut current = self.lock();
        let outcome = current.apply_with(&self.policy, command);
        if !outcome.is_rejected() {
            *current = outcome.state().clone();
        }
        drop(current);

        self.record(&command, &outcome);
        outcome
    }

    /// Copy of the current snapshot
    pub fn snapshot(&self) -> AccountState {
        self.lock().clone()
    }

    /// Start over with a fresh account
    pub fn reset(&self) {
        *self.lock() = AccountState::new();
    }

    fn record(&self, command: &Command, outcome: &ApplyOutcome) {
        let Some(logger) = &self.logger else {
            return;
        };
        // Logging must never change the outcome of a command
        let _ = match outcome.reason() {
            Some(reason) => logger.log_rejection(command, &reason),
            None => logger.log_command(command),
        };
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new(LedgerPolicy::default())
    }
}
