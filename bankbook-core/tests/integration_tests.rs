//! Integration tests for bankbook-core
//!
//! Ledger properties are checked over every command sequence up to a fixed
//! length. Logging and config tests use a real DuckDB file in a temp dir.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::sync::Arc;

use rust_decimal::Decimal;
use tempfile::TempDir;

use bankbook_core::config::Config;
use bankbook_core::domain::{AccountState, Command, Rejection, TransactionKind};
use bankbook_core::services::{EntryPoint, LedgerService, LoggingService};
use bankbook_core::{BankbookContext, Error};

// ============================================================================
// Test Helpers
// ============================================================================

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

/// Commands mixing valid, invalid and boundary amounts
fn command_pool() -> Vec<Command> {
    vec![
        Command::Deposit(dec(100)),
        Command::Deposit(dec(0)),
        Command::Withdraw(dec(60)),
        Command::Withdraw(dec(150)),
        Command::Loan(dec(5000)),
        Command::Loan(dec(5001)),
        Command::Loan(Decimal::new(2550, 2)),
        Command::RepayLoan,
    ]
}

/// Every sequence of `len` commands drawn from the pool
fn sequences(len: usize) -> Vec<Vec<Command>> {
    let pool = command_pool();
    let mut out = vec![Vec::new()];
    for _ in 0..len {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                pool.iter().map(move |cmd| {
                    let mut next = prefix.clone();
                    next.push(*cmd);
                    next
                })
            })
            .collect();
    }
    out
}

fn create_logger(temp_dir: &TempDir) -> LoggingService {
    LoggingService::new(temp_dir.path(), EntryPoint::Library, "test")
        .expect("Failed to create logging service")
}

// ============================================================================
// Ledger Properties
// ============================================================================

#[test]
fn test_invariants_hold_for_all_short_sequences() {
    for seq in sequences(4) {
        let mut state = AccountState::new();
        let mut accepted = 0;

        for cmd in &seq {
            let before = state.clone();
            let outcome = state.apply(*cmd);

            if outcome.is_rejected() {
                assert!(outcome.reason().is_some());
                assert_eq!(outcome.state(), &before, "rejected {} changed state", cmd);
            } else {
                accepted += 1;
                assert_eq!(
                    outcome.state().transactions().len(),
                    before.transactions().len() + 1
                );
            }
            state = outcome.into_state();

            let running: Decimal = state.transactions().iter().map(|t| t.signed_amount()).sum();
            assert_eq!(state.balance(), running, "sequence {:?}", seq);
            assert!(state.balance() >= Decimal::ZERO, "sequence {:?}", seq);
            assert_eq!(state.has_loan(), state.loan_amount() > Decimal::ZERO);
            assert!(state.transactions().iter().all(|t| t.amount() > Decimal::ZERO));
        }

        assert_eq!(state.transactions().len(), accepted);
    }
}

#[test]
fn test_loan_and_repay_rejections_never_change_state() {
    for seq in sequences(3) {
        let state = seq
            .iter()
            .fold(AccountState::new(), |s, cmd| s.apply(*cmd).into_state());

        if state.has_loan() {
            let outcome = state.apply(Command::Loan(dec(1)));
            assert_eq!(outcome.reason(), Some(Rejection::LoanAlreadyActive));
            assert_eq!(outcome.state(), &state);
        } else {
            let outcome = state.apply(Command::RepayLoan);
            assert_eq!(outcome.reason(), Some(Rejection::NoActiveLoan));
            assert_eq!(outcome.state(), &state);
        }
    }
}

#[test]
fn test_full_walkthrough() {
    let state = AccountState::new();

    let state = state.apply(Command::Deposit(dec(100))).into_state();
    assert_eq!(state.balance(), dec(100));

    let outcome = state.apply(Command::Withdraw(dec(150)));
    assert_eq!(outcome.reason(), Some(Rejection::InsufficientFunds));
    let state = outcome.into_state();
    assert_eq!(state.balance(), dec(100));
    assert_eq!(state.transactions().len(), 1);

    let state = state.apply(Command::Loan(dec(5000))).into_state();
    assert_eq!(state.balance(), dec(5100));
    assert_eq!(state.loan_amount(), dec(5000));

    let outcome = state.apply(Command::Loan(dec(100)));
    assert_eq!(outcome.reason(), Some(Rejection::LoanAlreadyActive));

    let state = outcome.into_state().apply(Command::RepayLoan).into_state();
    assert_eq!(state.balance(), dec(100));
    assert!(!state.has_loan());
    assert_eq!(state.loan_amount(), Decimal::ZERO);

    let kinds: Vec<TransactionKind> = state.transactions().iter().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TransactionKind::Deposit,
            TransactionKind::Loan,
            TransactionKind::RepayLoan
        ]
    );
    assert_eq!(state.transactions()[2].amount(), dec(5000));
}

// ============================================================================
// Logging
// ============================================================================

#[test]
fn test_ledger_logs_commands_without_amounts() {
    let temp_dir = TempDir::new().unwrap();
    let logger = Arc::new(create_logger(&temp_dir));
    let ledger = LedgerService::default().with_logger(Arc::clone(&logger));

    ledger.apply(Command::Deposit(dec(100)));
    ledger.apply(Command::Withdraw(dec(150)));
    ledger.apply(Command::RepayLoan);

    assert_eq!(logger.count().unwrap(), 3);

    let errors = logger.get_errors(10).unwrap();
    assert_eq!(errors.len(), 2);
    let mut reasons: Vec<String> = errors.iter().filter_map(|e| e.reason.clone()).collect();
    reasons.sort();
    assert_eq!(reasons, vec!["insufficient-funds", "no-active-loan"]);

    let recent = logger.get_recent(10).unwrap();
    assert!(recent.iter().any(|e| e.event == "command_applied"
        && e.command.as_deref() == Some("deposit")));
    assert!(recent.iter().all(|e| e.entry_point == "library"));
    for entry in &recent {
        let text = format!("{:?}{:?}", entry.command, entry.reason);
        assert!(!text.chars().any(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_logging_reopen_keeps_entries() {
    let temp_dir = TempDir::new().unwrap();
    {
        let logger = create_logger(&temp_dir);
        logger.log_event("session_started").unwrap();
        logger
            .log_error("replay_failed", "bad line", Some("line 3"))
            .unwrap();
    }

    let logger = create_logger(&temp_dir);
    assert_eq!(logger.count().unwrap(), 2);
    assert_eq!(logger.get_errors(10).unwrap().len(), 1);
    assert!(logger.db_path().ends_with("logs.duckdb"));
}

#[test]
fn test_delete_before() {
    let temp_dir = TempDir::new().unwrap();
    let logger = create_logger(&temp_dir);
    logger.log_event("one").unwrap();
    logger.log_event("two").unwrap();

    assert_eq!(logger.delete_before(0).unwrap(), 0);
    assert_eq!(logger.delete_before(i64::MAX).unwrap(), 2);
    assert_eq!(logger.count().unwrap(), 0);
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_round_trip_preserves_unknown_keys() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("settings.json"),
        r#"{"ledger": {"loanLimit": "750", "theme": "dark"}, "extra": 1}"#,
    )
    .unwrap();

    let mut config = Config::load(temp_dir.path()).unwrap();
    assert_eq!(config.loan_limit, dec(750));
    assert_eq!(config.currency_symbol, "$");

    config.currency_symbol = "€".to_string();
    config.save(temp_dir.path()).unwrap();

    let content = std::fs::read_to_string(temp_dir.path().join("settings.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["extra"], 1);
    assert_eq!(value["ledger"]["theme"], "dark");
    assert_eq!(value["ledger"]["currencySymbol"], "€");

    let reloaded = Config::load(temp_dir.path()).unwrap();
    assert_eq!(reloaded.currency_symbol, "€");
    assert_eq!(reloaded.loan_limit, dec(750));
}

#[test]
fn test_config_rejects_malformed_settings() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("settings.json"), "{ not json").unwrap();
    let err = Config::load(temp_dir.path()).unwrap_err();
    assert!(matches!(err, Error::Json(_)), "got {:?}", err);
}

#[test]
fn test_config_unreadable_settings_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join("settings.json")).unwrap();
    let err = Config::load(temp_dir.path()).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {:?}", err);
}

#[test]
fn test_config_saved_limit_applies_to_next_context() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::load(temp_dir.path()).unwrap();
    config.set_loan_limit("120").unwrap();
    config.set_logging_enabled("false").unwrap();
    config.save(temp_dir.path()).unwrap();

    let ctx = BankbookContext::new(temp_dir.path(), EntryPoint::Library).unwrap();
    assert_eq!(ctx.ledger.policy().loan_limit, dec(120));
    assert!(ctx.ledger.apply(Command::Loan(dec(121))).is_rejected());
}

#[test]
fn test_context_uses_configured_loan_limit() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("settings.json"),
        r#"{"ledger": {"loanLimit": 300}, "logging": {"enabled": false}}"#,
    )
    .unwrap();

    let ctx = BankbookContext::new(temp_dir.path(), EntryPoint::Library).unwrap();
    assert!(ctx.logger.is_none());

    let outcome = ctx.ledger.apply(Command::Loan(dec(301)));
    assert_eq!(
        outcome.reason(),
        Some(Rejection::LoanLimitExceeded { limit: dec(300) })
    );
    assert!(!ctx.ledger.apply(Command::Loan(dec(300))).is_rejected());
}
