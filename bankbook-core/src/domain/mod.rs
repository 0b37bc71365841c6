//! Core domain entities
//!
//! The account snapshot, the commands that change it and the records they
//! leave behind. Pure data and transition rules, no I/O.

mod account;
mod command;
mod rejection;
mod transaction;
pub mod result;

pub use account::{
    format_money, AccountState, AccountSummary, ApplyOutcome, LedgerPolicy, LoanStatus,
    DEFAULT_LOAN_LIMIT,
};
pub use command::{parse_amount, Command};
pub use rejection::Rejection;
pub use transaction::{Transaction, TransactionKind};
