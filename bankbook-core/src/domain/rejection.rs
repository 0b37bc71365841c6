//! Reasons a command can be rejected

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why the ledger refused a command
///
/// A rejection leaves the account untouched. The message is what the user
/// should see; `code` is stable for scripts and logs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "kebab-case")]
pub enum Rejection {
    #[error("Enter a valid amount")]
    InvalidAmount,

    #[error("Insufficient funds!")]
    InsufficientFunds,

    #[error("Loan amount exceeds ${limit}. Please contact the branch.")]
    LoanLimitExceeded { limit: Decimal },

    #[error("Loan already taken. Repay it before taking another.")]
    LoanAlreadyActive,

    #[error("No active loan to repay.")]
    NoActiveLoan,

    #[error("Insufficient balance to repay the loan.")]
    InsufficientFundsForRepayment,
}

impl Rejection {
    /// Stable reason code
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::InvalidAmount => "invalid-amount",
            Rejection::InsufficientFunds => "insufficient-funds",
            Rejection::LoanLimitExceeded { .. } => "loan-limit-exceeded",
            Rejection::LoanAlreadyActive => "loan-already-active",
            Rejection::NoActiveLoan => "no-active-loan",
            Rejection::InsufficientFundsForRepayment => "insufficient-funds-for-repayment",
        }
    }

    /// User-facing message with money rendered in `symbol`
    ///
    /// `Display` uses `$`.
    pub fn message(&self, symbol: &str) -> String {
        match self {
            Rejection::LoanLimitExceeded { limit } => format!(
                "Loan amount exceeds {}{}. Please contact the branch.",
                symbol, limit
            ),
            other => other.to_string(),
        }
    }
}
