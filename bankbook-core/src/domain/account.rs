//! Account state and the transition rules applied to it

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::command::Command;
use super::rejection::Rejection;
use super::transaction::{Transaction, TransactionKind};

/// Largest loan the branch hands out without a visit
pub const DEFAULT_LOAN_LIMIT: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Tunable rules the ledger enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerPolicy {
    pub loan_limit: Decimal,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            loan_limit: DEFAULT_LOAN_LIMIT,
        }
    }
}

/// Loan sub-state of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "amount", rename_all = "snake_case")]
pub enum LoanStatus {
    NoLoan,
    Active(Decimal),
}

impl LoanStatus {
    /// "No Loan" or "Active ($5000.00)" with the given currency symbol
    pub fn describe(&self, symbol: &str) -> String {
        match self {
            LoanStatus::NoLoan => "No Loan".to_string(),
            LoanStatus::Active(amount) => format!("Active ({})", format_money(*amount, symbol)),
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe("$"))
    }
}

/// Render an amount with two decimals, e.g. `$100.00`
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    format!("{}{:.2}", symbol, amount)
}

/// Immutable snapshot of the account
///
/// Every accepted command produces a new snapshot; the previous one is left
/// as it was. Fields are read-only so the loan invariant
/// (`loan_amount > 0` exactly when `has_loan`) cannot be broken from outside.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AccountState {
    balance: Decimal,
    has_loan: bool,
    loan_amount: Decimal,
    transactions: Vec<Transaction>,
}

impl AccountState {
    /// Fresh account: zero balance, no loan, empty history
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn has_loan(&self) -> bool {
        self.has_loan
    }

    pub fn loan_amount(&self) -> Decimal {
        self.loan_amount
    }

    /// Committed transactions in the order they were applied
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn loan_status(&self) -> LoanStatus {
        if self.has_loan {
            LoanStatus::Active(self.loan_amount)
        } else {
            LoanStatus::NoLoan
        }
    }

    /// Apply a command under the default policy
    pub fn apply(&self, command: Command) -> ApplyOutcome {
        self.apply_with(&LedgerPolicy::default(), command)
    }

    /// Apply a command, returning the next snapshot or the reason it was refused
    ///
    /// Never fails: a rejected command yields an outcome holding a copy of
    /// this state unchanged.
    pub fn apply_with(&self, policy: &LedgerPolicy, command: Command) -> ApplyOutcome {
        match self.transition(policy, command) {
            Ok(next) => ApplyOutcome::accepted(next),
            Err(reason) => ApplyOutcome::rejected(self.clone(), reason),
        }
    }

    fn transition(
        &self,
        policy: &LedgerPolicy,
        command: Command,
    ) -> Result<AccountState, Rejection> {
        match command {
            Command::Deposit(amount) => {
                ensure_positive(amount)?;
                let balance = self
                    .balance
                    .checked_add(amount)
                    .ok_or(Rejection::InvalidAmount)?;
                Ok(self.commit(balance, self.loan_amount, TransactionKind::Deposit, amount))
            }
            Command::Withdraw(amount) => {
                ensure_positive(amount)?;
                if self.balance < amount {
                    return Err(Rejection::InsufficientFunds);
                }
                Ok(self.commit(
                    self.balance - amount,
                    self.loan_amount,
                    TransactionKind::Withdraw,
                    amount,
                ))
            }
            Command::Loan(amount) => {
                ensure_positive(amount)?;
                if amount > policy.loan_limit {
                    return Err(Rejection::LoanLimitExceeded {
                        limit: policy.loan_limit,
                    });
                }
                if self.has_loan {
                    return Err(Rejection::LoanAlreadyActive);
                }
                let balance = self
                    .balance
                    .checked_add(amount)
                    .ok_or(Rejection::InvalidAmount)?;
                Ok(self.commit(balance, amount, TransactionKind::Loan, amount))
            }
            Command::RepayLoan => {
                if !self.has_loan {
                    return Err(Rejection::NoActiveLoan);
                }
                if self.balance < self.loan_amount {
                    return Err(Rejection::InsufficientFundsForRepayment);
                }
                Ok(self.commit(
                    self.balance - self.loan_amount,
                    Decimal::ZERO,
                    TransactionKind::RepayLoan,
                    self.loan_amount,
                ))
            }
        }
    }

    fn commit(
        &self,
        balance: Decimal,
        loan_amount: Decimal,
        kind: TransactionKind,
        amount: Decimal,
    ) -> AccountState {
        let mut transactions = Vec::with_capacity(self.transactions.len() + 1);
        transactions.extend_from_slice(&self.transactions);
        transactions.push(Transaction::new(kind, amount));

        AccountState {
            balance,
            has_loan: loan_amount > Decimal::ZERO,
            loan_amount,
            transactions,
        }
    }

    /// Header view of the account, money rendered with `symbol`
    pub fn summary(&self, symbol: &str) -> AccountSummary {
        AccountSummary {
            balance: self.balance,
            has_loan: self.has_loan,
            loan_amount: self.loan_amount,
            loan_status: self.loan_status().describe(symbol),
            transaction_count: self.transactions.len(),
        }
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), Rejection> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(Rejection::InvalidAmount)
    }
}

/// Result of applying one command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    state: AccountState,
    rejected: bool,
    reason: Option<Rejection>,
}

impl ApplyOutcome {
    fn accepted(state: AccountState) -> Self {
        Self {
            state,
            rejected: false,
            reason: None,
        }
    }

    fn rejected(state: AccountState, reason: Rejection) -> Self {
        Self {
            state,
            rejected: true,
            reason: Some(reason),
        }
    }

    /// The snapshot to hold from now on (unchanged if rejected)
    pub fn state(&self) -> &AccountState {
        &self.state
    }

    pub fn into_state(self) -> AccountState {
        self.state
    }

    pub fn is_rejected(&self) -> bool {
        self.rejected
    }

    pub fn reason(&self) -> Option<Rejection> {
        self.reason
    }
}

/// Account header: balance and loan status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub balance: Decimal,
    pub has_loan: bool,
    pub loan_amount: Decimal,
    pub loan_status: String,
    pub transaction_count: usize,
}
