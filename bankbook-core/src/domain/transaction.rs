//! Transaction history records

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What a committed transaction did to the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Loan,
    RepayLoan,
}

impl TransactionKind {
    /// Label shown in the history list
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdraw => "Withdraw",
            TransactionKind::Loan => "Loan",
            TransactionKind::RepayLoan => "Repay Loan",
        }
    }

    /// Whether this kind adds money to the balance
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::Loan)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An immutable record of a successfully applied command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    kind: TransactionKind,
    amount: Decimal,
}

impl Transaction {
    pub(crate) fn new(kind: TransactionKind, amount: Decimal) -> Self {
        Self { kind, amount }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Amount with the sign it contributes to the balance
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_history_display() {
        assert_eq!(TransactionKind::Deposit.to_string(), "Deposit");
        assert_eq!(TransactionKind::Withdraw.to_string(), "Withdraw");
        assert_eq!(TransactionKind::Loan.to_string(), "Loan");
        assert_eq!(TransactionKind::RepayLoan.to_string(), "Repay Loan");
    }

    #[test]
    fn test_signed_amount() {
        let amount = Decimal::new(2550, 2);
        assert_eq!(Transaction::new(TransactionKind::Loan, amount).signed_amount(), amount);
        assert_eq!(
            Transaction::new(TransactionKind::RepayLoan, amount).signed_amount(),
            -amount
        );
    }
}
