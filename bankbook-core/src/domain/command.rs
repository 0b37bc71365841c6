//! Commands accepted by the account ledger

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

const INVALID_AMOUNT: &str = "Enter a valid amount";

/// A discrete request to change account state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum Command {
    Deposit(Decimal),
    Withdraw(Decimal),
    Loan(Decimal),
    /// Always repays the outstanding loan in full
    RepayLoan,
}

impl Command {
    /// Short name used in logs and prompts
    pub fn name(&self) -> &'static str {
        match self {
            Command::Deposit(_) => "deposit",
            Command::Withdraw(_) => "withdraw",
            Command::Loan(_) => "loan",
            Command::RepayLoan => "repay",
        }
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Command::Deposit(a) | Command::Withdraw(a) | Command::Loan(a) => Some(*a),
            Command::RepayLoan => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount() {
            Some(amount) => write!(f, "{} {}", self.name(), amount),
            None => f.write_str(self.name()),
        }
    }
}

/// Parse a user-typed amount
///
/// Only rejects text that is not a number. Sign checks belong to the ledger,
/// which reports them as rejections.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim().trim_start_matches('$');
    if trimmed.is_empty() {
        return Err(Error::parse(INVALID_AMOUNT));
    }
    Decimal::from_str(trimmed).map_err(|_| Error::parse(INVALID_AMOUNT))
}

impl FromStr for Command {
    type Err = Error;

    /// Parses `deposit 100`, `withdraw 20.5`, `loan 5000` or `repay`
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| Error::parse("empty command"))?
            .to_lowercase();
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(Error::parse(format!("too many arguments for '{}'", verb)));
        }

        let amount = || arg.ok_or_else(|| Error::parse(INVALID_AMOUNT)).and_then(parse_amount);

        match verb.as_str() {
            "deposit" => Ok(Command::Deposit(amount()?)),
            "withdraw" => Ok(Command::Withdraw(amount()?)),
            "loan" => Ok(Command::Loan(amount()?)),
            "repay" | "repay-loan" | "repay_loan" => match arg {
                None => Ok(Command::RepayLoan),
                Some(_) => Err(Error::parse("repay takes no amount, the full loan is repaid")),
            },
            other => Err(Error::parse(format!("unknown command '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100").unwrap(), Decimal::new(100, 0));
        assert_eq!(parse_amount(" 12.50 ").unwrap(), Decimal::new(1250, 2));
        assert_eq!(parse_amount("$5000").unwrap(), Decimal::new(5000, 0));
        assert_eq!(parse_amount("-3").unwrap(), Decimal::new(-3, 0));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("   ").is_err());
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "deposit 100".parse::<Command>().unwrap(),
            Command::Deposit(Decimal::new(100, 0))
        );
        assert_eq!(
            "WITHDRAW 2.5".parse::<Command>().unwrap(),
            Command::Withdraw(Decimal::new(25, 1))
        );
        assert_eq!(
            "loan 5000".parse::<Command>().unwrap(),
            Command::Loan(Decimal::new(5000, 0))
        );
        assert_eq!("repay".parse::<Command>().unwrap(), Command::RepayLoan);
    }

    #[test]
    fn test_parse_command_errors() {
        assert!("".parse::<Command>().is_err());
        assert!("deposit".parse::<Command>().is_err());
        assert!("deposit abc".parse::<Command>().is_err());
        assert!("deposit 1 2".parse::<Command>().is_err());
        assert!("repay 100".parse::<Command>().is_err());
        assert!("transfer 10".parse::<Command>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::Deposit(Decimal::new(100, 0)).to_string(), "deposit 100");
        assert_eq!(Command::RepayLoan.to_string(), "repay");
    }
}
