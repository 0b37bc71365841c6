//! Session command - interactive account session on stdin

use std::io::{self, BufRead, Write};

use anyhow::Result;
use bankbook_core::domain::{format_money, AccountSummary, ApplyOutcome, Command, Transaction};
use bankbook_core::{BankbookContext, EntryPoint, LogEvent, OperationResult};
use serde::Serialize;

use super::get_context;
use crate::output;

const HELP: &str = "\
Commands:
  deposit <amount>    add money to the account
  withdraw <amount>   take money out
  loan <amount>       borrow (one loan at a time)
  repay               repay the whole loan
  status              show balance and loan status
  history             list transactions
  reset               start over with a fresh account
  help                show this help
  quit                end the session";

/// One line of session input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    Ledger(Command),
    Status,
    History,
    Reset,
    Help,
    Quit,
}

/// Parse a line; blank lines and `#` comments yield `None`
pub fn parse_line(line: &str) -> bankbook_core::domain::result::Result<Option<SessionInput>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let input = match line.to_lowercase().as_str() {
        "status" | "balance" => SessionInput::Status,
        "history" | "transactions" => SessionInput::History,
        "reset" => SessionInput::Reset,
        "help" | "?" => SessionInput::Help,
        "quit" | "exit" => SessionInput::Quit,
        _ => SessionInput::Ledger(line.parse()?),
    };
    Ok(Some(input))
}

#[derive(Serialize)]
struct HistoryView<'a> {
    summary: AccountSummary,
    transactions: &'a [Transaction],
}

/// Whether the session should keep reading input
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// JSON envelope for an applied command
///
/// A rejection is `success: false` with the reason code as `error` and the
/// unchanged account as `data`.
pub fn outcome_result(outcome: &ApplyOutcome, symbol: &str) -> OperationResult<AccountSummary> {
    let summary = outcome.state().summary(symbol);
    match outcome.reason() {
        Some(reason) => OperationResult::fail_with_data(summary, reason.code()),
        None => OperationResult::ok(summary),
    }
}

/// Run one session input against the context and print the result
pub fn execute(ctx: &BankbookContext, input: SessionInput, json: bool) -> Result<Flow> {
    let symbol = ctx.config.currency_symbol.as_str();

    match input {
        SessionInput::Ledger(command) => {
            let outcome = ctx.ledger.apply(command);
            if json {
                println!("{}", serde_json::to_string(&outcome_result(&outcome, symbol))?);
            } else {
                output::print_outcome(&command, &outcome, symbol);
            }
        }
        SessionInput::Status => {
            let state = ctx.ledger.snapshot();
            if json {
                println!("{}", serde_json::to_string(&state.summary(symbol))?);
            } else {
                output::print_status(&state, symbol);
            }
        }
        SessionInput::History => {
            let state = ctx.ledger.snapshot();
            if json {
                let view = HistoryView {
                    summary: state.summary(symbol),
                    transactions: state.transactions(),
                };
                println!("{}", serde_json::to_string(&view)?);
            } else {
                output::print_history(&state, symbol);
            }
        }
        SessionInput::Reset => {
            ctx.ledger.reset();
            ctx.log(LogEvent::new("session_reset"));
            if !json {
                output::warning("Account reset.");
            }
        }
        SessionInput::Help => {
            if !json {
                output::info(HELP);
                output::info(&format!(
                    "Loan limit: {}",
                    format_money(ctx.ledger.policy().loan_limit, symbol)
                ));
            }
        }
        SessionInput::Quit => return Ok(Flow::Stop),
    }

    Ok(Flow::Continue)
}

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context(EntryPoint::Session)?;
    ctx.log(LogEvent::new("session_started"));

    let interactive = atty::is(atty::Stream::Stdin);
    if interactive && !json {
        output::info("Bank Account. Type 'help' for commands.");
        output::print_status(&ctx.ledger.snapshot(), &ctx.config.currency_symbol);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive && !json {
            print!("> ");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(input)) => {
                if execute(&ctx, input, json)? == Flow::Stop {
                    break;
                }
            }
            Err(e) => {
                if json {
                    let result: OperationResult<()> = Err(e).into();
                    println!("{}", serde_json::to_string(&result)?);
                } else {
                    output::error(&e.to_string());
                }
            }
        }
    }

    ctx.log(LogEvent::new("session_ended"));
    if interactive && !json {
        output::warning("Session ended. The account is not saved.");
    }
    Ok(())
}
