//! Replay command - apply a script of commands to a fresh account

use std::path::Path;

use anyhow::{Context, Result};
use bankbook_core::domain::{AccountState, Rejection, Transaction};
use bankbook_core::{BankbookContext, EntryPoint, LogEvent};
use colored::Colorize;
use serde::Serialize;

use super::get_context;
use super::session::{parse_line, SessionInput};
use crate::output;

/// A script line the ledger refused
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedLine {
    pub line: usize,
    pub command: String,
    pub reason: Rejection,
}

/// Final account and every rejected line of a replayed script
#[derive(Debug)]
pub struct ReplayReport {
    pub state: AccountState,
    pub rejected: Vec<RejectedLine>,
}

/// Apply each line of `script` to the context's ledger
///
/// Blank lines, `#` comments and view commands are skipped and `quit` ends the
/// script. Rejections are collected; a line that does not parse aborts the
/// replay.
pub fn replay_script(ctx: &BankbookContext, script: &str) -> Result<ReplayReport> {
    let mut rejected = Vec::new();

    for (index, line) in script.lines().enumerate() {
        let line_no = index + 1;
        let input = match parse_line(line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(e) => {
                ctx.log(
                    LogEvent::new("replay_failed")
                        .with_error(e.to_string())
                        .with_error_details(format!("line {}", line_no)),
                );
                return Err(e).with_context(|| format!("line {}", line_no));
            }
        };

        let command = match input {
            SessionInput::Ledger(command) => command,
            SessionInput::Reset => {
                ctx.ledger.reset();
                continue;
            }
            SessionInput::Quit => break,
            // Views only matter interactively; the report is printed at the end
            SessionInput::Status | SessionInput::History | SessionInput::Help => continue,
        };

        if let Some(reason) = ctx.ledger.apply(command).reason() {
            rejected.push(RejectedLine {
                line: line_no,
                command: command.to_string(),
                reason,
            });
        }
    }

    Ok(ReplayReport {
        state: ctx.ledger.snapshot(),
        rejected,
    })
}

#[derive(Serialize)]
struct ReplayView<'a> {
    summary: bankbook_core::AccountSummary,
    transactions: &'a [Transaction],
    rejected: &'a [RejectedLine],
}

pub fn run(file: &Path, json: bool) -> Result<()> {
    let script = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read script {:?}", file))?;

    let ctx = get_context(EntryPoint::Replay)?;
    let symbol = ctx.config.currency_symbol.as_str();
    let report = replay_script(&ctx, &script).with_context(|| format!("{:?}", file))?;
    let state = &report.state;

    if json {
        let view = ReplayView {
            summary: state.summary(symbol),
            transactions: state.transactions(),
            rejected: &report.rejected,
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    for rejected in &report.rejected {
        println!(
            "{} {}: {}",
            format!("line {}", rejected.line).dimmed(),
            rejected.command,
            rejected.reason.message(symbol).red()
        );
    }
    if !report.rejected.is_empty() {
        println!();
    }
    output::print_status(state, symbol);
    println!();
    output::print_history(state, symbol);
    if !report.rejected.is_empty() {
        println!();
        output::warning(&format!("{} command(s) rejected", report.rejected.len()));
    }

    Ok(())
}
