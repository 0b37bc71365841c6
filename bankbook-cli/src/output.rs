//! Output formatting utilities

use bankbook_core::domain::{format_money, AccountState, ApplyOutcome, Command};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, ContentArrangement, Table};

pub fn success(msg: &str) {
    println!("{}", msg.green());
}

pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Balance and loan status, like the header of the account page
pub fn print_status(state: &AccountState, symbol: &str) {
    println!(
        "Balance: {}",
        format_money(state.balance(), symbol).green().bold()
    );
    println!(
        "{}",
        format!("Loan Status: {}", state.loan_status().describe(symbol)).dimmed()
    );
}

pub fn print_history(state: &AccountState, symbol: &str) {
    println!("{}", "Transactions".bold());
    if state.transactions().is_empty() {
        println!("No transactions yet.");
        return;
    }

    let mut table = create_table();
    table.set_header(vec!["#", "Type", "Amount"]);
    for (i, tx) in state.transactions().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(tx.kind().label()),
            Cell::new(format_money(tx.amount(), symbol)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

/// One line of feedback for an applied command
pub fn print_outcome(command: &Command, outcome: &ApplyOutcome, symbol: &str) {
    match outcome.reason() {
        Some(reason) => error(&reason.message(symbol)),
        None => {
            let verb = match command {
                Command::Deposit(_) => "Deposited",
                Command::Withdraw(_) => "Withdrew",
                Command::Loan(_) => "Borrowed",
                Command::RepayLoan => "Repaid",
            };
            let amount = outcome
                .state()
                .transactions()
                .last()
                .map(|tx| format_money(tx.amount(), symbol))
                .unwrap_or_default();
            success(&format!(
                "{} {}. Balance: {}",
                verb,
                amount,
                format_money(outcome.state().balance(), symbol)
            ));
        }
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
