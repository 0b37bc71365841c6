//! Service layer
//!
//! Services wrap the pure domain with the things a running session needs:
//! a single writer over the account and the event log.

mod ledger;
pub mod logging;

pub use ledger::LedgerService;
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
