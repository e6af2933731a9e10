// Bank Ledger - Core Library
// Customers, checking/savings accounts, ledgers and statements.
// Exposes all modules for use in the CLI, the terminal UI, and tests.
//
// The library never logs or prints; callers decide what to show.

pub mod cpf;
pub mod error;
pub mod entities;
pub mod statement;
pub mod reconciliation;
pub mod config;
pub mod export;

// Re-export commonly used types
pub use error::{BankError, BankResult};
pub use entities::{
    Account, AccountKind, Bank, Customer, Direction, LedgerEntry, SAVINGS_MONTHLY_RATE,
};
pub use reconciliation::{
    reconcile, reconcile_bank, reconcile_entries, ReconciliationReport, ReconciliationResult,
};
pub use config::{AccountSeed, BankConfig, HolderSeed, SeedKind};
pub use export::{ledger_csv, snapshot_json, write_ledger_csv};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
