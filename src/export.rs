// 📤 Export - Ledger CSV + bank snapshot JSON
//
// Write-only views of the in-memory state for spreadsheets and other tools.
// Nothing here is read back; there is no persistence layer.

use crate::entities::account::Account;
use crate::entities::bank::Bank;
use crate::statement::{format_amount, TIMESTAMP_FORMAT};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

/// One CSV row per ledger entry
#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    #[serde(rename = "Account")]
    account: u32,

    #[serde(rename = "Date")]
    date: String,

    #[serde(rename = "Type")]
    direction: char,

    #[serde(rename = "Description")]
    description: &'a str,

    #[serde(rename = "Amount")]
    amount: String,
}

/// Write the ledger in recording order (oldest first)
pub fn write_ledger_csv<W: Write>(account: &Account, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for entry in account.ledger() {
        wtr.serialize(LedgerRow {
            account: account.number(),
            date: entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            direction: entry.direction.code(),
            description: &entry.description,
            amount: format_amount(entry.amount),
        })
        .with_context(|| format!("Failed to write ledger row for account {}", account.number()))?;
    }

    wtr.flush().context("Failed to flush ledger CSV")?;
    Ok(())
}

pub fn ledger_csv(account: &Account) -> Result<String> {
    let mut buffer = Vec::new();
    write_ledger_csv(account, &mut buffer)?;
    String::from_utf8(buffer).context("Ledger CSV is not valid UTF-8")
}

/// Whole bank (accounts, owners, ledgers) as pretty-printed JSON
pub fn snapshot_json(bank: &Bank) -> Result<String> {
    serde_json::to_string_pretty(bank).context("Failed to serialize bank snapshot")
}

// ============================================================================
// TESTS
// ============================================================================
