// ⚖️ Reconciliation - Validate balances match their ledgers
//
// Every account starts empty (an opening balance is itself a ledger entry),
// so the formula is simply:
//
//   Σ credits - Σ debits = balance
//
// Amounts are exact decimals: any difference at all is a discrepancy.

use crate::entities::account::Account;
use crate::entities::bank::Bank;
use crate::entities::ledger::LedgerEntry;
use crate::statement::format_amount;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

// ============================================================================
// RECONCILIATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ReconciliationResult {
    /// Ledger and balance agree
    Balanced {
        total_credits: Decimal,
        total_debits: Decimal,
        closing_balance: Decimal,
    },

    /// Ledger sum differs from the stored balance
    Discrepancy {
        expected_balance: Decimal,
        actual_balance: Decimal,
        difference: Decimal,
    },
}

impl ReconciliationResult {
    pub fn is_balanced(&self) -> bool {
        matches!(self, ReconciliationResult::Balanced { .. })
    }

    pub fn difference(&self) -> Decimal {
        match self {
            ReconciliationResult::Balanced { .. } => Decimal::ZERO,
            ReconciliationResult::Discrepancy { difference, .. } => *difference,
        }
    }
}

// ============================================================================
// RECONCILIATION REPORT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    pub account_number: u32,
    pub result: ReconciliationResult,
    pub entry_count: usize,
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    pub calculated_balance: Decimal,
    pub reconciled_at: DateTime<Utc>,
}

impl ReconciliationReport {
    pub fn is_balanced(&self) -> bool {
        self.result.is_balanced()
    }

    pub fn summary(&self) -> String {
        format!(
            "Account {}: {} entries, credits R$ {}, debits R$ {}, calculated R$ {}, difference R$ {}",
            self.account_number,
            self.entry_count,
            format_amount(self.total_credits),
            format_amount(self.total_debits),
            format_amount(self.calculated_balance),
            format_amount(self.result.difference())
        )
    }
}

// ============================================================================
// RECONCILIATION
// ============================================================================

/// Reconcile a ledger against the balance it should add up to
pub fn reconcile_entries(
    account_number: u32,
    entries: &[LedgerEntry],
    balance: Decimal,
) -> ReconciliationReport {
    let total_credits: Decimal = entries
        .iter()
        .filter(|e| e.is_credit())
        .map(|e| e.amount)
        .sum();
    let total_debits: Decimal = entries
        .iter()
        .filter(|e| !e.is_credit())
        .map(|e| e.amount)
        .sum();

    let calculated_balance = total_credits - total_debits;

    let result = if calculated_balance == balance {
        ReconciliationResult::Balanced {
            total_credits,
            total_debits,
            closing_balance: balance,
        }
    } else {
        ReconciliationResult::Discrepancy {
            expected_balance: balance,
            actual_balance: calculated_balance,
            difference: (calculated_balance - balance).abs(),
        }
    };

    ReconciliationReport {
        account_number,
        result,
        entry_count: entries.len(),
        total_credits,
        total_debits,
        calculated_balance,
        reconciled_at: Utc::now(),
    }
}

pub fn reconcile(account: &Account) -> ReconciliationReport {
    reconcile_entries(account.number(), account.ledger(), account.balance())
}

/// One report per account, in account-number order
pub fn reconcile_bank(bank: &Bank) -> Vec<ReconciliationReport> {
    bank.accounts().map(reconcile).collect()
}

// ============================================================================
// TESTS
// ============================================================================
