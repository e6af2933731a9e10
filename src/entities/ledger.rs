// 🧾 Ledger Entry - One balance-affecting event
//
// Entries are written once by the owning account and never touched again.
// The amount is always positive; the direction carries the sign.

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// DIRECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Money in
    Credit,

    /// Money out
    Debit,
}

impl Direction {
    /// Single-letter code used on statements
    pub fn code(&self) -> char {
        match self {
            Direction::Credit => 'C',
            Direction::Debit => 'D',
        }
    }
}

// ============================================================================
// LEDGER ENTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Stable identity (UUID)
    pub id: String,

    /// Local wall-clock time the event was recorded
    pub timestamp: NaiveDateTime,

    pub description: String,

    /// Always > 0
    pub amount: Decimal,

    pub direction: Direction,
}

impl LedgerEntry {
    /// Record an event happening now
    pub fn new(description: impl Into<String>, amount: Decimal, direction: Direction) -> Self {
        Self::at(Local::now().naive_local(), description, amount, direction)
    }

    /// Record an event with an explicit timestamp
    pub fn at(
        timestamp: NaiveDateTime,
        description: impl Into<String>,
        amount: Decimal,
        direction: Direction,
    ) -> Self {
        LedgerEntry {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp,
            description: description.into(),
            amount,
            direction,
        }
    }

    pub fn credit(description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(description, amount, Direction::Credit)
    }

    pub fn debit(description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(description, amount, Direction::Debit)
    }

    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }

    /// Amount with the direction applied (credits positive, debits negative)
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
