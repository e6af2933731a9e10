// ⚠️ Domain errors
// Every failure the banking core can report. All are recoverable: the
// operation that returns one has changed nothing.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// CPF failed the length/digit/checksum rules
    #[error("Invalid CPF: {0}")]
    InvalidIdentifier(String),

    /// Deposits, withdrawals and transfers need amount > 0; initial
    /// balances and overdraft limits need amount >= 0
    #[error("Amount must be positive for {operation}: {amount}")]
    NegativeAmount {
        operation: &'static str,
        amount: Decimal,
    },

    #[error("Account {0} already exists")]
    DuplicateAccount(u32),

    #[error("Account {0} not found")]
    AccountNotFound(u32),

    #[error("Insufficient funds in account {account}: requested {requested}, available {available}")]
    InsufficientFunds {
        account: u32,
        requested: Decimal,
        available: Decimal,
    },
}

pub type BankResult<T> = Result<T, BankError>;

impl BankError {
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, BankError::InsufficientFunds { .. })
    }
}

// ============================================================================
// TESTS
// ============================================================================
