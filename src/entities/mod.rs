// Entity Models
// Customers own identity, accounts own money + history, the bank owns accounts.
//
// Each entity has:
// - A stable key (CPF for customers, number for accounts)
// - Values that only change through its own operations
// - Tests next to the code

pub mod customer;
pub mod ledger;
pub mod account;
pub mod bank;

pub use customer::Customer;
pub use ledger::{Direction, LedgerEntry};
pub use account::{Account, AccountKind, SAVINGS_MONTHLY_RATE};
pub use bank::Bank;
