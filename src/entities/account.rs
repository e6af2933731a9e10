// 💳 Account Entity - Balance + append-only ledger
//
// "The ledger is the history, the balance is a cached sum of it"
//
// Two variants share one struct:
// - Checking: may carry an overdraft limit
// - Savings: no overdraft, accrues a fixed monthly rate on demand
//
// Every balance change appends exactly one ledger entry to each account it
// touches, so balance == Σ signed ledger entries at all times.

use crate::entities::customer::Customer;
use crate::entities::ledger::LedgerEntry;
use crate::error::{BankError, BankResult};
use crate::statement;
use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::sync::Arc;

/// Monthly interest paid on savings balances (0.5%)
pub const SAVINGS_MONTHLY_RATE: Decimal = dec!(0.005);

// ============================================================================
// ACCOUNT KIND
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountKind {
    /// Checking account; `Some(limit)` when an overdraft was granted
    Checking { overdraft_limit: Option<Decimal> },

    /// Savings account (interest-bearing, never negative)
    Savings,
}

impl AccountKind {
    /// Label printed on the statement header
    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Checking {
                overdraft_limit: None,
            } => "CONTA CORRENTE",
            AccountKind::Checking {
                overdraft_limit: Some(_),
            } => "CONTA CORRENTE COM LIMITE",
            AccountKind::Savings => "CONTA POUPANÇA",
        }
    }

    /// Overdraft allowance, zero when none was granted
    pub fn overdraft_limit(&self) -> Decimal {
        match self {
            AccountKind::Checking {
                overdraft_limit: Some(limit),
            } => *limit,
            _ => Decimal::ZERO,
        }
    }

    pub fn has_overdraft(&self) -> bool {
        matches!(
            self,
            AccountKind::Checking {
                overdraft_limit: Some(_)
            }
        )
    }

    pub fn is_savings(&self) -> bool {
        matches!(self, AccountKind::Savings)
    }
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Caller-assigned, unique within a bank
    number: u32,

    balance: Decimal,

    /// Shared with every other account of the same customer
    owner: Arc<Customer>,

    kind: AccountKind,

    /// Append-only, in recording order
    ledger: Vec<LedgerEntry>,

    opened_at: NaiveDateTime,
}

impl Account {
    /// Open a checking account without overdraft
    pub fn checking(number: u32, initial_balance: Decimal, owner: Arc<Customer>) -> BankResult<Self> {
        Self::open(
            number,
            initial_balance,
            owner,
            AccountKind::Checking {
                overdraft_limit: None,
            },
        )
    }

    /// Open a checking account with an overdraft limit (limit may be zero)
    pub fn checking_with_overdraft(
        number: u32,
        initial_balance: Decimal,
        owner: Arc<Customer>,
        overdraft_limit: Decimal,
    ) -> BankResult<Self> {
        if overdraft_limit < Decimal::ZERO {
            return Err(BankError::NegativeAmount {
                operation: "overdraft limit",
                amount: overdraft_limit,
            });
        }

        Self::open(
            number,
            initial_balance,
            owner,
            AccountKind::Checking {
                overdraft_limit: Some(overdraft_limit),
            },
        )
    }

    /// Open a savings account
    pub fn savings(number: u32, initial_balance: Decimal, owner: Arc<Customer>) -> BankResult<Self> {
        Self::open(number, initial_balance, owner, AccountKind::Savings)
    }

    fn open(
        number: u32,
        initial_balance: Decimal,
        owner: Arc<Customer>,
        kind: AccountKind,
    ) -> BankResult<Self> {
        if initial_balance < Decimal::ZERO {
            return Err(BankError::NegativeAmount {
                operation: "initial balance",
                amount: initial_balance,
            });
        }

        let mut account = Account {
            number,
            balance: initial_balance,
            owner,
            kind,
            ledger: Vec::new(),
            opened_at: Local::now().naive_local(),
        };

        if initial_balance > Decimal::ZERO {
            account
                .ledger
                .push(LedgerEntry::credit("Initial balance", initial_balance));
        }

        Ok(account)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn owner(&self) -> &Customer {
        &self.owner
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn type_label(&self) -> &'static str {
        self.kind.label()
    }

    /// Entries in recording order (oldest first)
    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    pub fn opened_at(&self) -> NaiveDateTime {
        self.opened_at
    }

    /// Balance plus any overdraft allowance
    pub fn available_funds(&self) -> Decimal {
        self.balance + self.kind.overdraft_limit()
    }

    /// Monthly rate as a percentage (0.50 for savings), `None` for checking
    pub fn monthly_rate_percent(&self) -> Option<Decimal> {
        match self.kind {
            AccountKind::Savings => Some(SAVINGS_MONTHLY_RATE * dec!(100)),
            AccountKind::Checking { .. } => None,
        }
    }

    /// Entries most recent first. Entries sharing a timestamp keep reverse
    /// recording order, so the newest always leads.
    pub fn sorted_entries(&self) -> Vec<&LedgerEntry> {
        let mut entries: Vec<&LedgerEntry> = self.ledger.iter().rev().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    /// Withdrawal eligibility, one rule per variant
    pub fn can_withdraw(&self, amount: Decimal) -> bool {
        match &self.kind {
            AccountKind::Checking { .. } => self.balance + self.kind.overdraft_limit() >= amount,
            AccountKind::Savings => self.balance >= amount,
        }
    }

    /// Credit `amount`. Returns false (and changes nothing) unless amount > 0.
    pub fn deposit(&mut self, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO {
            return false;
        }

        self.credit("Deposit", amount);
        true
    }

    /// Debit `amount` if positive and allowed by the variant's rule.
    pub fn withdraw(&mut self, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO || !self.can_withdraw(amount) {
            return false;
        }

        self.debit("Withdrawal", amount);
        true
    }

    /// Move `amount` to `destination`. Either both accounts change or
    /// neither does.
    pub fn transfer_to(&mut self, destination: &mut Account, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO || !self.can_withdraw(amount) {
            return false;
        }

        self.debit(format!("Transfer to account {}", destination.number), amount);
        destination.credit(format!("Transfer from account {}", self.number), amount);
        true
    }

    /// Move `amount` out of and back into this account. The balance is
    /// unchanged but both legs are recorded, provided the debit is allowed.
    pub fn transfer_to_self(&mut self, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO || !self.can_withdraw(amount) {
            return false;
        }

        self.debit(format!("Transfer to account {}", self.number), amount);
        self.credit(format!("Transfer from account {}", self.number), amount);
        true
    }

    /// Credit one month of interest on a positive savings balance.
    ///
    /// The exact amount is credited; rounding happens only when it is shown.
    /// Returns `None` for checking accounts and non-positive balances.
    pub fn accrue_monthly_interest(&mut self) -> Option<Decimal> {
        if !self.kind.is_savings() || self.balance <= Decimal::ZERO {
            return None;
        }

        let interest = self.balance * SAVINGS_MONTHLY_RATE;

        self.credit("Monthly interest", interest);
        Some(interest)
    }

    /// Rendered statement text
    pub fn statement(&self) -> String {
        statement::render(self)
    }

    fn credit(&mut self, description: impl Into<String>, amount: Decimal) {
        self.balance += amount;
        self.ledger.push(LedgerEntry::credit(description, amount));
    }

    fn debit(&mut self, description: impl Into<String>, amount: Decimal) {
        self.balance -= amount;
        self.ledger.push(LedgerEntry::debit(description, amount));
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ledger::Direction;
    use proptest::prelude::*;

    fn joao() -> Arc<Customer> {
        Arc::new(Customer::new("João Silva", "52998224725").unwrap())
    }

    fn signed_sum(account: &Account) -> Decimal {
        account.ledger().iter().map(|e| e.signed_amount()).sum()
    }

    #[test]
    fn test_account_creation() {
        let account = Account::checking(1001, dec!(1000.0), joao()).unwrap();

        assert_eq!(account.number(), 1001);
        assert_eq!(account.balance(), dec!(1000.0));
        assert_eq!(account.owner().name(), "João Silva");
        assert_eq!(account.type_label(), "CONTA CORRENTE");
        assert_eq!(account.ledger().len(), 1);
        assert_eq!(account.ledger()[0].description, "Initial balance");
        assert_eq!(account.ledger()[0].direction, Direction::Credit);
    }

    #[test]
    fn test_zero_initial_balance_has_no_entry() {
        let account = Account::savings(2001, Decimal::ZERO, joao()).unwrap();
        assert!(account.ledger().is_empty());
        assert_eq!(account.type_label(), "CONTA POUPANÇA");
    }

    #[test]
    fn test_negative_opening_values_rejected() {
        let err = Account::checking(1, dec!(-1), joao()).unwrap_err();
        assert!(matches!(err, BankError::NegativeAmount { .. }));

        let err = Account::checking_with_overdraft(1, dec!(10), joao(), dec!(-5)).unwrap_err();
        assert_eq!(
            err,
            BankError::NegativeAmount {
                operation: "overdraft limit",
                amount: dec!(-5),
            }
        );
    }

    #[test]
    fn test_deposit() {
        let mut account = Account::checking(1001, dec!(1000.0), joao()).unwrap();

        assert!(account.deposit(dec!(500.0)));
        assert_eq!(account.balance(), dec!(1500.0));
        assert_eq!(account.ledger().len(), 2);

        assert!(!account.deposit(Decimal::ZERO));
        assert!(!account.deposit(dec!(-100)));
        assert_eq!(account.balance(), dec!(1500.0));
        assert_eq!(account.ledger().len(), 2);
    }

    #[test]
    fn test_checking_withdraw_without_overdraft() {
        let mut account = Account::checking(1001, dec!(100), joao()).unwrap();

        assert!(!account.withdraw(dec!(100.01)));
        assert!(account.withdraw(dec!(100)));
        assert_eq!(account.balance(), Decimal::ZERO);
        assert!(!account.withdraw(dec!(0.01)));
    }

    #[test]
    fn test_checking_withdraw_with_overdraft() {
        let mut account =
            Account::checking_with_overdraft(1003, dec!(100), joao(), dec!(500)).unwrap();

        assert_eq!(account.type_label(), "CONTA CORRENTE COM LIMITE");
        assert_eq!(account.available_funds(), dec!(600));
        assert!(account.can_withdraw(dec!(600)));
        assert!(!account.can_withdraw(dec!(600.01)));

        assert!(account.withdraw(dec!(550)));
        assert_eq!(account.balance(), dec!(-450));
        assert!(!account.withdraw(dec!(51)));
        assert!(account.withdraw(dec!(50)));
        assert_eq!(account.balance(), dec!(-500));
    }

    #[test]
    fn test_savings_cannot_go_negative() {
        let mut account = Account::savings(2001, dec!(100), joao()).unwrap();

        assert!(!account.withdraw(dec!(100.01)));
        assert!(account.withdraw(dec!(100)));
        assert_eq!(account.balance(), Decimal::ZERO);
        assert_eq!(account.available_funds(), Decimal::ZERO);
    }

    #[test]
    fn test_transfer_between_accounts() {
        let owner = joao();
        let mut source = Account::checking(1001, dec!(1000.0), owner.clone()).unwrap();
        let mut destination = Account::checking(1002, dec!(500.0), owner).unwrap();

        assert!(source.transfer_to(&mut destination, dec!(300.0)));
        assert_eq!(source.balance(), dec!(700.0));
        assert_eq!(destination.balance(), dec!(800.0));

        let last_out = source.ledger().last().unwrap();
        assert_eq!(last_out.description, "Transfer to account 1002");
        assert_eq!(last_out.direction, Direction::Debit);

        let last_in = destination.ledger().last().unwrap();
        assert_eq!(last_in.description, "Transfer from account 1001");
        assert_eq!(last_in.direction, Direction::Credit);
    }

    #[test]
    fn test_failed_transfer_changes_nothing() {
        let owner = joao();
        let mut source = Account::savings(2001, dec!(100), owner.clone()).unwrap();
        let mut destination = Account::checking(1002, dec!(500), owner).unwrap();

        assert!(!source.transfer_to(&mut destination, dec!(100.01)));
        assert!(!source.transfer_to(&mut destination, Decimal::ZERO));

        assert_eq!(source.balance(), dec!(100));
        assert_eq!(source.ledger().len(), 1);
        assert_eq!(destination.balance(), dec!(500));
        assert_eq!(destination.ledger().len(), 1);
    }

    #[test]
    fn test_transfer_to_self_records_both_legs() {
        let mut account = Account::checking(1001, dec!(1000.0), joao()).unwrap();

        assert!(account.transfer_to_self(dec!(100)));
        assert_eq!(account.balance(), dec!(1000.0));

        let descriptions: Vec<&str> = account.ledger()[1..]
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(
            descriptions,
            vec!["Transfer to account 1001", "Transfer from account 1001"]
        );

        // Still bound by the withdrawal rule
        assert!(!account.transfer_to_self(dec!(1000.01)));
        assert!(!account.transfer_to_self(Decimal::ZERO));
        assert_eq!(account.ledger().len(), 3);
    }

    #[test]
    fn test_monthly_interest() {
        let mut account = Account::savings(2001, dec!(1000.0), joao()).unwrap();

        assert_eq!(account.accrue_monthly_interest(), Some(dec!(5.0)));
        assert_eq!(account.balance(), dec!(1005.0));

        let entry = account.ledger().last().unwrap();
        assert_eq!(entry.description, "Monthly interest");
        assert_eq!(entry.amount, dec!(5.0));
        assert_eq!(entry.direction, Direction::Credit);
    }

    #[test]
    fn test_monthly_interest_is_exact() {
        let mut account = Account::savings(2001, dec!(1005.00), joao()).unwrap();
        // 1005.00 * 0.005 = 5.025, kept unrounded in the ledger
        assert_eq!(account.accrue_monthly_interest(), Some(dec!(5.025)));
        assert_eq!(account.balance(), dec!(1010.025));
        assert_eq!(account.ledger().last().unwrap().amount, dec!(5.025));

        // Display still rounds to cents
        assert!(account.statement().ends_with("TAXA DE RENDIMENTO MENSAL: 0.50%"));
        assert!(account.statement().contains("SALDO ATUAL: R$ 1010.03"));
    }

    #[test]
    fn test_monthly_interest_on_small_balance() {
        let mut tiny = Account::savings(2002, dec!(0.50), joao()).unwrap();
        assert_eq!(tiny.accrue_monthly_interest(), Some(dec!(0.0025)));
        assert_eq!(tiny.balance(), dec!(0.5025));
        assert_eq!(tiny.ledger().len(), 2);
    }

    #[test]
    fn test_monthly_interest_noop_cases() {
        let mut empty = Account::savings(2001, Decimal::ZERO, joao()).unwrap();
        assert_eq!(empty.accrue_monthly_interest(), None);
        assert!(empty.ledger().is_empty());

        let mut overdrawn = Account::savings(2003, Decimal::ZERO, joao()).unwrap();
        overdrawn.balance = dec!(-10);
        assert_eq!(overdrawn.accrue_monthly_interest(), None);
        assert_eq!(overdrawn.balance(), dec!(-10));

        let mut checking = Account::checking(1001, dec!(1000), joao()).unwrap();
        assert_eq!(checking.accrue_monthly_interest(), None);
        assert_eq!(checking.balance(), dec!(1000));
    }

    #[test]
    fn test_monthly_rate_percent() {
        let savings = Account::savings(2001, dec!(1), joao()).unwrap();
        assert_eq!(savings.monthly_rate_percent(), Some(dec!(0.5)));

        let checking = Account::checking(1001, dec!(1), joao()).unwrap();
        assert_eq!(checking.monthly_rate_percent(), None);
    }

    #[test]
    fn test_sorted_entries_most_recent_first() {
        let mut account = Account::checking(1001, Decimal::ZERO, joao()).unwrap();
        let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();

        // Recorded out of timestamp order on purpose
        account.ledger.push(LedgerEntry::at(
            at("2025-01-02 10:00:00"),
            "second",
            dec!(2),
            Direction::Credit,
        ));
        account.ledger.push(LedgerEntry::at(
            at("2025-01-01 10:00:00"),
            "first",
            dec!(1),
            Direction::Credit,
        ));
        account.ledger.push(LedgerEntry::at(
            at("2025-01-03 10:00:00"),
            "third-a",
            dec!(3),
            Direction::Credit,
        ));
        account.ledger.push(LedgerEntry::at(
            at("2025-01-03 10:00:00"),
            "third-b",
            dec!(4),
            Direction::Credit,
        ));

        let order: Vec<&str> = account
            .sorted_entries()
            .iter()
            .map(|e| e.description.as_str())
            .collect();
        assert_eq!(order, vec!["third-b", "third-a", "second", "first"]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Deposit(i64),
        Withdraw(i64),
        TransferOut(i64),
        TransferIn(i64),
        Interest,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-500i64..5_000).prop_map(Op::Deposit),
            (-500i64..5_000).prop_map(Op::Withdraw),
            (-500i64..5_000).prop_map(Op::TransferOut),
            (-500i64..5_000).prop_map(Op::TransferIn),
            Just(Op::Interest),
        ]
    }

    proptest! {
        #[test]
        fn prop_balance_matches_ledger(
            initial in 0i64..10_000,
            limit in proptest::option::of(0i64..2_000),
            savings in any::<bool>(),
            ops in proptest::collection::vec(op_strategy(), 0..40),
        ) {
            let owner = joao();
            let initial = Decimal::new(initial, 2);
            let mut account = match (savings, limit) {
                (true, _) => Account::savings(1, initial, owner.clone()).unwrap(),
                (false, Some(l)) => {
                    Account::checking_with_overdraft(1, initial, owner.clone(), Decimal::new(l, 2)).unwrap()
                }
                (false, None) => Account::checking(1, initial, owner.clone()).unwrap(),
            };
            let mut other = Account::checking_with_overdraft(2, initial, owner, Decimal::new(10_000, 2)).unwrap();

            for op in ops {
                let before = (account.balance(), account.ledger().len());
                match op {
                    Op::Deposit(c) => {
                        let ok = account.deposit(Decimal::new(c, 2));
                        prop_assert_eq!(ok, c > 0);
                    }
                    Op::Withdraw(c) => {
                        let amount = Decimal::new(c, 2);
                        let allowed = account.can_withdraw(amount);
                        let ok = account.withdraw(amount);
                        prop_assert_eq!(ok, c > 0 && allowed);
                    }
                    Op::TransferOut(c) => { account.transfer_to(&mut other, Decimal::new(c, 2)); }
                    Op::TransferIn(c) => { other.transfer_to(&mut account, Decimal::new(c, 2)); }
                    Op::Interest => { account.accrue_monthly_interest(); }
                }

                if account.balance() == before.0 {
                    prop_assert_eq!(account.ledger().len(), before.1);
                }
                if savings {
                    prop_assert!(account.balance() >= Decimal::ZERO);
                }
                prop_assert!(account.balance() >= -account.kind().overdraft_limit());
                prop_assert_eq!(account.balance(), signed_sum(&account));
                prop_assert_eq!(other.balance(), signed_sum(&other));
                prop_assert!(account.ledger().iter().all(|e| e.amount > Decimal::ZERO));
            }
        }
    }
}
