// 🏦 Bank - Account registry + operation orchestrator
//
// The bank owns every account, keyed by its caller-assigned number. All
// input validation happens here, before any account is touched, so a failed
// operation never leaves partial state behind.
//
// Check order per operation:
//   amount sign → account lookup(s) → funds

use crate::entities::account::Account;
use crate::entities::customer::Customer;
use crate::error::{BankError, BankResult};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

fn ensure_positive(amount: Decimal, operation: &'static str) -> BankResult<()> {
    if amount <= Decimal::ZERO {
        return Err(BankError::NegativeAmount { operation, amount });
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct Bank {
    name: String,
    slogan: String,
    number: u32,

    /// Ordered by account number
    accounts: BTreeMap<u32, Account>,
}

impl Bank {
    pub fn new(name: impl Into<String>, slogan: impl Into<String>, number: u32) -> Self {
        Bank {
            name: name.into(),
            slogan: slogan.into(),
            number,
            accounts: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slogan(&self) -> &str {
        &self.slogan
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    // ========================================================================
    // ACCOUNT CREATION
    // ========================================================================

    /// Open a checking account. Supplying `overdraft_limit` (even zero)
    /// selects the overdraft variant.
    pub fn create_account(
        &mut self,
        number: u32,
        initial_balance: Decimal,
        owner: Arc<Customer>,
        overdraft_limit: Option<Decimal>,
    ) -> BankResult<&Account> {
        self.ensure_unused(number)?;

        let account = match overdraft_limit {
            Some(limit) => Account::checking_with_overdraft(number, initial_balance, owner, limit)?,
            None => Account::checking(number, initial_balance, owner)?,
        };
        Ok(&*self.accounts.entry(number).or_insert(account))
    }

    /// Open a savings account
    pub fn create_savings_account(
        &mut self,
        number: u32,
        initial_balance: Decimal,
        owner: Arc<Customer>,
    ) -> BankResult<&Account> {
        self.ensure_unused(number)?;

        let account = Account::savings(number, initial_balance, owner)?;
        Ok(&*self.accounts.entry(number).or_insert(account))
    }

    fn ensure_unused(&self, number: u32) -> BankResult<()> {
        if self.accounts.contains_key(&number) {
            return Err(BankError::DuplicateAccount(number));
        }
        Ok(())
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    /// Exact lookup by account number
    pub fn account(&self, number: u32) -> BankResult<&Account> {
        self.accounts
            .get(&number)
            .ok_or(BankError::AccountNotFound(number))
    }

    fn account_mut(&mut self, number: u32) -> BankResult<&mut Account> {
        self.accounts
            .get_mut(&number)
            .ok_or(BankError::AccountNotFound(number))
    }

    /// All accounts in ascending number order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn account_numbers(&self) -> Vec<u32> {
        self.accounts.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of all balances (overdrawn accounts count negative)
    pub fn total_balance(&self) -> Decimal {
        self.accounts.values().map(|a| a.balance()).sum()
    }

    // ========================================================================
    // OPERATIONS
    // ========================================================================

    pub fn deposit(&mut self, number: u32, amount: Decimal) -> BankResult<()> {
        ensure_positive(amount, "deposit")?;
        let account = self.account_mut(number)?;

        // amount > 0 was checked above, so the account always accepts it
        account.deposit(amount);
        Ok(())
    }

    pub fn withdraw(&mut self, number: u32, amount: Decimal) -> BankResult<()> {
        ensure_positive(amount, "withdrawal")?;
        let account = self.account_mut(number)?;

        if !account.withdraw(amount) {
            return Err(BankError::InsufficientFunds {
                account: number,
                requested: amount,
                available: account.available_funds(),
            });
        }
        Ok(())
    }

    /// Move money between two registered accounts, all or nothing
    pub fn transfer(&mut self, from: u32, to: u32, amount: Decimal) -> BankResult<()> {
        ensure_positive(amount, "transfer")?;

        let source = self.account(from)?;
        self.account(to)?;

        if !source.can_withdraw(amount) {
            return Err(BankError::InsufficientFunds {
                account: from,
                requested: amount,
                available: source.available_funds(),
            });
        }

        if from == to {
            // Checked above, so both legs always go through
            self.account_mut(from)?.transfer_to_self(amount);
            return Ok(());
        }

        // Take the source out so both accounts can be borrowed mutably; it
        // goes back in before returning on every path.
        let mut source = self.accounts.remove(&from).ok_or(BankError::AccountNotFound(from))?;
        let moved = match self.accounts.get_mut(&to) {
            Some(destination) => source.transfer_to(destination, amount),
            None => false,
        };
        let available = source.available_funds();
        self.accounts.insert(from, source);

        if !moved {
            return Err(BankError::InsufficientFunds {
                account: from,
                requested: amount,
                available,
            });
        }
        Ok(())
    }

    pub fn statement(&self, number: u32) -> BankResult<String> {
        Ok(self.account(number)?.statement())
    }

    /// Credit one month of interest on a savings account. `Ok(None)` when
    /// nothing was credited (checking account or non-positive balance).
    pub fn accrue_monthly_interest(&mut self, number: u32) -> BankResult<Option<Decimal>> {
        Ok(self.account_mut(number)?.accrue_monthly_interest())
    }

    /// Month-end run over every savings account; returns the total credited
    pub fn accrue_interest_all(&mut self) -> Decimal {
        self.accounts
            .values_mut()
            .filter_map(|account| account.accrue_monthly_interest())
            .sum()
    }
}

// ============================================================================
// TESTS
// ============================================================================
