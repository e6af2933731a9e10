// ⚙️ Bank Configuration - Bank identity + seed accounts as data
//
// A config file describes which bank to build and which accounts it starts
// with. Building goes through the regular Bank operations, so a bad seed is
// rejected with the same errors an interactive caller would get.
//
// {
//   "name": "Banco do Brasil",
//   "slogan": "Feito para você",
//   "number": 1,
//   "accounts": [
//     { "number": 1001, "holder": { "name": "João Silva", "cpf": "52998224725" },
//       "initial_balance": "1000.00" },
//     { "number": 1003, "holder": { "name": "João Silva", "cpf": "52998224725" },
//       "initial_balance": "0", "overdraft_limit": "500.00" },
//     { "number": 2001, "holder": { "name": "Maria Santos", "cpf": "98765432100" },
//       "initial_balance": "1000.00", "kind": "savings" }
//   ]
// }

use crate::entities::bank::Bank;
use crate::entities::customer::Customer;
use crate::error::BankResult;
use anyhow::{Context as AnyhowContext, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// SEEDS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedKind {
    #[default]
    Checking,
    Savings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderSeed {
    pub name: String,

    /// Bare or formatted; separators are stripped before validation
    pub cpf: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSeed {
    pub number: u32,

    pub holder: HolderSeed,

    #[serde(default)]
    pub initial_balance: Decimal,

    /// Checking only; presence selects the overdraft variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overdraft_limit: Option<Decimal>,

    #[serde(default)]
    pub kind: SeedKind,
}

// ============================================================================
// BANK CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankConfig {
    pub name: String,

    #[serde(default)]
    pub slogan: String,

    #[serde(default = "default_bank_number")]
    pub number: u32,

    #[serde(default)]
    pub accounts: Vec<AccountSeed>,
}

fn default_bank_number() -> u32 {
    1
}

impl BankConfig {
    /// Load config from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse bank config JSON")
    }

    /// Build the bank and open every seeded account, in file order.
    ///
    /// Seeds sharing a CPF share a single customer.
    pub fn build(&self) -> BankResult<Bank> {
        let mut bank = Bank::new(self.name.clone(), self.slogan.clone(), self.number);
        let mut customers: HashMap<String, Arc<Customer>> = HashMap::new();

        for seed in &self.accounts {
            let cpf = crate::cpf::strip(&seed.holder.cpf);
            let owner = match customers.get(&cpf) {
                Some(existing) => Arc::clone(existing),
                None => {
                    let customer = Arc::new(Customer::new(seed.holder.name.clone(), cpf.clone())?);
                    customers.insert(cpf, Arc::clone(&customer));
                    customer
                }
            };

            match seed.kind {
                SeedKind::Checking => {
                    bank.create_account(seed.number, seed.initial_balance, owner, seed.overdraft_limit)?;
                }
                SeedKind::Savings => {
                    bank.create_savings_account(seed.number, seed.initial_balance, owner)?;
                }
            }
        }

        Ok(bank)
    }
}

impl Default for BankConfig {
    /// Demo bank used when no config file is given
    fn default() -> Self {
        let joao = HolderSeed {
            name: "João Silva".to_string(),
            cpf: "52998224725".to_string(),
        };
        let maria = HolderSeed {
            name: "Maria Santos".to_string(),
            cpf: "98765432100".to_string(),
        };

        BankConfig {
            name: "Banco do Brasil".to_string(),
            slogan: "Feito para você".to_string(),
            number: 1,
            accounts: vec![
                AccountSeed {
                    number: 1001,
                    holder: joao.clone(),
                    initial_balance: dec!(1000.00),
                    overdraft_limit: None,
                    kind: SeedKind::Checking,
                },
                AccountSeed {
                    number: 1002,
                    holder: maria,
                    initial_balance: dec!(500.00),
                    overdraft_limit: None,
                    kind: SeedKind::Checking,
                },
                AccountSeed {
                    number: 2001,
                    holder: joao,
                    initial_balance: dec!(1000.00),
                    overdraft_limit: None,
                    kind: SeedKind::Savings,
                },
            ],
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
