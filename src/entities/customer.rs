// 👤 Customer Entity - Name + validated CPF
//
// A customer can only exist with a CPF that passes the checksum, so every
// other component may assume the id is well formed. Immutable once built;
// accounts share it through `Arc<Customer>`.

use crate::cpf;
use crate::error::{BankError, BankResult};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    name: String,
    cpf: String,
}

impl Customer {
    /// Build a customer, rejecting any CPF that fails validation
    pub fn new(name: impl Into<String>, cpf: impl Into<String>) -> BankResult<Self> {
        let cpf = cpf.into();
        if !cpf::validate(&cpf) {
            return Err(BankError::InvalidIdentifier(cpf));
        }

        Ok(Customer {
            name: name.into(),
            cpf,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bare 11-digit CPF
    pub fn cpf(&self) -> &str {
        &self.cpf
    }

    /// CPF as `ddd.ddd.ddd-dd`
    pub fn formatted_cpf(&self) -> String {
        cpf::format(&self.cpf)
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (CPF: {})", self.name, self.formatted_cpf())
    }
}

// ============================================================================
// TESTS
// ============================================================================
