// 📄 Statement rendering
//
// Fixed text layout shared with the console/GUI front ends:
//
//   === EXTRATO DA CONTA 1001 ===
//   Titular: João Silva
//   CPF: 529.982.247-25
//   Tipo: CONTA CORRENTE
//
//   [05/03/2025 14:02:11] (D) Withdrawal R$ 200.00
//   [05/03/2025 14:01:40] (C) Deposit R$ 500.00
//   [05/03/2025 14:00:02] (C) Initial balance R$ 1000.00
//
//   SALDO ATUAL: R$ 1300.00
//
// Variants add one trailing line (overdraft limit or savings rate).
// Amounts always carry two decimals with a '.' separator.

use crate::entities::account::{Account, AccountKind};
use crate::entities::ledger::LedgerEntry;
use rust_decimal::{Decimal, RoundingStrategy};

/// `dd/MM/yyyy HH:mm:ss`
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Two decimals, half away from zero
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// `[dd/MM/yyyy HH:mm:ss] (C|D) <description> R$ <amount>`
pub fn entry_line(entry: &LedgerEntry) -> String {
    format!(
        "[{}] ({}) {} R$ {}",
        entry.timestamp.format(TIMESTAMP_FORMAT),
        entry.direction.code(),
        entry.description,
        format_amount(entry.amount)
    )
}

/// Header, entries (most recent first) and the current balance line
pub fn base_block(account: &Account) -> String {
    let owner = account.owner();

    let mut out = String::new();
    out.push_str(&format!("=== EXTRATO DA CONTA {} ===\n", account.number()));
    out.push_str(&format!("Titular: {}\n", owner.name()));
    out.push_str(&format!("CPF: {}\n", owner.formatted_cpf()));
    out.push_str(&format!("Tipo: {}\n\n", account.type_label()));

    for entry in account.sorted_entries() {
        out.push_str(&entry_line(entry));
        out.push('\n');
    }

    out.push_str(&format!(
        "\nSALDO ATUAL: R$ {}",
        format_amount(account.balance())
    ));
    out
}

/// Variant-specific trailing line, if any
pub fn suffix(account: &Account) -> Option<String> {
    match account.kind() {
        AccountKind::Checking {
            overdraft_limit: Some(limit),
        } => Some(format!("LIMITE DISPONÍVEL: R$ {}", format_amount(*limit))),
        AccountKind::Checking {
            overdraft_limit: None,
        } => None,
        AccountKind::Savings => account
            .monthly_rate_percent()
            .map(|rate| format!("TAXA DE RENDIMENTO MENSAL: {}%", format_amount(rate))),
    }
}

/// Full statement: base block plus the variant suffix
pub fn render(account: &Account) -> String {
    let mut out = base_block(account);
    if let Some(line) = suffix(account) {
        out.push('\n');
        out.push_str(&line);
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
