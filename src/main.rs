// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use bank_ledger::{cpf, ledger_csv, reconcile_bank, snapshot_json, Bank, BankConfig, Customer};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal_macros::dec;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bank-ledger")]
#[command(version = bank_ledger::VERSION)]
#[command(about = "In-memory bank: checking and savings accounts with ledgers and statements")]
struct Cli {
    /// Bank config file (JSON); the built-in demo bank is used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scripted walkthrough of every operation
    Demo,

    /// Print the statement of one account
    Statement { number: u32 },

    /// Export one account's ledger
    Export {
        number: u32,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },

    /// Credit a month of interest to every savings account
    AccrueInterest,

    /// Check every balance against its ledger
    Reconcile,

    /// Dump the whole bank as JSON
    Snapshot,

    /// Check a CPF's verification digits
    ValidateCpf { cpf: String },

    /// Browse accounts in the terminal UI
    Tui,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => run_demo(),
        Commands::Statement { number } => {
            let bank = load_bank(cli.config.as_ref())?;
            println!("{}", bank.statement(number)?);
            Ok(())
        }
        Commands::Export { number, format } => {
            let bank = load_bank(cli.config.as_ref())?;
            let account = bank.account(number)?;
            match format {
                ExportFormat::Csv => print!("{}", ledger_csv(account)?),
                ExportFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(account).context("Failed to serialize account")?
                ),
            }
            Ok(())
        }
        Commands::AccrueInterest => run_accrue_interest(cli.config.as_ref()),
        Commands::Reconcile => run_reconcile(cli.config.as_ref()),
        Commands::Snapshot => {
            let bank = load_bank(cli.config.as_ref())?;
            println!("{}", snapshot_json(&bank)?);
            Ok(())
        }
        Commands::ValidateCpf { cpf: id } => {
            let bare = cpf::strip(&id);
            if cpf::validate(&bare) {
                println!("✓ {} is valid", cpf::format(&bare));
            } else {
                println!("✗ {} is not a valid CPF", id);
            }
            Ok(())
        }
        Commands::Tui => {
            let bank = load_bank(cli.config.as_ref())?;
            run_ui_mode(bank)
        }
    }
}

fn load_bank(config: Option<&PathBuf>) -> Result<Bank> {
    let config = match config {
        Some(path) => {
            info!(path = %path.display(), "Loading bank config");
            BankConfig::from_file(path)?
        }
        None => BankConfig::default(),
    };

    let bank = config.build().context("Failed to open seeded accounts")?;
    info!(bank = bank.name(), accounts = bank.len(), "Bank ready");
    Ok(bank)
}

fn run_accrue_interest(config: Option<&PathBuf>) -> Result<()> {
    let mut bank = load_bank(config)?;

    let total = bank.accrue_interest_all();
    println!("💰 Interest credited: R$ {}", bank_ledger::statement::format_amount(total));

    for account in bank.accounts().filter(|a| a.kind().is_savings()) {
        println!("{}\n", account.statement());
    }

    Ok(())
}

fn run_reconcile(config: Option<&PathBuf>) -> Result<()> {
    let bank = load_bank(config)?;

    let reports = reconcile_bank(&bank);
    let mut discrepancies = 0;

    for report in &reports {
        if report.is_balanced() {
            println!("✓ {}", report.summary());
        } else {
            discrepancies += 1;
            warn!(account = report.account_number, "Ledger does not match balance");
            println!("✗ {}", report.summary());
        }
    }

    println!("\n{} accounts, {} discrepancies", reports.len(), discrepancies);
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("🏦 Bank Ledger - Demo");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut bank = Bank::new("Banco do Brasil", "Feito para você", 1);
    println!("{} - {} (banco {})", bank.name(), bank.slogan(), bank.number());

    // 1. Customers
    println!("\n👤 Customers");
    let joao = Arc::new(Customer::new("João Silva", "52998224725")?);
    let maria = Arc::new(Customer::new("Maria Santos", "98765432100")?);
    println!("✓ {}", joao);
    println!("✓ {}", maria);
    match Customer::new("Pedro Souza", "12345678901") {
        Ok(_) => println!("✗ Invalid CPF accepted"),
        Err(e) => println!("✓ Rejected: {}", e),
    }

    // 2. Accounts
    println!("\n📂 Opening accounts");
    bank.create_account(1001, dec!(1000.00), Arc::clone(&joao), None)?;
    bank.create_account(1002, dec!(500.00), Arc::clone(&maria), None)?;
    bank.create_account(1003, dec!(0.00), Arc::clone(&maria), Some(dec!(500.00)))?;
    bank.create_savings_account(2001, dec!(1000.00), Arc::clone(&joao))?;
    for account in bank.accounts() {
        println!("✓ {} {} - {}", account.type_label(), account.number(), account.owner().name());
    }

    let rejected = [
        bank.create_account(1001, dec!(50.00), Arc::clone(&maria), None).err(),
        bank.create_account(1004, dec!(-10.00), Arc::clone(&maria), None).err(),
    ];
    for err in rejected.into_iter().flatten() {
        println!("✓ Rejected: {}", err);
    }

    // 3. Movements
    println!("\n💸 Movements");
    bank.deposit(1001, dec!(500.00))?;
    println!("✓ Deposit R$ 500.00 into 1001");
    bank.withdraw(1001, dec!(200.00))?;
    println!("✓ Withdrawal R$ 200.00 from 1001");
    bank.transfer(1001, 1002, dec!(300.00))?;
    println!("✓ Transfer R$ 300.00 from 1001 to 1002");
    bank.withdraw(1003, dec!(400.00))?;
    println!("✓ Withdrawal R$ 400.00 from 1003 (overdraft)");

    let failures = [
        ("Withdrawal R$ 5000.00 from 1002", bank.withdraw(1002, dec!(5000.00)).err()),
        ("Withdrawal R$ 200.00 from 1003", bank.withdraw(1003, dec!(200.00)).err()),
        ("Deposit R$ -50.00 into 1001", bank.deposit(1001, dec!(-50.00)).err()),
        ("Transfer into 9999", bank.transfer(1001, 9999, dec!(10.00)).err()),
    ];
    for (label, err) in failures {
        match err {
            Some(e) => println!("✓ {} rejected: {}", label, e),
            None => println!("✗ {} went through", label),
        }
    }

    // 4. Interest
    println!("\n📈 Month-end interest");
    let total = bank.accrue_interest_all();
    println!("✓ Credited R$ {}", bank_ledger::statement::format_amount(total));

    // 5. Statements
    println!("\n🧾 Statements");
    for number in bank.account_numbers() {
        println!("\n{}", bank.statement(number)?);
    }

    // 6. Reconciliation
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let reports = reconcile_bank(&bank);
    let balanced = reports.iter().filter(|r| r.is_balanced()).count();
    println!("⚖️  {}/{} ledgers reconcile", balanced, reports.len());
    println!("💰 Total deposits: R$ {}", bank_ledger::statement::format_amount(bank.total_balance()));

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(bank: Bank) -> Result<()> {
    println!("🖥️  Loading {}...\n", bank.name());
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(bank);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_bank: Bank) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
