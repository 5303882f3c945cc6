use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_core::DeductionAdjustment;
use tax_core::report::format_inr;
use tax_data::{BankStatementLoader, ReceiptLoader};
use tracing_subscriber::EnvFilter;

/// Summarise deductions found in receipt and bank statement CSV files.
///
/// Receipt files need the columns `date,vendor,amount,tax_section`.
/// Bank statements need `date,narration,debit,credit`; debits are
/// classified by narration keywords and salary credits are totalled.
#[derive(Parser, Debug)]
#[command(name = "deduction-import")]
#[command(version, about, long_about = None)]
struct Args {
    /// Receipt CSV file. May be given more than once.
    #[arg(short, long)]
    receipts: Vec<PathBuf>,

    /// Bank statement CSV file.
    #[arg(short, long)]
    bank_statement: Option<PathBuf>,

    /// Log every classification step.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.receipts.is_empty() && args.bank_statement.is_none() {
        anyhow::bail!("Nothing to import: pass --receipts and/or --bank-statement");
    }

    let mut adjustment = DeductionAdjustment::new();

    for path in &args.receipts {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = ReceiptLoader::parse(file)
            .with_context(|| format!("Failed to parse receipts: {}", path.display()))?;
        println!("Parsed {} receipts from {}", records.len(), path.display());
        adjustment.merge(&ReceiptLoader::to_adjustment(&records));
    }

    if let Some(path) = &args.bank_statement {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let import = BankStatementLoader::load(file)
            .with_context(|| format!("Failed to import bank statement: {}", path.display()))?;
        match import.annual_income {
            Some(income) => println!("Salary credits: {}", format_inr(income)),
            None => println!("No salary credits found in {}", path.display()),
        }
        adjustment.merge(&import.adjustment);
    }

    if adjustment.is_empty() {
        println!("No deductions found.");
        return Ok(());
    }

    println!();
    for (category, amount) in adjustment.iter() {
        println!("{:<32}{:>18}", category.label(), format_inr(amount));
    }
    let total = adjustment.iter().map(|(_, amount)| amount).sum();
    println!("{:<32}{:>18}", "Total", format_inr(total));

    Ok(())
}
