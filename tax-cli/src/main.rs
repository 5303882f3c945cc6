use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use rust_decimal::Decimal;
use tax_core::{AgeBracket, DeductionCategory, EmploymentType, Regime, RegimeRules};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tax_cli::app::{self, InputOverrides};
use tax_cli::profile::{self, Profile};
use tax_cli::render::{self, OutputFormat};
use tax_cli::utils::{parse_age_bracket, parse_decimal, parse_employment_type, parse_regime};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Old vs New regime income tax estimator.
///
/// Computes the liability under both regimes from a profile file, flags,
/// imported receipts and bank statements, then recommends the cheaper one.
#[derive(Debug, Parser)]
#[command(name = "tax-estimator", version)]
struct Cli {
    /// TOML profile with income, employment type, age bracket and deductions.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Annual gross income. Commas are allowed (e.g. `15,00,000`).
    #[arg(long, value_parser = parse_decimal)]
    income: Option<Decimal>,

    /// salaried, self-employed, business or freelancer.
    #[arg(long, value_parser = parse_employment_type)]
    employment: Option<EmploymentType>,

    /// below60, 60to80 or above80.
    #[arg(long, value_parser = parse_age_bracket)]
    age_bracket: Option<AgeBracket>,

    #[arg(long, value_parser = parse_decimal)]
    section_80c: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    section_80d: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    section_80g: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    home_loan_interest: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    education_loan_interest: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    hra_exemption: Option<Decimal>,

    #[arg(long, value_parser = parse_decimal)]
    nps: Option<Decimal>,

    /// Receipt CSV (`date,vendor,amount,tax_section`). Repeatable.
    #[arg(long)]
    receipts: Vec<PathBuf>,

    /// Bank statement CSV (`date,narration,debit,credit`).
    #[arg(long)]
    bank_statement: Option<PathBuf>,

    /// TOML file overriding the built-in regime rules.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// The regime you currently file under.
    #[arg(long, value_parser = parse_regime)]
    regime: Option<Regime>,

    /// Output format for stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the summary document here (JSON when the name ends in `.json`).
    #[arg(long)]
    export: Option<PathBuf>,

    /// Log calculation steps.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> InputOverrides {
        let deductions = [
            (DeductionCategory::Section80C, self.section_80c),
            (DeductionCategory::Section80D, self.section_80d),
            (DeductionCategory::Section80G, self.section_80g),
            (DeductionCategory::HomeLoanInterest, self.home_loan_interest),
            (
                DeductionCategory::EducationLoanInterest,
                self.education_loan_interest,
            ),
            (DeductionCategory::HraExemption, self.hra_exemption),
            (DeductionCategory::Nps, self.nps),
        ]
        .into_iter()
        .filter_map(|(category, amount)| amount.map(|amount| (category, amount)))
        .collect();

        InputOverrides {
            annual_income: self.income,
            employment_type: self.employment,
            age_bracket: self.age_bracket,
            deductions,
        }
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info`, or `debug` with `--verbose`.
/// * Strips timestamps and target names and writes to stderr so stdout
///   stays parseable.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let profile = match &cli.profile {
        Some(path) => Profile::load(path)
            .with_context(|| format!("Failed to load profile: {}", path.display()))?,
        None => Profile::default(),
    };

    let rules = match &cli.rules {
        Some(path) => profile::load_rules(path)
            .with_context(|| format!("Failed to load rules: {}", path.display()))?,
        None => RegimeRules::default(),
    };

    let imports = app::load_imports(&cli.receipts, cli.bank_statement.as_deref())?;
    let input = app::build_input(&profile, &cli.overrides(), &imports);

    let report = app::run_estimate(input, &rules, Local::now().date_naive())?;
    info!(
        recommended = report.comparison.recommended_regime.as_str(),
        "estimate ready"
    );

    let output = render::render(&report, cli.format, cli.regime)?;
    println!("{output}");

    if let Some(path) = &cli.export {
        let format = OutputFormat::for_path(path);
        debug!(path = %path.display(), ?format, "exporting summary");
        let document = render::summary_document(&report.summary, format)?;
        fs::write(path, document)
            .with_context(|| format!("Failed to write summary: {}", path.display()))?;
        info!(path = %path.display(), "summary exported");
    }

    Ok(())
}
