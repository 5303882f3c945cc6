//! Assembles an estimate from a profile, command-line overrides and imported
//! files, then runs it.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tax_core::report::TaxSummary;
use tax_core::{
    AgeBracket, ComparisonResult, DeductionAdjustment, DeductionCategory, EmploymentType,
    EstimateError, Regime, RegimeRules, TaxInput, estimate_with_rules,
};
use tax_data::{BankStatementLoader, ReceiptLoader};
use tracing::{debug, info};

use crate::profile::Profile;

/// Values given on the command line. Each one replaces the profile's value.
#[derive(Debug, Clone, Default)]
pub struct InputOverrides {
    pub annual_income: Option<Decimal>,
    pub employment_type: Option<EmploymentType>,
    pub age_bracket: Option<AgeBracket>,
    pub deductions: Vec<(DeductionCategory, Decimal)>,
}

/// Everything read from receipt and bank statement files.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Imports {
    /// Salary credits found in a bank statement.
    pub annual_income: Option<Decimal>,
    pub adjustment: DeductionAdjustment,
}

/// Reads every receipt file and the optional bank statement.
pub fn load_imports(
    receipts: &[PathBuf],
    bank_statement: Option<&Path>,
) -> Result<Imports> {
    let mut imports = Imports::default();

    for path in receipts {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let adjustment = ReceiptLoader::load(file)
            .with_context(|| format!("Failed to load receipts: {}", path.display()))?;
        info!(path = %path.display(), categories = adjustment.len(), "receipts imported");
        imports.adjustment.merge(&adjustment);
    }

    if let Some(path) = bank_statement {
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let statement = BankStatementLoader::load(file)
            .with_context(|| format!("Failed to import bank statement: {}", path.display()))?;
        imports.annual_income = statement.annual_income;
        imports.adjustment.merge(&statement.adjustment);
    }

    Ok(imports)
}

/// Combines the three input sources into one [`TaxInput`].
///
/// Overrides win over the profile. Imported deductions are added on top of
/// whatever was entered, and imported income is only used when neither the
/// profile nor the command line gave one. With no income anywhere the input
/// carries zero, which [`run_estimate`] rejects.
pub fn build_input(
    profile: &Profile,
    overrides: &InputOverrides,
    imports: &Imports,
) -> TaxInput {
    let entered_income = overrides.annual_income.or(profile.annual_income);
    let annual_income = match (entered_income, imports.annual_income) {
        (Some(income), _) => income,
        (None, Some(imported)) => {
            info!(income = %imported, "using salary credits from bank statement as income");
            imported
        }
        (None, None) => Decimal::ZERO,
    };

    let mut deductions = profile.deductions.clone();
    for (category, amount) in &overrides.deductions {
        deductions.set(*category, *amount);
    }

    let input = TaxInput::new(
        annual_income,
        overrides
            .employment_type
            .or(profile.employment_type)
            .unwrap_or_default(),
        overrides.age_bracket.or(profile.age_bracket).unwrap_or_default(),
        deductions,
    )
    .with_adjustment(&imports.adjustment);

    debug!(?input, "input assembled");
    input
}

/// A completed estimate and its exportable summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub input: TaxInput,
    pub comparison: ComparisonResult,
    pub summary: TaxSummary,
    /// Standard deduction the recommended regime granted.
    pub standard_deduction: Decimal,
}

pub fn run_estimate(
    input: TaxInput,
    rules: &RegimeRules,
    generated_on: NaiveDate,
) -> Result<Report, EstimateError> {
    let comparison = estimate_with_rules(&input, rules)?;
    let summary = TaxSummary::new(&input, &comparison, generated_on);
    let standard_deduction = match comparison.recommended_regime {
        Regime::New => rules.new.standard_deduction,
        Regime::Old if input.employment_type.is_salaried() => rules.old.standard_deduction,
        Regime::Old => Decimal::ZERO,
    };

    Ok(Report {
        input,
        comparison,
        summary,
        standard_deduction,
    })
}
