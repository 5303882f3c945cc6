//! Integration tests that drive the estimator through its library API with
//! the on-disk fixtures.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_cli::app::{self, InputOverrides};
use tax_cli::profile::{self, Profile};
use tax_cli::render::{self, OutputFormat};
use tax_core::{DeductionCategory, EmploymentType, Regime, RegimeRules};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()
}

#[test]
fn test_profile_fixture_loads() {
    let profile = Profile::load(&fixture_path("profile.toml")).expect("profile should load");

    assert_eq!(profile.annual_income, Some(dec!(1200000)));
    assert_eq!(profile.employment_type, Some(EmploymentType::Salaried));
    assert_eq!(profile.deductions.hra_exemption, dec!(180000));
}

#[test]
fn test_profile_only_estimate() {
    let profile = Profile::load(&fixture_path("profile.toml")).unwrap();
    let input = app::build_input(&profile, &InputOverrides::default(), &Default::default());

    let report = app::run_estimate(input, &RegimeRules::default(), date()).unwrap();

    // 120000 + 25000 + 180000 + 50000 standard
    assert_eq!(report.comparison.old_regime.total_deductions, dec!(375000));
    assert_eq!(report.comparison.old_regime.taxable_income, dec!(825000));
    // 12500 + 325000 * 0.20 = 77500, plus 3100 cess
    assert_eq!(report.comparison.old_regime.total_tax, dec!(80600));
    // 15000 + 30000 + 250000 * 0.15 = 82500, plus 3300 cess
    assert_eq!(report.comparison.new_regime.total_tax, dec!(85800));
    assert_eq!(report.comparison.recommended_regime, Regime::Old);
    assert_eq!(report.comparison.savings, dec!(-5200));
}

#[test]
fn test_receipts_widen_the_old_regime_lead() {
    let profile = Profile::load(&fixture_path("profile.toml")).unwrap();
    let imports = app::load_imports(&[fixture_path("receipts.csv")], None).unwrap();

    assert_eq!(
        imports.adjustment.get(DeductionCategory::HomeLoanInterest),
        dec!(160000)
    );

    let input = app::build_input(&profile, &InputOverrides::default(), &imports);
    let report = app::run_estimate(input, &RegimeRules::default(), date()).unwrap();

    // 80C 150000 (capped) + 80D 25000 + HRA 180000 + 80G 10000
    // + home loan 160000 + standard 50000
    assert_eq!(report.comparison.old_regime.total_deductions, dec!(575000));
    assert_eq!(report.comparison.old_regime.taxable_income, dec!(625000));
    // 12500 + 125000 * 0.20 = 37500, plus 1500 cess
    assert_eq!(report.comparison.old_regime.total_tax, dec!(39000));
    assert_eq!(report.comparison.recommended_regime, Regime::Old);
    assert_eq!(report.comparison.savings_magnitude(), dec!(46800));
}

#[test]
fn test_rules_fixture_changes_new_regime() {
    let rules = profile::load_rules(&fixture_path("rules.toml")).expect("rules should load");
    let profile = Profile::load(&fixture_path("profile.toml")).unwrap();
    let input = app::build_input(&profile, &InputOverrides::default(), &Default::default());

    let report = app::run_estimate(input, &rules, date()).unwrap();

    assert_eq!(report.comparison.new_regime.total_deductions, dec!(75000));
    assert_eq!(report.comparison.new_regime.taxable_income, dec!(1125000));
    assert_eq!(report.comparison.new_regime.total_tax, dec!(0));
    assert_eq!(report.comparison.recommended_regime, Regime::New);
}

#[test]
fn test_overrides_beat_profile() {
    let profile = Profile::load(&fixture_path("profile.toml")).unwrap();
    let overrides = InputOverrides {
        annual_income: Some(dec!(600000)),
        deductions: vec![(DeductionCategory::HraExemption, dec!(0))],
        ..Default::default()
    };

    let input = app::build_input(&profile, &overrides, &Default::default());

    assert_eq!(input.annual_income, dec!(600000));
    assert_eq!(input.deductions.hra_exemption, dec!(0));
    assert_eq!(input.deductions.section_80c, dec!(120000));
}

#[test]
fn test_export_documents() {
    let profile = Profile::load(&fixture_path("profile.toml")).unwrap();
    let input = app::build_input(&profile, &InputOverrides::default(), &Default::default());
    let report = app::run_estimate(input, &RegimeRules::default(), date()).unwrap();

    let format = OutputFormat::for_path(Path::new("summary.json"));
    let json = render::summary_document(&report.summary, format).unwrap();
    let text = render::summary_document(&report.summary, OutputFormat::Text).unwrap();

    assert!(json.trim_start().starts_with('{'));
    assert!(json.contains("\"recommended_regime\": \"old\""));
    assert!(text.contains("Generated on: 01/04/2026"));
    assert!(text.contains("The Old Regime saves you ₹5,200.00 compared to the New Regime."));
}

#[test]
fn test_missing_receipts_file_is_an_error() {
    let err = app::load_imports(&[fixture_path("does-not-exist.csv")], None).unwrap_err();

    assert!(err.to_string().contains("does-not-exist.csv"));
}
