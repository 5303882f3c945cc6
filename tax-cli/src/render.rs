//! Text and JSON output for a finished [`Report`].

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::calculations::common::round_half_up;
use tax_core::report::{ChartSegment, TaxSummary, deduction_breakdown, format_inr, tax_breakdown};
use tax_core::{ComparisonResult, Regime, RegimeResult, TaxInput};

use crate::app::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// JSON for a `.json` extension, text for anything else.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    input: &'a TaxInput,
    comparison: &'a ComparisonResult,
    tax_breakdown: Vec<ChartSegment>,
    deduction_breakdown: Vec<ChartSegment>,
    summary: &'a TaxSummary,
}

pub fn render(
    report: &Report,
    format: OutputFormat,
    current_regime: Option<Regime>,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(report, current_regime)),
        OutputFormat::Json => render_json(report),
    }
}

pub fn render_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        input: &report.input,
        comparison: &report.comparison,
        tax_breakdown: tax_breakdown(&report.comparison),
        deduction_breakdown: deduction_breakdown(
            &report.input.deductions,
            report.standard_deduction,
        ),
        summary: &report.summary,
    })
}

/// The summary document written by `--export`.
pub fn summary_document(
    summary: &TaxSummary,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(format!("{summary}\n")),
        OutputFormat::Json => serde_json::to_string_pretty(summary),
    }
}

/// Plain-text rendering of a [`Report`]: both breakdowns, the
/// recommendation, then the two charts.
pub struct TextReport<'a> {
    report: &'a Report,
    current_regime: Option<Regime>,
}

impl<'a> TextReport<'a> {
    pub fn new(
        report: &'a Report,
        current_regime: Option<Regime>,
    ) -> Self {
        Self {
            report,
            current_regime,
        }
    }

    fn recommendation(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let comparison = &self.report.comparison;
        let recommended = comparison.recommended_regime;

        if comparison.is_tie() {
            writeln!(f, "Both Regimes Equal")?;
        } else {
            writeln!(
                f,
                "{} Saves You {}",
                recommended.label(),
                format_inr(comparison.savings_magnitude())
            )?;
        }
        writeln!(f, "Recommended: {}", recommended.label())?;
        writeln!(f, "{}", self.report.summary.recommendation)?;

        match self.current_regime {
            Some(current) if current == recommended => {
                writeln!(f, "You already file under the {}.", current.label())?;
            }
            Some(current) => {
                writeln!(
                    f,
                    "You currently file under the {}; switching would save {}.",
                    current.label(),
                    format_inr(comparison.savings_magnitude())
                )?;
            }
            None => {}
        }
        writeln!(f)
    }
}

fn amount_row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    amount: &str,
) -> fmt::Result {
    writeln!(f, "  {:<30}{:>18}", label, amount)
}

fn breakdown(
    f: &mut fmt::Formatter<'_>,
    regime: Regime,
    result: &RegimeResult,
) -> fmt::Result {
    let deduction_label = match regime {
        Regime::Old => "Total Deductions:",
        Regime::New => "Standard Deduction:",
    };
    let effective_rate = round_half_up(result.effective_rate() * Decimal::ONE_HUNDRED);

    writeln!(f, "{} Breakdown", regime.label())?;
    amount_row(f, "Gross Income:", &format_inr(result.gross_income))?;
    amount_row(
        f,
        deduction_label,
        &format!("-{}", format_inr(result.total_deductions)),
    )?;
    amount_row(f, "Taxable Income:", &format_inr(result.taxable_income))?;
    amount_row(f, "Income Tax:", &format_inr(result.income_tax))?;
    amount_row(f, "Health & Education Cess:", &format_inr(result.cess))?;
    amount_row(f, "Total Tax:", &format_inr(result.total_tax))?;
    amount_row(f, "Effective Tax Rate:", &format!("{effective_rate:.2}%"))?;
    writeln!(f)
}

fn chart(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    segments: &[ChartSegment],
    total: Decimal,
) -> fmt::Result {
    writeln!(f, "{title}")?;
    for segment in segments {
        writeln!(
            f,
            "  {:<30}{:>18}{:>9}%",
            segment.label,
            format_inr(segment.amount),
            segment.percent_of(total).to_string()
        )?;
    }
    writeln!(f)
}

impl fmt::Display for TextReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let report = self.report;
        let comparison = &report.comparison;
        let recommended = comparison.recommended_regime;

        breakdown(f, Regime::Old, &comparison.old_regime)?;
        breakdown(f, Regime::New, &comparison.new_regime)?;
        self.recommendation(f)?;

        chart(
            f,
            &format!("Tax Distribution ({})", recommended.label()),
            &tax_breakdown(comparison),
            comparison.recommended_result().gross_income,
        )?;

        let claimed = report
            .input
            .deductions
            .total_claimed()
            .saturating_add(report.standard_deduction);
        chart(
            f,
            "Deductions Claimed",
            &deduction_breakdown(&report.input.deductions, report.standard_deduction),
            claimed,
        )?;
        write!(f, "Total Deductions: {}", format_inr(claimed))
    }
}

pub fn render_text(
    report: &Report,
    current_regime: Option<Regime>,
) -> String {
    TextReport::new(report, current_regime).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::{AgeBracket, Deductions, EmploymentType, RegimeRules};

    use super::*;
    use crate::app::run_estimate;

    fn report(input: TaxInput) -> Report {
        run_estimate(
            input,
            &RegimeRules::default(),
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
        )
        .unwrap()
    }

    fn old_favoured() -> Report {
        report(TaxInput::new(
            dec!(1000000),
            EmploymentType::Salaried,
            AgeBracket::BelowSixty,
            Deductions {
                section_80c: dec!(150000),
                section_80d: dec!(25000),
                home_loan_interest: dec!(200000),
                ..Default::default()
            },
        ))
    }

    #[test]
    fn output_format_follows_extension() {
        assert_eq!(OutputFormat::for_path(Path::new("out.json")), OutputFormat::Json);
        assert_eq!(OutputFormat::for_path(Path::new("OUT.JSON")), OutputFormat::Json);
        assert_eq!(OutputFormat::for_path(Path::new("out.txt")), OutputFormat::Text);
        assert_eq!(OutputFormat::for_path(Path::new("summary")), OutputFormat::Text);
    }

    #[test]
    fn text_shows_both_breakdowns_and_recommendation() {
        let text = render_text(&old_favoured(), None);

        assert!(text.contains("Old Regime Breakdown"));
        assert!(text.contains("New Regime Breakdown"));
        assert!(text.contains("₹28,600.00"));
        assert!(text.contains("₹54,600.00"));
        assert!(text.contains("Old Regime Saves You ₹26,000.00"));
        assert!(text.contains("Recommended: Old Regime"));
        assert!(text.contains("Tax Distribution (Old Regime)"));
        assert!(text.contains("80C (EPF, ELSS)"));
        assert!(text.ends_with("Total Deductions: ₹4,25,000.00"));
    }

    #[test]
    fn text_shows_effective_rates() {
        let text = render_text(&old_favoured(), None);

        // 28600 and 54600 of 10,00,000
        assert!(text.contains("Effective Tax Rate:"));
        assert!(text.contains("2.86%"));
        assert!(text.contains("5.46%"));
    }

    #[test]
    fn text_survives_saturated_claims() {
        let report = report(TaxInput::new(
            dec!(1000000),
            EmploymentType::Salaried,
            AgeBracket::BelowSixty,
            Deductions {
                section_80g: Decimal::MAX,
                education_loan_interest: Decimal::MAX,
                ..Default::default()
            },
        ));

        let text = render_text(&report, None);

        assert_eq!(report.comparison.old_regime.total_tax, dec!(0));
        assert!(text.contains("Recommended: Old Regime"));
        assert!(text.ends_with(&format!("Total Deductions: {}", format_inr(Decimal::MAX))));
    }

    #[test]
    fn text_notes_current_regime() {
        let report = old_favoured();

        let same = render_text(&report, Some(Regime::Old));
        let other = render_text(&report, Some(Regime::New));

        assert!(same.contains("You already file under the Old Regime."));
        assert!(other.contains("switching would save ₹26,000.00"));
    }

    #[test]
    fn text_on_tie() {
        let text = render_text(
            &report(TaxInput {
                annual_income: dec!(500000),
                ..Default::default()
            }),
            None,
        );

        assert!(text.contains("Both Regimes Equal"));
        assert!(text.contains("Recommended: New Regime"));
    }

    #[test]
    fn json_contains_every_section() {
        let json = render_json(&old_favoured()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["comparison"]["recommended_regime"], "old");
        assert_eq!(value["tax_breakdown"][0]["label"], "Income Tax");
        assert_eq!(value["deduction_breakdown"].as_array().map(Vec::len), Some(8));
        assert_eq!(value["summary"]["tips"].as_array().map(Vec::len), Some(5));
        assert_eq!(value["input"]["employment_type"], "salaried");
    }

    #[test]
    fn summary_document_matches_format() {
        let report = old_favoured();

        let text = summary_document(&report.summary, OutputFormat::Text).unwrap();
        let json = summary_document(&report.summary, OutputFormat::Json).unwrap();

        assert!(text.starts_with("Tax Regime Estimate\n"));
        assert!(text.ends_with("For informational purposes only.\n"));
        let parsed: TaxSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report.summary);
    }
}
