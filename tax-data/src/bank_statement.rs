//! Bank statement CSV loader.
//!
//! Debits are classified into deduction categories by matching their
//! narration against keyword patterns; credits whose narration looks like a
//! salary payment are summed into an annual income figure.
//!
//! ## CSV Format
//!
//! | Column | Type | Notes |
//! |-------------|---------|----------------------------------|
//! | `date` | date | Same formats as the receipt CSV |
//! | `narration` | string | Transaction description |
//! | `debit` | decimal | Leave cell empty when not a debit |
//! | `credit` | decimal | Leave cell empty when not a credit |
//!
//! ```csv
//! date,narration,debit,credit
//! 01/04/2025,SALARY APR ACME CORP,,125000
//! 05/04/2025,LIC PREMIUM POLICY 1234,12000,
//! ```

use std::io::Read;

use chrono::NaiveDate;
use regex::{Regex, RegexBuilder};
use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{DeductionAdjustment, DeductionCategory};
use thiserror::Error;
use tracing::{debug, info};

use crate::fields::deserialize_date;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum BankStatementError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    /// `row` is 1-based, not counting the header.
    #[error("transaction on row {row} has negative amount {amount}")]
    NegativeAmount { row: usize, amount: Decimal },

    #[error("invalid narration pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl From<csv::Error> for BankStatementError {
    fn from(err: csv::Error) -> Self {
        BankStatementError::CsvParse(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single statement line.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BankTransaction {
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub narration: String,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
}

/// What a statement contributed to an estimate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BankStatementImport {
    /// Sum of salary credits, or `None` when the statement had none.
    pub annual_income: Option<Decimal>,
    pub adjustment: DeductionAdjustment,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Narration patterns checked in order; the first match wins.
const DEFAULT_RULES: [(&str, DeductionCategory); 7] = [
    (
        r"\bhome\s*loan\b.*\binterest\b|\bhousing\s+loan\s+int",
        DeductionCategory::HomeLoanInterest,
    ),
    (
        r"\b(education|student)\s*loan\b",
        DeductionCategory::EducationLoanInterest,
    ),
    (r"\bnps\b|national\s+pension", DeductionCategory::Nps),
    (
        r"health\s*insurance|mediclaim|\bstar\s+health\b|\bmedical\s+insurance\b",
        DeductionCategory::Section80D,
    ),
    (
        r"\b(lic|ppf|elss|epf|vpf|sukanya|nsc)\b|life\s+insurance|tuition\s+fee",
        DeductionCategory::Section80C,
    ),
    (
        r"donation|pm\s*cares|charit",
        DeductionCategory::Section80G,
    ),
    (r"\b(house\s+)?rent\b", DeductionCategory::HraExemption),
];

const SALARY_PATTERN: &str = r"\bsal(ary)?\b|\bpayroll\b";

/// Case-insensitive narration matcher.
#[derive(Debug, Clone)]
pub struct NarrationClassifier {
    rules: Vec<(Regex, DeductionCategory)>,
    salary: Regex,
}

fn build_pattern(pattern: &str) -> Result<Regex, BankStatementError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| BankStatementError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

impl NarrationClassifier {
    /// Builds a classifier from `(pattern, category)` pairs and a salary
    /// pattern. Patterns are compiled case-insensitively.
    pub fn new(
        rules: &[(&str, DeductionCategory)],
        salary_pattern: &str,
    ) -> Result<Self, BankStatementError> {
        let rules = rules
            .iter()
            .map(|(pattern, category)| Ok((build_pattern(pattern)?, *category)))
            .collect::<Result<Vec<_>, BankStatementError>>()?;

        Ok(Self {
            rules,
            salary: build_pattern(salary_pattern)?,
        })
    }

    /// The built-in keyword rules.
    pub fn with_default_rules() -> Result<Self, BankStatementError> {
        Self::new(&DEFAULT_RULES, SALARY_PATTERN)
    }

    pub fn classify_debit(
        &self,
        narration: &str,
    ) -> Option<DeductionCategory> {
        self.rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(narration))
            .map(|(_, category)| *category)
    }

    pub fn is_salary(
        &self,
        narration: &str,
    ) -> bool {
        self.salary.is_match(narration)
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

pub struct BankStatementLoader;

impl BankStatementLoader {
    /// Parse statement lines from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BankTransaction>, BankStatementError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut transactions = Vec::new();

        for (idx, result) in csv_reader.deserialize().enumerate() {
            let transaction: BankTransaction = result?;
            let row = idx + 1;
            for amount in [transaction.debit, transaction.credit].into_iter().flatten() {
                if amount < Decimal::ZERO {
                    return Err(BankStatementError::NegativeAmount { row, amount });
                }
            }
            transactions.push(transaction);
        }

        debug!(count = transactions.len(), "parsed bank statement");
        Ok(transactions)
    }

    /// Classifies every transaction and totals the results.
    pub fn import(
        transactions: &[BankTransaction],
        classifier: &NarrationClassifier,
    ) -> BankStatementImport {
        let mut import = BankStatementImport::default();

        for transaction in transactions {
            if let Some(debit) = transaction.debit {
                match classifier.classify_debit(&transaction.narration) {
                    Some(category) => import.adjustment.add(category, debit),
                    None => debug!(narration = %transaction.narration, "unclassified debit"),
                }
            }
            if let Some(credit) = transaction.credit {
                if classifier.is_salary(&transaction.narration) {
                    *import.annual_income.get_or_insert(Decimal::ZERO) += credit;
                }
            }
        }

        info!(
            transactions = transactions.len(),
            categories = import.adjustment.len(),
            salary_found = import.annual_income.is_some(),
            "bank statement imported"
        );

        import
    }

    /// Parses `reader` and imports it with the built-in rules.
    pub fn load<R: Read>(reader: R) -> Result<BankStatementImport, BankStatementError> {
        let transactions = Self::parse(reader)?;
        let classifier = NarrationClassifier::with_default_rules()?;
        Ok(Self::import(&transactions, &classifier))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = "\
date,narration,debit,credit
01/04/2025,SALARY APR ACME CORP,,125000
05/04/2025,LIC PREMIUM POLICY 1234,12000,
07/04/2025,House Rent April,25000,
10/04/2025,UPI Swiggy,450,
01/05/2025,SALARY MAY ACME CORP,,125000
05/05/2025,Star Health Mediclaim,18000,
12/05/2025,HDFC Home Loan Interest EMI,30000,
15/05/2025,Donation to PM CARES,5000,
20/05/2025,NPS Tier 1 contribution,10000,
22/05/2025,Refund from Amazon,,1299
";

    fn classifier() -> NarrationClassifier {
        NarrationClassifier::with_default_rules().expect("default rules compile")
    }

    // -----------------------------------------------------------------------
    // parse
    // -----------------------------------------------------------------------

    #[test]
    fn test_parse_empty_cells_are_none() {
        let transactions =
            BankStatementLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(transactions.len(), 10);
        assert_eq!(
            transactions[0],
            BankTransaction {
                date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                narration: "SALARY APR ACME CORP".to_string(),
                debit: None,
                credit: Some(dec!(125000)),
            }
        );
        assert_eq!(transactions[1].debit, Some(dec!(12000)));
        assert_eq!(transactions[1].credit, None);
    }

    #[test]
    fn test_parse_rejects_negative_amount() {
        let csv = "date,narration,debit,credit\n01/04/2025,LIC,-100,";

        let err = BankStatementLoader::parse(csv.as_bytes()).expect_err("Should fail");

        assert_eq!(
            err,
            BankStatementError::NegativeAmount {
                row: 1,
                amount: dec!(-100),
            }
        );
    }

    #[test]
    fn test_parse_bad_decimal() {
        let csv = "date,narration,debit,credit\n01/04/2025,LIC,twelve,";

        let err = BankStatementLoader::parse(csv.as_bytes()).expect_err("Should fail");

        assert!(matches!(err, BankStatementError::CsvParse(_)));
    }

    // -----------------------------------------------------------------------
    // NarrationClassifier
    // -----------------------------------------------------------------------

    #[test]
    fn test_classify_debit_keywords() {
        let classifier = classifier();
        let cases = [
            ("LIC PREMIUM", Some(DeductionCategory::Section80C)),
            ("ppf deposit", Some(DeductionCategory::Section80C)),
            ("Axis ELSS SIP", Some(DeductionCategory::Section80C)),
            ("Mediclaim renewal", Some(DeductionCategory::Section80D)),
            ("Health Insurance premium", Some(DeductionCategory::Section80D)),
            ("Donation - CRY", Some(DeductionCategory::Section80G)),
            ("Home loan interest Q1", Some(DeductionCategory::HomeLoanInterest)),
            ("Education Loan EMI", Some(DeductionCategory::EducationLoanInterest)),
            ("NPS contribution", Some(DeductionCategory::Nps)),
            ("RENT JUNE", Some(DeductionCategory::HraExemption)),
            ("Swiggy order", None),
            ("Parental leave", None),
        ];

        for (narration, expected) in cases {
            assert_eq!(classifier.classify_debit(narration), expected, "{narration}");
        }
    }

    #[test]
    fn test_is_salary() {
        let classifier = classifier();

        assert!(classifier.is_salary("SALARY APR ACME"));
        assert!(classifier.is_salary("NEFT SAL CR"));
        assert!(classifier.is_salary("payroll credit"));
        assert!(!classifier.is_salary("Salad bar refund"));
    }

    #[test]
    fn test_custom_rules() {
        let classifier = NarrationClassifier::new(
            &[("gym", DeductionCategory::Section80D)],
            "stipend",
        )
        .expect("valid patterns");

        assert_eq!(
            classifier.classify_debit("GYM FEES"),
            Some(DeductionCategory::Section80D)
        );
        assert!(classifier.is_salary("Monthly STIPEND"));
        assert_eq!(classifier.classify_debit("LIC premium"), None);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = NarrationClassifier::new(&[("(unclosed", DeductionCategory::Nps)], "salary")
            .expect_err("Should fail");

        let BankStatementError::InvalidPattern { pattern, .. } = err else {
            panic!("Expected InvalidPattern error, got: {:?}", err);
        };
        assert_eq!(pattern, "(unclosed");
    }

    // -----------------------------------------------------------------------
    // import
    // -----------------------------------------------------------------------

    #[test]
    fn test_import_totals_categories_and_salary() {
        let transactions =
            BankStatementLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        let import = BankStatementLoader::import(&transactions, &classifier());

        assert_eq!(import.annual_income, Some(dec!(250000)));
        let adjustment = &import.adjustment;
        assert_eq!(adjustment.get(DeductionCategory::Section80C), dec!(12000));
        assert_eq!(adjustment.get(DeductionCategory::HraExemption), dec!(25000));
        assert_eq!(adjustment.get(DeductionCategory::Section80D), dec!(18000));
        assert_eq!(
            adjustment.get(DeductionCategory::HomeLoanInterest),
            dec!(30000)
        );
        assert_eq!(adjustment.get(DeductionCategory::Section80G), dec!(5000));
        assert_eq!(adjustment.get(DeductionCategory::Nps), dec!(10000));
        assert_eq!(adjustment.len(), 6);
    }

    #[test]
    fn test_import_without_salary_has_no_income() {
        let csv = "date,narration,debit,credit\n01/04/2025,LIC,100,\n02/04/2025,Refund,,50";

        let import = BankStatementLoader::load(csv.as_bytes()).expect("Failed to load");

        assert_eq!(import.annual_income, None);
        assert_eq!(import.adjustment.get(DeductionCategory::Section80C), dec!(100));
    }
}
