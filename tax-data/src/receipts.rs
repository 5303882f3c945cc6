//! Receipt CSV loader.
//!
//! ## CSV Format
//!
//! | Column | Type | Notes |
//! |---------------|---------|--------------------------------------------|
//! | `date` | date | `2025-06-14`, `14/06/2025` or `14-06-2025` |
//! | `vendor` | string | Free text |
//! | `amount` | decimal | Must not be negative |
//! | `tax_section` | string | Statutory section, e.g. `80C`, `24`, `80D` |
//!
//! ```csv
//! date,vendor,amount,tax_section
//! 2025-06-14,LIC of India,24000,80C
//! 2025-07-02,Star Health,18500.50,80D
//! ```

use std::io::Read;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{DeductionAdjustment, DeductionCategory};
use thiserror::Error;
use tracing::{debug, warn};

use crate::fields::deserialize_date;
use crate::section::category_for_section;

/// Errors that can occur when loading receipts.
#[derive(Debug, Error, PartialEq)]
pub enum ReceiptLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    /// `row` is 1-based, not counting the header.
    #[error("receipt on row {row} has negative amount {amount}")]
    NegativeAmount { row: usize, amount: Decimal },
}

impl From<csv::Error> for ReceiptLoaderError {
    fn from(err: csv::Error) -> Self {
        ReceiptLoaderError::CsvParse(err.to_string())
    }
}

/// A single receipt row.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReceiptRecord {
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub vendor: String,
    pub amount: Decimal,
    pub tax_section: String,
}

impl ReceiptRecord {
    /// The deduction category this receipt counts towards, if its section is
    /// recognised.
    pub fn category(&self) -> Option<DeductionCategory> {
        category_for_section(&self.tax_section)
    }
}

pub struct ReceiptLoader;

impl ReceiptLoader {
    /// Parse receipt records from a CSV reader.
    ///
    /// Rows are returned in file order. Whitespace around values is ignored.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ReceiptRecord>, ReceiptLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (idx, result) in csv_reader.deserialize().enumerate() {
            let record: ReceiptRecord = result?;
            if record.amount < Decimal::ZERO {
                return Err(ReceiptLoaderError::NegativeAmount {
                    row: idx + 1,
                    amount: record.amount,
                });
            }
            records.push(record);
        }

        debug!(count = records.len(), "parsed receipts");
        Ok(records)
    }

    /// Sums receipt amounts per deduction category.
    ///
    /// Receipts whose section is not recognised are skipped with a warning.
    pub fn to_adjustment(records: &[ReceiptRecord]) -> DeductionAdjustment {
        let mut adjustment = DeductionAdjustment::new();

        for record in records {
            match record.category() {
                Some(category) => adjustment.add(category, record.amount),
                None => warn!(
                    vendor = %record.vendor,
                    section = %record.tax_section,
                    amount = %record.amount,
                    "skipping receipt with unrecognised tax section"
                ),
            }
        }

        adjustment
    }

    /// Parses `reader` and sums the receipts in one step.
    pub fn load<R: Read>(reader: R) -> Result<DeductionAdjustment, ReceiptLoaderError> {
        let records = Self::parse(reader)?;
        Ok(Self::to_adjustment(&records))
    }
}
