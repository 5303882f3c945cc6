//! Import adapters that turn receipts and bank statements into deduction
//! adjustments for the estimator.

mod bank_statement;
mod fields;
mod receipts;
mod section;

pub use bank_statement::{
    BankStatementError, BankStatementImport, BankStatementLoader, BankTransaction,
    NarrationClassifier,
};
pub use receipts::{ReceiptLoader, ReceiptLoaderError, ReceiptRecord};
pub use section::category_for_section;
