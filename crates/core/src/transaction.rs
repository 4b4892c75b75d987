use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::money::Money;

/// Columns in a statement export:
/// `Type,Details,Particulars,Code,Reference,Amount,Date,ForeignCurrencyAmount,ConversionCharge`
pub const FIELD_COUNT: usize = 9;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One CSV line after header removal.
pub type RawRow = Vec<String>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed row: expected {expected} fields, found {0}", expected = FIELD_COUNT)]
    MalformedRow(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_type: String,
    pub details: String,
    pub particulars: String,
    pub code: String,
    pub reference: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub foreign_currency_amount: String,
    pub conversion_charge: String,
}

impl Transaction {
    /// Text used for classification: details, then the code when present.
    pub fn description(&self) -> String {
        let code = self.code.trim();
        if code.is_empty() {
            self.details.clone()
        } else {
            format!("{} {}", self.details, code)
        }
    }
}

/// Date assigned when the statement date cannot be read (1970-01-01).
pub fn epoch() -> NaiveDate {
    NaiveDate::default()
}

/// Only `DD/MM/YYYY` with zero-padded day and month and a four digit year
/// is accepted; chrono alone would read `01/03/24` as the year 24.
fn has_date_shape(s: &str) -> bool {
    let parts: Vec<&str> = s.split('/').collect();
    matches!(parts.as_slice(), [d, m, y]
        if d.len() == 2 && m.len() == 2 && y.len() == 4
            && parts.iter().all(|p| p.bytes().all(|b| b.is_ascii_digit())))
}

fn parse_date(s: &str) -> NaiveDate {
    let s = s.trim();
    if !has_date_shape(s) {
        return epoch();
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap_or_else(|_| epoch())
}

/// Builds a transaction from one row. Extra trailing fields are ignored.
pub fn parse_row<S: AsRef<str>>(row: &[S]) -> Result<Transaction, ParseError> {
    if row.len() < FIELD_COUNT {
        return Err(ParseError::MalformedRow(row.len()));
    }
    let field = |i: usize| row[i].as_ref().to_string();

    Ok(Transaction {
        transaction_type: field(0),
        details: field(1),
        particulars: field(2),
        code: field(3),
        reference: field(4),
        amount: Money::parse_or_zero(row[5].as_ref()),
        date: parse_date(row[6].as_ref()),
        foreign_currency_amount: field(7),
        conversion_charge: field(8),
    })
}

/// Parses every row, returning the transactions in input order alongside
/// the index and error of each rejected row.
pub fn parse_rows_with_errors<R: AsRef<[String]>>(
    rows: &[R],
) -> (Vec<Transaction>, Vec<(usize, ParseError)>) {
    let mut transactions = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        match parse_row(row.as_ref()) {
            Ok(tx) => transactions.push(tx),
            Err(e) => errors.push((idx, e)),
        }
    }

    (transactions, errors)
}

/// Parses every row, logging and dropping the ones that are malformed.
pub fn parse_rows<R: AsRef<[String]>>(rows: &[R]) -> Vec<Transaction> {
    let (transactions, errors) = parse_rows_with_errors(rows);
    for (idx, e) in &errors {
        tracing::warn!(row = idx, "Skipping row: {e}");
    }
    tracing::debug!(
        parsed = transactions.len(),
        skipped = errors.len(),
        "Built transactions"
    );
    transactions
}
