use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use super::money::Money;
use super::period::DateRange;
use super::transaction::Transaction;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SummaryError {
    #[error("Cannot summarise an empty set of transactions")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub number_of_accounts: Option<usize>,
    pub total_amount_spent: Money,
    pub total_amount_received: Money,
    pub number_of_transactions: usize,
    pub period: DateRange,
}

impl Summary {
    /// Spent plus received: the algebraic sum of every amount.
    pub fn net(&self) -> Money {
        self.total_amount_spent + self.total_amount_received
    }
}

/// Summarises a batch of transactions.
///
/// `total_amount_spent` keeps its negative sign. The period is the earliest
/// and latest transaction date, independent of the order the batch arrived in.
pub fn build_summary(
    transactions: &[Transaction],
    number_of_accounts: Option<usize>,
) -> Result<Summary, SummaryError> {
    let period = DateRange::spanning(transactions.iter().map(|t| t.date)).ok_or(SummaryError::Empty)?;

    let total_amount_spent = transactions
        .iter()
        .map(|t| t.amount)
        .filter(|a| a.is_negative())
        .sum();
    let total_amount_received = transactions
        .iter()
        .map(|t| t.amount)
        .filter(|a| a.is_positive())
        .sum();

    Ok(Summary {
        number_of_accounts,
        total_amount_spent,
        total_amount_received,
        number_of_transactions: transactions.len(),
        period,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupKind {
    Income,
    Expense,
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKind::Income => write!(f, "Income"),
            GroupKind::Expense => write!(f, "Expense"),
        }
    }
}

/// Bank transaction types and whether they bring money in or send it out.
pub const TRANSACTION_GROUP_MAPPINGS: &[(&str, GroupKind)] = &[
    ("Direct Credit", GroupKind::Income),
    ("Visa Refund", GroupKind::Income),
    ("Automatic Payment", GroupKind::Income),
    ("Transfer", GroupKind::Income),
    ("Payment", GroupKind::Income),
    ("Bank Fee", GroupKind::Expense),
    ("Debit Interest", GroupKind::Expense),
    ("Atm Debit", GroupKind::Expense),
    ("ATM Cash Deposit", GroupKind::Income),
    ("Eft-Pos", GroupKind::Expense),
    ("Bill Payment", GroupKind::Expense),
    ("Deposit", GroupKind::Income),
    ("Loan Payment", GroupKind::Expense),
    ("EFTPOS", GroupKind::Expense),
    ("Visa Purchase", GroupKind::Expense),
    ("Direct Debit", GroupKind::Expense),
];

/// Exact, case-sensitive lookup. Unknown types have no kind.
pub fn group_kind(transaction_type: &str) -> Option<GroupKind> {
    TRANSACTION_GROUP_MAPPINGS
        .iter()
        .find(|(name, _)| *name == transaction_type)
        .map(|(_, kind)| *kind)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionGroup {
    pub name: String,
    pub kind: Option<GroupKind>,
    pub amount: Money,
    pub number_of_transactions: usize,
}

/// One rollup per distinct transaction type, ordered by type name.
pub fn group_by_type(transactions: &[Transaction]) -> Vec<TransactionGroup> {
    let mut grouped: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for tx in transactions {
        grouped.entry(tx.transaction_type.as_str()).or_default().push(tx);
    }

    grouped
        .into_iter()
        .map(|(name, txs)| TransactionGroup {
            name: name.to_string(),
            kind: group_kind(name),
            amount: txs.iter().map(|t| t.amount).sum(),
            number_of_transactions: txs.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::parse_row;
    use chrono::NaiveDate;

    fn tx(kind: &str, details: &str, amount: &str, date: &str) -> Transaction {
        parse_row(&[kind, details, "", "", "", amount, date, "", ""]).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("Visa Purchase", "Countdown Supermarket", "-45.30", "05/03/2024"),
            tx("Direct Credit", "Salary", "2000.00", "01/03/2024"),
            tx("Visa Purchase", "Z Energy", "-80.10", "03/03/2024"),
            tx("Bank Fee", "Monthly fee", "-5.00", "28/02/2024"),
            tx("Mystery", "Unknown", "0", "02/03/2024"),
        ]
    }

    #[test]
    fn summary_of_salary_and_groceries() {
        let txs = vec![
            tx("Visa Purchase", "Countdown Supermarket", "-45.30", "01/03/2024"),
            tx("Direct Credit", "Salary", "2000.00", "01/03/2024"),
        ];
        let summary = build_summary(&txs, None).unwrap();
        assert_eq!(summary.total_amount_spent, Money::from_cents(-4530));
        assert_eq!(summary.total_amount_received, Money::from_cents(200_000));
        assert_eq!(summary.number_of_transactions, 2);
        assert_eq!(summary.period, DateRange::new(date(2024, 3, 1), date(2024, 3, 1)));
        assert_eq!(summary.number_of_accounts, None);
    }

    #[test]
    fn spent_plus_received_is_net_of_all_amounts() {
        let txs = sample();
        let summary = build_summary(&txs, Some(2)).unwrap();
        let net: Money = txs.iter().map(|t| t.amount).sum();
        assert_eq!(summary.net(), net);
        assert_eq!(summary.total_amount_spent, Money::from_cents(-13_040));
        assert_eq!(summary.number_of_accounts, Some(2));
    }

    #[test]
    fn sub_cent_debit_still_counts_as_spent() {
        let txs = vec![
            tx("Bank Fee", "Rounding", "-0.005", "01/03/2024"),
            tx("Bank Fee", "Rounding", "-0.005", "02/03/2024"),
        ];
        let summary = build_summary(&txs, None).unwrap();
        assert_eq!(summary.total_amount_spent, Money::from_cents(-1));
        assert!(summary.total_amount_received.is_zero());
    }

    #[test]
    fn short_year_date_decodes_to_epoch_not_year_24() {
        let mut txs = sample();
        txs.push(tx("Visa Purchase", "Bakery", "-4.50", "04/03/24"));
        let summary = build_summary(&txs, None).unwrap();
        assert_eq!(summary.period.start, crate::transaction::epoch());
        assert_eq!(summary.period.end, date(2024, 3, 5));
    }

    #[test]
    fn period_is_independent_of_order() {
        let mut txs = sample();
        let forward = build_summary(&txs, None).unwrap();
        txs.reverse();
        let backward = build_summary(&txs, None).unwrap();
        assert_eq!(forward.period, backward.period);
        assert_eq!(forward.period, DateRange::new(date(2024, 2, 28), date(2024, 3, 5)));
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert_eq!(build_summary(&[], Some(0)), Err(SummaryError::Empty));
    }

    #[test]
    fn group_kind_lookup() {
        assert_eq!(group_kind("Direct Credit"), Some(GroupKind::Income));
        assert_eq!(group_kind("EFTPOS"), Some(GroupKind::Expense));
        assert_eq!(group_kind("eftpos"), None);
        assert_eq!(group_kind("Mystery"), None);
    }

    #[test]
    fn groups_partition_by_type() {
        let groups = group_by_type(&sample());
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Bank Fee", "Direct Credit", "Mystery", "Visa Purchase"]);

        let visa = groups.iter().find(|g| g.name == "Visa Purchase").unwrap();
        assert_eq!(visa.kind, Some(GroupKind::Expense));
        assert_eq!(visa.number_of_transactions, 2);
        assert_eq!(visa.amount, Money::from_cents(-12_540));

        let mystery = groups.iter().find(|g| g.name == "Mystery").unwrap();
        assert_eq!(mystery.kind, None);
    }

    #[test]
    fn group_totals_agree_with_summary() {
        let txs = sample();
        let summary = build_summary(&txs, None).unwrap();
        let groups = group_by_type(&txs);

        let count: usize = groups.iter().map(|g| g.number_of_transactions).sum();
        let amount: Money = groups.iter().map(|g| g.amount).sum();
        assert_eq!(count, summary.number_of_transactions);
        assert_eq!(amount, summary.net());
    }

    #[test]
    fn group_kind_display() {
        assert_eq!(GroupKind::Income.to_string(), "Income");
        assert_eq!(GroupKind::Expense.to_string(), "Expense");
    }
}
