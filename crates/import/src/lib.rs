pub mod analysis;
pub mod csv;
pub mod ingest;
pub mod review;
pub mod rules;
pub(crate) mod util;

pub use analysis::{analyze_descriptions, DescriptionStats};
pub use crate::csv::{FileRows, IngestError};
pub use review::{by_category, category_stats, needs_review, CategoryStats};
pub use rules::{Category, CategoryRules, ClassifiedTransaction, Classifier, CustomRule, RuleError};

pub mod import {
    use std::path::PathBuf;
    use std::time::Duration;

    use kauri_core::Transaction;

    use crate::*;

    /// Reads every statement file and parses its rows into transactions.
    pub async fn read_transactions(paths: &[PathBuf], timeout: Option<Duration>) -> Vec<Transaction> {
        let rows = crate::ingest::read_files(paths, timeout).await;
        kauri_core::parse_rows(&rows)
    }

    pub fn create_classifier(custom_rules: &[CustomRule]) -> Result<Classifier, RuleError> {
        let rules = CategoryRules::default().with_custom_rules(custom_rules)?;
        Ok(Classifier::new(rules))
    }

    pub fn classify_transactions(classifier: &Classifier, transactions: &[Transaction]) -> Vec<ClassifiedTransaction> {
        let descriptions: Vec<String> = transactions.iter().map(Transaction::description).collect();
        let amounts: Vec<_> = transactions.iter().map(|t| t.amount).collect();
        classifier.classify_all(&descriptions, &amounts)
    }

}
