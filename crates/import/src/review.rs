use kauri_core::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rules::{Category, ClassifiedTransaction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub count: usize,
    pub total_amount: Money,
    pub average_amount: Money,
    pub average_confidence: f32,
}

/// Classifications with confidence strictly below `threshold`.
pub fn needs_review(items: &[ClassifiedTransaction], threshold: f32) -> Vec<ClassifiedTransaction> {
    items
        .iter()
        .filter(|item| item.confidence < threshold)
        .cloned()
        .collect()
}

pub fn by_category(items: &[ClassifiedTransaction], category: Category) -> Vec<ClassifiedTransaction> {
    items
        .iter()
        .filter(|item| item.category == category)
        .cloned()
        .collect()
}

/// Per-category totals. Categories with no transactions are absent.
pub fn category_stats(items: &[ClassifiedTransaction]) -> BTreeMap<Category, CategoryStats> {
    let mut sums: BTreeMap<Category, (usize, Money, f32)> = BTreeMap::new();
    for item in items {
        let (count, total, confidence) = sums.entry(item.category).or_default();
        *count += 1;
        *total += item.amount;
        *confidence += item.confidence;
    }

    sums.into_iter()
        .map(|(category, (count, total_amount, confidence))| {
            let stats = CategoryStats {
                count,
                total_amount,
                average_amount: Money::mean(total_amount, count),
                average_confidence: confidence / count as f32,
            };
            (category, stats)
        })
        .collect()
}
