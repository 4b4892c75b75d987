use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::util::clean_word;

/// Shape of a set of transaction descriptions, used when tuning rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptionStats {
    pub total_descriptions: usize,
    /// Mean length in bytes.
    pub average_length: f64,
    pub average_word_count: f64,
    /// Cleaned words longer than one character and how often they appear.
    pub common_words: BTreeMap<String, usize>,
}

impl DescriptionStats {
    /// The `n` most frequent words, most frequent first, ties alphabetical.
    pub fn top_words(&self, n: usize) -> Vec<(&str, usize)> {
        let mut words: Vec<(&str, usize)> = self
            .common_words
            .iter()
            .map(|(w, c)| (w.as_str(), *c))
            .collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        words.truncate(n);
        words
    }
}

pub fn analyze_descriptions<S: AsRef<str>>(descriptions: &[S]) -> DescriptionStats {
    let mut stats = DescriptionStats {
        total_descriptions: descriptions.len(),
        ..Default::default()
    };
    if descriptions.is_empty() {
        return stats;
    }

    let mut total_length = 0usize;
    let mut total_words = 0usize;
    for description in descriptions {
        let description = description.as_ref();
        total_length += description.len();

        for word in description.split_whitespace() {
            total_words += 1;
            let word = clean_word(word);
            if word.chars().count() > 1 {
                *stats.common_words.entry(word).or_insert(0) += 1;
            }
        }
    }

    let n = descriptions.len() as f64;
    stats.average_length = total_length as f64 / n;
    stats.average_word_count = total_words as f64 / n;
    stats
}
