use kauri_core::Money;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::util::{clean_word, tokens_overlap};

pub const PATTERN_CONFIDENCE: f32 = 0.9;
pub const KEYWORD_CONFIDENCE: f32 = 0.6;
pub const FALLBACK_CONFIDENCE: f32 = 0.1;

/// Minimum share of description words that must hit a category's keywords.
pub const KEYWORD_THRESHOLD: f32 = 0.3;

/// Spending categories, declared in the order rules are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Utilities,
    Car,
    Hobbies,
    Shopping,
    Health,
    Entertainment,
    Transport,
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Utilities,
        Category::Car,
        Category::Hobbies,
        Category::Shopping,
        Category::Health,
        Category::Entertainment,
        Category::Transport,
        Category::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Utilities => "Utilities",
            Category::Car => "Car",
            Category::Hobbies => "Hobbies",
            Category::Shopping => "Shopping",
            Category::Health => "Health",
            Category::Entertainment => "Entertainment",
            Category::Transport => "Transport",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Category {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RuleError::UnknownCategory(s.to_string()))
    }
}

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),
    #[error("Invalid pattern for {category}: {source}")]
    InvalidPattern {
        category: Category,
        #[source]
        source: regex::Error,
    },
}

/// A user supplied pattern, as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomRule {
    pub category: String,
    pub pattern: String,
}

const DEFAULT_RULES: &[(Category, &[&str], &[&str])] = &[
    (
        Category::Food,
        &[
            "(restaurant|cafe|coffee|pizza|burger|mcdonalds|kfc|subway|starbucks|dominos)",
            "(grocery|supermarket|walmart|target|safeway|kroger|food|dining)",
            "(bar|pub|brewery|wine|liquor)",
        ],
        &["food", "eat", "restaurant", "cafe", "grocery", "dining", "meal"],
    ),
    (
        Category::Utilities,
        &[
            "(electric|electricity|gas|water|internet|phone|cable|utility)",
            "(verizon|att|comcast|spectrum|pg&e|edison)",
            "(heating|cooling|sewer|trash|garbage)",
        ],
        &["electric", "gas", "water", "internet", "phone", "utility", "bill"],
    ),
    (
        Category::Car,
        &[
            "(gas|gasoline|fuel|shell|chevron|exxon|bp|mobil)",
            "(car|auto|mechanic|repair|service|oil change|tire)",
            "(insurance|registration|dmv|parking|toll)",
        ],
        &["gas", "fuel", "car", "auto", "parking", "repair", "insurance"],
    ),
    (
        Category::Hobbies,
        &[
            "(hobby|craft|art|supplies|music|instrument|book|games)",
            "(amazon|ebay|etsy|hobby lobby|michaels)",
            "(photography|camera|sports|equipment|gym|fitness)",
        ],
        &["hobby", "craft", "art", "music", "book", "game", "sport", "gym"],
    ),
    (
        Category::Shopping,
        &[
            "(shopping|retail|store|mall|outlet|boutique)",
            "(clothing|shoes|fashion|apparel|department)",
            "(home|furniture|decoration|garden|hardware)",
        ],
        &["shop", "store", "retail", "buy", "purchase", "clothing", "shoes"],
    ),
    (
        Category::Health,
        &[
            "(doctor|medical|hospital|pharmacy|cvs|walgreens)",
            "(dental|dentist|health|medicine|prescription|clinic)",
            "(insurance|copay|deductible)",
        ],
        &["doctor", "medical", "pharmacy", "health", "dental", "medicine"],
    ),
    (
        Category::Entertainment,
        &[
            "(movie|cinema|theater|netflix|spotify|streaming)",
            "(concert|show|event|ticket|entertainment)",
            "(game|gaming|xbox|playstation|nintendo)",
        ],
        &["movie", "show", "concert", "game", "entertainment", "streaming"],
    ),
    (
        Category::Transport,
        &[
            "(uber|lyft|taxi|bus|train|subway|transit)",
            "(airline|flight|airport|travel|hotel)",
            "(rental|hertz|enterprise|avis)",
        ],
        &["transport", "travel", "uber", "taxi", "flight", "bus", "train"],
    ),
];

/// Patterns and keywords for one category.
#[derive(Debug)]
struct CategoryEntry {
    category: Category,
    patterns: Vec<Regex>,
    keywords: Vec<String>,
}

/// The category → rule table. Built up front, then handed to a [`Classifier`].
#[derive(Debug)]
pub struct CategoryRules {
    // One entry per category, in `Category::ALL` order.
    entries: Vec<CategoryEntry>,
}

impl CategoryRules {
    /// Every category with no patterns or keywords.
    pub fn empty() -> Self {
        let entries = Category::ALL
            .into_iter()
            .map(|category| CategoryEntry {
                category,
                patterns: Vec::new(),
                keywords: Vec::new(),
            })
            .collect();
        Self { entries }
    }

    /// Appends a pattern to the category's pattern tier. Patterns are
    /// matched case-insensitively and tried after the ones already present.
    pub fn add_custom_rule(&mut self, category: Category, pattern: &str) -> Result<&mut Self, RuleError> {
        let regex = compile(pattern).map_err(|source| RuleError::InvalidPattern { category, source })?;
        self.entry_mut(category).patterns.push(regex);
        Ok(self)
    }

    pub fn with_custom_rules(mut self, rules: &[CustomRule]) -> Result<Self, RuleError> {
        for rule in rules {
            let category = rule.category.parse()?;
            self.add_custom_rule(category, &rule.pattern)?;
        }
        Ok(self)
    }

    pub fn pattern_count(&self, category: Category) -> usize {
        self.entry(category).patterns.len()
    }

    fn add_keywords(&mut self, category: Category, keywords: &[&str]) {
        self.entry_mut(category)
            .keywords
            .extend(keywords.iter().map(|k| k.to_lowercase()));
    }

    fn entry(&self, category: Category) -> &CategoryEntry {
        &self.entries[category as usize]
    }

    fn entry_mut(&mut self, category: Category) -> &mut CategoryEntry {
        &mut self.entries[category as usize]
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        let mut rules = Self::empty();
        for (category, patterns, keywords) in DEFAULT_RULES {
            for pattern in *patterns {
                // Built-in patterns are known to compile.
                if let Ok(regex) = compile(pattern) {
                    rules.entry_mut(*category).patterns.push(regex);
                }
            }
            rules.add_keywords(*category, keywords);
        }
        rules
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedTransaction {
    pub description: String,
    pub amount: Money,
    pub category: Category,
    /// 0.0 to 1.0.
    pub confidence: f32,
}

/// Two-tier classifier: regex patterns first, keyword overlap second.
pub struct Classifier {
    rules: CategoryRules,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(CategoryRules::default())
    }
}

impl Classifier {
    pub fn new(rules: CategoryRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &CategoryRules {
        &self.rules
    }

    pub fn classify(&self, description: &str) -> (Category, f32) {
        let text = description.trim().to_lowercase();

        if let Some(category) = self.match_pattern(&text) {
            return (category, PATTERN_CONFIDENCE);
        }

        let mut best = Category::Other;
        let mut best_score = 0.0_f32;
        for entry in &self.rules.entries {
            let score = keyword_score(&text, &entry.keywords);
            if score > best_score {
                best_score = score;
                best = entry.category;
            }
        }

        if best_score >= KEYWORD_THRESHOLD {
            (best, KEYWORD_CONFIDENCE)
        } else {
            (Category::Other, FALLBACK_CONFIDENCE)
        }
    }

    /// Classifies each description, pairing it with the amount at the same
    /// index. Missing amounts are zero.
    pub fn classify_all<S: AsRef<str>>(&self, descriptions: &[S], amounts: &[Money]) -> Vec<ClassifiedTransaction> {
        descriptions
            .iter()
            .enumerate()
            .map(|(idx, description)| {
                let description = description.as_ref();
                let (category, confidence) = self.classify(description);
                ClassifiedTransaction {
                    description: description.to_string(),
                    amount: amounts.get(idx).copied().unwrap_or_default(),
                    category,
                    confidence,
                }
            })
            .collect()
    }

    fn match_pattern(&self, text: &str) -> Option<Category> {
        self.rules
            .entries
            .iter()
            .find(|entry| entry.patterns.iter().any(|re| re.is_match(text)))
            .map(|entry| entry.category)
    }
}

/// Share of words in `text` that overlap at least one keyword.
fn keyword_score(text: &str, keywords: &[String]) -> f32 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || keywords.is_empty() {
        return 0.0;
    }

    let matches = words
        .iter()
        .map(|word| clean_word(word))
        .filter(|word| keywords.iter().any(|k| tokens_overlap(word, k)))
        .count();

    matches as f32 / words.len() as f32
}
