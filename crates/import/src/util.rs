/// Lower-cases `word` and drops everything that is not a letter or digit.
pub fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when either token contains the other. Empty tokens never match.
pub fn tokens_overlap(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_word_strips_punctuation() {
        assert_eq!(clean_word("Restaurants,"), "restaurants");
        assert_eq!(clean_word("PG&E"), "pge");
        assert_eq!(clean_word("--"), "");
    }

    #[test]
    fn clean_word_keeps_digits_and_letters() {
        assert_eq!(clean_word("Store#42"), "store42");
        assert_eq!(clean_word("Café"), "café");
    }

    #[test]
    fn overlap_is_symmetric_substring() {
        assert!(tokens_overlap("restaurants", "restaurant"));
        assert!(tokens_overlap("eat", "eatery"));
        assert!(!tokens_overlap("salary", "food"));
    }

    #[test]
    fn empty_tokens_do_not_overlap() {
        assert!(!tokens_overlap("", "food"));
        assert!(!tokens_overlap("food", ""));
    }
}
