/// Lowercase, split on whitespace runs, drop empties. No stemming, punctuation kept.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase().split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_whitespace() {
        assert_eq!(
            tokenize("  HR Documents\tEmployee\nrecords "),
            ["hr", "documents", "employee", "records"]
        );
    }

    #[test]
    fn keeps_punctuation_and_ids() {
        assert_eq!(tokenize("11.01 Contracts, signed"), ["11.01", "contracts,", "signed"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\n").is_empty());
    }
}
