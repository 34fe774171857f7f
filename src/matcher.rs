use crate::knowledge::{Category, FactValue};

/// Scans the list-valued entries of a category for facts containing any
/// whitespace-separated term of the query as a literal substring.
///
/// The comparison is case-insensitive with no stemming or punctuation
/// stripping. Facts are returned in category traversal order, once per
/// matching term, so a fact reachable through two terms appears twice.
/// Single-string values are descriptive text and are not searched.
pub fn find_matches<'a>(query: &str, category: &'a Category) -> Vec<&'a str> {
    let query = query.to_lowercase();
    let terms: Vec<&str> = query.split_whitespace().collect();

    let mut matches = Vec::new();
    for (_, value) in &category.entries {
        if let FactValue::List(facts) = value {
            for fact in facts {
                let fact_lower = fact.to_lowercase();
                for term in &terms {
                    if fact_lower.contains(term) {
                        matches.push(fact.as_str());
                    }
                }
            }
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;

    fn history() -> Category {
        KnowledgeBase::palace_default()
            .category("history")
            .cloned()
            .unwrap()
    }

    #[test]
    fn matching_is_case_insensitive() {
        let category = history();
        let upper = find_matches("GOHIL", &category);
        let lower = find_matches("gohil", &category);
        assert_eq!(upper, lower);
        assert!(!lower.is_empty());
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(find_matches("", &history()).is_empty());
        assert!(find_matches("   ", &history()).is_empty());
    }

    #[test]
    fn scalar_values_are_not_searched() {
        // "centuries" only occurs in the scalar overview entry.
        assert!(find_matches("centuries", &history()).is_empty());
    }

    #[test]
    fn matches_preserve_within_array_order() {
        let category = history();
        let matches = find_matches("epsom", &category);
        assert_eq!(matches.len(), 2);
        assert!(matches[0].contains("Windsor Lad"));
        assert!(matches[1].contains("only Indian owner"));
    }

    #[test]
    fn one_fact_per_matching_term_no_dedupe() {
        let category = history();
        // Both terms hit the same Windsor Lad fact.
        let matches = find_matches("windsor lad", &category);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0], matches[1]);
    }

    #[test]
    fn unrelated_query_yields_empty() {
        assert!(find_matches("xyzzy", &history()).is_empty());
    }
}
