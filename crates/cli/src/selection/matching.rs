//! Resolving typed names to menu entries.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use microgen_core::actions::{ActionCatalog, GenerateAction};

/// Finds the model best matching `query`.
///
/// A case-insensitive exact match wins; otherwise the highest fuzzy score,
/// earliest entry on ties. Returns `None` if nothing matches at all.
#[must_use]
pub fn match_model<'a>(choices: &'a [String], query: &str) -> Option<&'a String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    if let Some(exact) = choices
        .iter()
        .find(|choice| choice.eq_ignore_ascii_case(query))
    {
        return Some(exact);
    }

    let matcher = SkimMatcherV2::default();

    let mut best: Option<(i64, &String)> = None;
    for choice in choices {
        if let Some(score) = matcher.fuzzy_match(choice, query) {
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, choice));
            }
        }
    }

    best.map(|(_, choice)| choice)
}

/// Resolves menu input for the action list: a 0-based index into the catalog
/// order or an action id (`full-service`, `dto`, ...).
#[must_use]
pub fn match_action(catalog: &ActionCatalog, input: &str) -> Option<GenerateAction> {
    let input = input.trim();

    if let Ok(index) = input.parse::<usize>() {
        return catalog.iter().nth(index).map(|(action, _)| *action);
    }

    input.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices() -> Vec<String> {
        ["All Models", "Order", "OrderItem", "User", "UserProfile"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_exact_match_ignores_case() {
        let choices = choices();
        assert_eq!(match_model(&choices, "order"), Some(&"Order".to_string()));
        assert_eq!(match_model(&choices, "all models"), Some(&"All Models".to_string()));
    }

    #[test]
    fn test_exact_match_beats_longer_fuzzy_match() {
        let choices = choices();
        assert_eq!(match_model(&choices, "User"), Some(&"User".to_string()));
    }

    #[test]
    fn test_fuzzy_match() {
        let choices = choices();
        assert_eq!(match_model(&choices, "uprof"), Some(&"UserProfile".to_string()));
        assert_eq!(match_model(&choices, "ordit"), Some(&"OrderItem".to_string()));
    }

    #[test]
    fn test_no_match() {
        let choices = choices();
        assert_eq!(match_model(&choices, "zzz"), None);
        assert_eq!(match_model(&choices, "  "), None);
    }

    #[test]
    fn test_match_action_by_index_and_id() {
        let catalog = ActionCatalog::built_in();
        assert_eq!(match_action(&catalog, "0"), Some(GenerateAction::FullService));
        assert_eq!(match_action(&catalog, "1"), Some(GenerateAction::Dto));
        assert_eq!(match_action(&catalog, "mapper"), Some(GenerateAction::Mapper));
        assert_eq!(match_action(&catalog, "Full-Service"), Some(GenerateAction::FullService));
        assert_eq!(match_action(&catalog, "8"), None);
        assert_eq!(match_action(&catalog, "frontend"), None);
    }
}
